use super::rank::Rank;
use super::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// A single playing card, packed as `suit << 4 | rank` in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card(u8);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card((u8::from(suit) << 4) | u8::from(rank))
    }

    pub fn rank(&self) -> Rank {
        Rank::from(self.0 & 0x0F)
    }

    pub fn suit(&self) -> Suit {
        Suit::from(self.0 >> 4)
    }

    /// Dense index in `0..52`, used to enumerate or index a full deck.
    pub fn index(&self) -> u8 {
        u8::from(self.suit()) * 13 + u8::from(self.rank())
    }

    pub fn from_index(n: u8) -> Card {
        Card::new(Rank::from(n % 13), Suit::from(n / 13))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl From<Card> for String {
    fn from(c: Card) -> String {
        c.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = String;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Card::try_from(s.as_str())
    }
}

impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let mut chars = s.chars();
        let rank = chars
            .next()
            .and_then(|c| Rank::try_from(c).ok())
            .ok_or_else(|| format!("bad card string {s}"))?;
        let suit = chars
            .next()
            .and_then(|c| Suit::try_from(c).ok())
            .ok_or_else(|| format!("bad card string {s}"))?;
        if chars.next().is_some() {
            return Err(format!("bad card string {s}"));
        }
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_roundtrip_all_52() {
        for n in 0..52u8 {
            let card = Card::from_index(n);
            let parsed = Card::try_from(card.to_string().as_str()).unwrap();
            assert_eq!(card, parsed);
        }
    }

    #[test]
    fn index_roundtrip() {
        for n in 0..52u8 {
            assert_eq!(Card::from_index(n).index(), n);
        }
    }

    #[test]
    fn json_roundtrip() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"As\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
