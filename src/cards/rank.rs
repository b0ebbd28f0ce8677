use std::fmt::{Display, Formatter, Result};

/// Card rank, Two low through Ace high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

const ASCII: &[u8; 13] = b"23456789TJQKA";

impl Rank {
    pub fn all() -> [Rank; 13] {
        [
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ]
    }

    pub fn ascii(&self) -> char {
        ASCII[*self as usize] as char
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        match n {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            n => panic!("invalid rank index {n}"),
        }
    }
}

impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

impl TryFrom<char> for Rank {
    type Error = ();
    fn try_from(c: char) -> std::result::Result<Self, ()> {
        ASCII
            .iter()
            .position(|&b| b as char == c)
            .map(|i| Rank::from(i as u8))
            .ok_or(())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for n in 0..13u8 {
            assert_eq!(u8::from(Rank::from(n)), n);
        }
    }

    #[test]
    fn ascii_roundtrip() {
        for rank in Rank::all() {
            assert_eq!(Rank::try_from(rank.ascii()).unwrap(), rank);
        }
    }
}
