use super::card::Card;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Ordered sequence of distinct cards. `deal` pops from the tail; a burn is
/// a deal whose result is discarded by the caller.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh 52-card deck shuffled with an OS-seeded PRNG.
    pub fn shuffled() -> Deck {
        let mut rng = SmallRng::from_os_rng();
        Deck::shuffled_with(&mut rng)
    }

    /// Shuffle with a caller-supplied PRNG, for deterministic tests.
    pub fn shuffled_with(rng: &mut SmallRng) -> Deck {
        let mut cards: Vec<Card> = (0..52).map(Card::from_index).collect();
        cards.shuffle(rng);
        Deck { cards }
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deals_all_52_distinct() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::shuffled_with(&mut rng);
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = deck.deal() {
            assert!(seen.insert(card), "duplicate card dealt");
        }
        assert_eq!(seen.len(), 52);
        assert!(deck.is_empty());
    }

    #[test]
    fn deterministic_given_seed() {
        let mut a = Deck::shuffled_with(&mut SmallRng::seed_from_u64(42));
        let mut b = Deck::shuffled_with(&mut SmallRng::seed_from_u64(42));
        for _ in 0..52 {
            assert_eq!(a.deal(), b.deal());
        }
    }
}
