use crate::cards::{evaluate, Card};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

/// Total simulations spread across worker threads per call. Spectator views
/// are refreshed once per broadcast, not per frame, so this can afford to be
/// generous without stalling the single-threaded core.
const ITERATIONS: usize = 20_000;

/// Monte-Carlo win-share estimate for each hand, in the order given. Values
/// sum to approximately 1.0 (exactly 1.0 in the absence of floating-point
/// rounding) since every simulated board produces exactly one unit of win
/// share, split on ties.
pub fn estimate(hands: &[Vec<Card>], board: &[Card]) -> Vec<f32> {
    if hands.len() < 2 {
        return vec![1.0; hands.len()];
    }
    let mut used: Vec<Card> = board.to_vec();
    used.extend(hands.iter().flatten().copied());
    let remaining: Vec<Card> = (0..52)
        .map(Card::from_index)
        .filter(|c| !used.contains(c))
        .collect();
    let needed = 5 - board.len();

    let batches = rayon::current_num_threads().max(1);
    let per_batch = ITERATIONS.div_ceil(batches);

    let totals: Vec<f64> = (0..batches)
        .into_par_iter()
        .map(|batch| {
            let mut rng = SmallRng::seed_from_u64(0x9E37_79B9 ^ batch as u64);
            let mut totals = vec![0.0f64; hands.len()];
            let mut deck = remaining.clone();
            for _ in 0..per_batch {
                deck.shuffle(&mut rng);
                let runout = &deck[..needed];
                let mut best = u32::MAX;
                let mut winners = Vec::with_capacity(hands.len());
                for (i, hole) in hands.iter().enumerate() {
                    let mut seven = hole.clone();
                    seven.extend_from_slice(board);
                    seven.extend_from_slice(runout);
                    let rank = evaluate(&seven);
                    match rank.cmp(&best) {
                        std::cmp::Ordering::Less => {
                            best = rank;
                            winners.clear();
                            winners.push(i);
                        }
                        std::cmp::Ordering::Equal => winners.push(i),
                        std::cmp::Ordering::Greater => {}
                    }
                }
                let share = 1.0 / winners.len() as f64;
                for i in winners {
                    totals[i] += share;
                }
            }
            totals
        })
        .reduce(
            || vec![0.0f64; hands.len()],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    let iterations = (batches * per_batch) as f64;
    totals.into_iter().map(|t| (t / iterations) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn win_shares_sum_to_one() {
        let hands = vec![
            vec![card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)],
            vec![card(Rank::King, Suit::Spades), card(Rank::King, Suit::Hearts)],
        ];
        let board = vec![];
        let equities = estimate(&hands, &board);
        let sum: f32 = equities.iter().sum();
        assert!((sum - 1.0).abs() < 0.02, "sum was {sum}");
        assert!(equities[0] > equities[1], "pocket aces should lead");
    }

    #[test]
    fn identical_hands_split_evenly() {
        let hands = vec![
            vec![card(Rank::Two, Suit::Clubs), card(Rank::Seven, Suit::Diamonds)],
            vec![card(Rank::Two, Suit::Hearts), card(Rank::Seven, Suit::Spades)],
        ];
        let board = vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Queen, Suit::Hearts),
            card(Rank::Jack, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Four, Suit::Clubs),
        ];
        let equities = estimate(&hands, &board);
        assert!((equities[0] - equities[1]).abs() < 0.01);
    }
}
