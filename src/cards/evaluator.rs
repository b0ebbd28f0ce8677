use super::card::Card;
use super::rank::Rank;

/// Lower is better, matching the external five-card evaluator contract this
/// crate treats as a fixed collaborator interface.
pub type HandRank = u32;

const CATEGORY_STRAIGHT_FLUSH: u32 = 0;
const CATEGORY_QUADS: u32 = 1;
const CATEGORY_FULL_HOUSE: u32 = 2;
const CATEGORY_FLUSH: u32 = 3;
const CATEGORY_STRAIGHT: u32 = 4;
const CATEGORY_TRIPS: u32 = 5;
const CATEGORY_TWO_PAIR: u32 = 6;
const CATEGORY_PAIR: u32 = 7;
const CATEGORY_HIGH_CARD: u32 = 8;

/// Evaluates the best 5-card rank achievable from 5 to 7 cards.
///
/// Panics if fewer than 5 cards are given; callers at showdown only invoke
/// this once a seat has at least hole cards plus a full board.
pub fn evaluate(cards: &[Card]) -> HandRank {
    assert!(cards.len() >= 5, "evaluator needs at least 5 cards");
    let mut best = u32::MAX;
    for combo in combinations(cards, 5) {
        let score = rank_five([combo[0], combo[1], combo[2], combo[3], combo[4]]);
        best = best.min(score);
    }
    best
}

fn rank_five(cards: [Card; 5]) -> HandRank {
    let mut ranks: Vec<u8> = cards.iter().map(|c| u8::from(c.rank())).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.windows(2).all(|w| w[0].suit() == w[1].suit());
    let straight_high = straight_high_card(&ranks);

    let mut counts = [0u8; 13];
    for &r in &ranks {
        counts[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(rank, &n)| (n, rank as u8))
        .collect();
    // sort by count desc, then rank desc, so groups[0] is the most significant
    groups.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let (category, tiebreak): (u32, Vec<u8>) = if is_flush && straight_high.is_some() {
        (CATEGORY_STRAIGHT_FLUSH, vec![straight_high.unwrap()])
    } else if groups[0].0 == 4 {
        (CATEGORY_QUADS, groups.iter().map(|g| g.1).collect())
    } else if groups[0].0 == 3 && groups[1].0 == 2 {
        (CATEGORY_FULL_HOUSE, vec![groups[0].1, groups[1].1])
    } else if is_flush {
        (CATEGORY_FLUSH, ranks.clone())
    } else if let Some(high) = straight_high {
        (CATEGORY_STRAIGHT, vec![high])
    } else if groups[0].0 == 3 {
        (CATEGORY_TRIPS, groups.iter().map(|g| g.1).collect())
    } else if groups[0].0 == 2 && groups[1].0 == 2 {
        (CATEGORY_TWO_PAIR, groups.iter().map(|g| g.1).collect())
    } else if groups[0].0 == 2 {
        (CATEGORY_PAIR, groups.iter().map(|g| g.1).collect())
    } else {
        (CATEGORY_HIGH_CARD, ranks.clone())
    };

    encode(category, &tiebreak)
}

/// Returns the high card of the straight (0..12, Ace-low wheel scores 3) if
/// the five distinct ranks form a straight.
fn straight_high_card(desc_ranks: &[u8]) -> Option<u8> {
    let mut distinct: Vec<u8> = desc_ranks.to_vec();
    distinct.dedup();
    if distinct.len() != 5 {
        return None;
    }
    if distinct[0] - distinct[4] == 4 {
        return Some(distinct[0]);
    }
    // wheel: A,5,4,3,2 -> distinct desc = [12,3,2,1,0]
    if distinct == [12, 3, 2, 1, 0] {
        return Some(3);
    }
    None
}

/// Packs category (dominant) and up to five base-13 tiebreak digits
/// (descending significance) into one integer where lower is better.
fn encode(category: u32, tiebreak: &[u8]) -> u32 {
    let mut packed: u32 = 0;
    for &rank in tiebreak.iter().take(5) {
        packed = packed * 13 + (12 - rank as u32);
    }
    for _ in tiebreak.len()..5 {
        packed *= 13;
    }
    category * 13u32.pow(5) + packed
}

fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    combine(cards, k, 0, &mut current, &mut result);
    result
}

fn combine(cards: &[Card], k: usize, start: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    for i in start..cards.len() {
        current.push(cards[i]);
        combine(cards, k, i + 1, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn straight_flush_beats_quads() {
        let sf = [
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
        ];
        let quads = [
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
        ];
        assert!(evaluate(&sf) < evaluate(&quads));
    }

    #[test]
    fn wheel_is_a_straight() {
        let wheel = [
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Two, Suit::Diamonds),
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
        ];
        let high_card = [
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
        ];
        assert!(evaluate(&wheel) < evaluate(&high_card));
    }

    #[test]
    fn best_of_seven_picks_top_five() {
        let seven = [
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Hearts),
            card(Rank::King, Suit::Diamonds),
        ];
        let five = [
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Hearts),
            card(Rank::King, Suit::Diamonds),
        ];
        assert_eq!(evaluate(&seven), evaluate(&five));
    }

    #[test]
    fn tied_hands_rank_equal() {
        let a = [
            card(Rank::King, Suit::Clubs),
            card(Rank::Queen, Suit::Diamonds),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
        ];
        let b = [
            card(Rank::King, Suit::Hearts),
            card(Rank::Queen, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
        ];
        assert_eq!(evaluate(&a), evaluate(&b));
    }
}
