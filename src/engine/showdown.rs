use crate::cards::HandRank;
use crate::Chips;
use serde::Serialize;

/// Outcome recorded for one seat once `distributePot` runs at Showdown.
#[derive(Debug, Clone, Serialize)]
pub struct ShowdownResult {
    pub seat_index: usize,
    pub hand_rank: Option<HandRank>,
    pub chips_won: Chips,
    pub must_show: bool,
    pub has_decided: bool,
}
