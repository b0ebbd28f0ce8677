use crate::Chips;
use serde::Serialize;

/// A bucket of contributions at one all-in stack level, with its own
/// eligibility set. Seat indices (not ids) back the eligibility list: ids
/// are reconstructed by scanning seats, but since the lobby guarantees one
/// id per seat, carrying indices directly avoids that ambiguity.
#[derive(Debug, Clone, Serialize)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible: Vec<usize>,
}
