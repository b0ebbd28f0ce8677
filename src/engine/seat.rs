use crate::cards::Card;
use crate::Chips;
use serde::Serialize;

/// Per-seat status through the lifecycle of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    SittingOut,
    Waiting,
    Active,
    Folded,
    AllIn,
}

/// Mutable per-seat state. A seat with `id = None` is vacant.
#[derive(Debug, Clone)]
pub struct Seat {
    pub id: Option<String>,
    pub name: String,
    pub chips: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub status: Status,
    pub hand: Vec<Card>,
    pub show_cards: bool,
    pub is_connected: bool,
}

impl Seat {
    pub fn empty() -> Seat {
        Seat {
            id: None,
            name: String::new(),
            chips: 0,
            current_bet: 0,
            total_bet: 0,
            status: Status::SittingOut,
            hand: Vec::new(),
            show_cards: false,
            is_connected: false,
        }
    }

    pub fn is_vacant(&self) -> bool {
        self.id.is_none()
    }

    /// A seat counts toward "active for the hand" preconditions when it is
    /// occupied, not sitting out, and has chips behind it.
    pub fn is_eligible_for_hand(&self) -> bool {
        !self.is_vacant() && self.status != Status::SittingOut && self.chips > 0
    }

    pub fn can_still_bet(&self) -> bool {
        self.status == Status::Active
    }

    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, Status::Active | Status::AllIn | Status::Folded)
    }
}
