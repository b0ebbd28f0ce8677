use std::fmt::{Display, Formatter, Result};

/// Rejection reasons from the Hand Engine. Every variant maps to
/// `INVALID_ACTION` at the dispatcher layer except where noted; the engine
/// itself never panics on bad input and never mutates state on an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    WrongStage,
    NotYourTurn,
    SeatNotActive,
    IllegalAmount,
    SeatOccupied,
    SeatVacant,
    AlreadySeatedElsewhere,
    NotEligible,
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let msg = match self {
            EngineError::WrongStage => "action not legal in the current stage",
            EngineError::NotYourTurn => "it is not this seat's turn",
            EngineError::SeatNotActive => "seat is not active",
            EngineError::IllegalAmount => "amount does not satisfy the betting rules",
            EngineError::SeatOccupied => "seat is already occupied",
            EngineError::SeatVacant => "seat is vacant",
            EngineError::AlreadySeatedElsewhere => "id is already seated at another seat",
            EngineError::NotEligible => "not eligible for this operation",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for EngineError {}
