use std::fmt::{Display, Formatter, Result};

/// Rejection reasons from the Lobby layer. Distinct from [`crate::engine::EngineError`]
/// so the dispatcher can tell a betting-rule rejection from an authorization
/// or roster problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyError {
    UserNotFound,
    NotHost,
    CannotKickSelf,
    SeatTaken,
    AlreadySeated,
    GameInProgress,
    GameNotInProgress,
    NotIdle,
    NotEnoughPlayers,
    Engine(crate::engine::EngineError),
}

impl Display for LobbyError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            LobbyError::UserNotFound => write!(f, "user not found"),
            LobbyError::NotHost => write!(f, "only the host may do this"),
            LobbyError::CannotKickSelf => write!(f, "cannot kick yourself"),
            LobbyError::SeatTaken => write!(f, "seat is taken"),
            LobbyError::AlreadySeated => write!(f, "already seated"),
            LobbyError::GameInProgress => write!(f, "not allowed while a game is in progress"),
            LobbyError::GameNotInProgress => write!(f, "no game is in progress"),
            LobbyError::NotIdle => write!(f, "table is not idle"),
            LobbyError::NotEnoughPlayers => write!(f, "not enough eligible players to start a hand"),
            LobbyError::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LobbyError {}

impl From<crate::engine::EngineError> for LobbyError {
    fn from(e: crate::engine::EngineError) -> Self {
        LobbyError::Engine(e)
    }
}
