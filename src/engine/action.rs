use crate::Chips;
use std::fmt::{Display, Formatter, Result};

/// A player's request to the Hand Engine. `Raise` and `Call` carry the
/// requested total per-round commitment / amount respectively; `Call` and
/// `AllIn` ignore any caller-supplied amount since both are fully determined
/// by table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Chips),
    AllIn,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Raise(amount) => write!(f, "raise {amount}"),
            Action::AllIn => write!(f, "allin"),
        }
    }
}
