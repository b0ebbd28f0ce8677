mod action;
mod config;
mod error;
mod game;
mod seat;
mod showdown;
mod sidepot;

pub use action::Action;
pub use config::Config;
pub use error::EngineError;
pub use game::{Game, Stage};
pub use seat::{Seat, Status};
pub use showdown::ShowdownResult;
pub use sidepot::SidePot;
