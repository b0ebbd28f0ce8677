pub mod chat;
pub mod config;
pub mod error;
#[allow(clippy::module_inception)]
mod lobby;
pub mod user;
pub mod view;

pub use chat::{ChatLog, ChatMessage};
pub use config::LobbyConfig;
pub use error::LobbyError;
pub use lobby::Lobby;
pub use user::User;
pub use view::{project, SeatView, ViewerState};
