mod casino;
mod server;

pub use casino::{Casino, RoomId};
pub use server::Server;
