mod room;
mod table;

pub use room::{Room, RoomHandle, ToRoom};
pub use table::{ConnId, Table};
