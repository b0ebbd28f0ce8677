use serde::Serialize;

/// A connected client, independent of whether they hold a seat.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub is_spectator: bool,
    pub is_host: bool,
    pub is_connected: bool,
}
