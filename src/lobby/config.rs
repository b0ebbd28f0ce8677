use crate::Chips;

#[derive(Debug, Clone)]
pub struct LobbyConfig {
    pub room_code: String,
    pub max_seats: usize,
    pub starting_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub action_timeout_secs: u32,
    pub god_mode: bool,
}

impl LobbyConfig {
    pub fn new(room_code: impl Into<String>) -> LobbyConfig {
        LobbyConfig {
            room_code: room_code.into(),
            max_seats: 9,
            starting_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            action_timeout_secs: 30,
            god_mode: false,
        }
    }

    pub fn max_chat_messages(&self) -> usize {
        200
    }
}
