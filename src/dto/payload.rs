use crate::engine::Action;
use crate::Chips;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct JoinPayload {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinResult {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitPayload {
    pub seat_index: usize,
    #[serde(default)]
    pub buy_in: Option<Chips>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameActionPayload {
    pub command: String,
    #[serde(default)]
    pub amount: Option<Chips>,
}

impl GameActionPayload {
    pub fn into_action(self) -> Result<Action, String> {
        match self.command.as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "allin" => Ok(Action::AllIn),
            "raise" => self
                .amount
                .map(Action::Raise)
                .ok_or_else(|| "raise requires an amount".to_string()),
            other => Err(format!("unknown action command: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MuckShowPayload {
    pub show: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RebuyPayload {
    pub amount: Chips,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatPayload {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigPayload {
    pub max_seats: usize,
    pub starting_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub action_timeout_secs: u32,
    pub god_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KickPlayerPayload {
    pub target_id: String,
}
