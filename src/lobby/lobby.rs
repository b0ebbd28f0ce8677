use super::chat::ChatLog;
use super::config::LobbyConfig;
use super::error::LobbyError;
use super::user::User;
use crate::engine::{self, Action, Game, Stage};
use crate::Chips;

/// Seats, roles, connection state, chat, and host-only table operations.
/// Wraps a [`Game`] without ever peeking at its betting internals directly;
/// everything routed to the engine goes through `engine::EngineError`,
/// wrapped into [`LobbyError::Engine`].
#[derive(Debug, Clone)]
pub struct Lobby {
    pub config: LobbyConfig,
    pub users: Vec<User>,
    pub game: Game,
    pub chat: ChatLog,
    pub game_in_progress: bool,
}

impl Lobby {
    pub fn new(config: LobbyConfig) -> Lobby {
        let engine_config = engine::Config {
            max_seats: config.max_seats,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
        };
        Lobby {
            chat: ChatLog::new(config.max_chat_messages()),
            game: Game::new(engine_config),
            users: Vec::new(),
            game_in_progress: false,
            config,
        }
    }

    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn require_host(&self, id: &str) -> Result<(), LobbyError> {
        match self.user(id) {
            Some(u) if u.is_host => Ok(()),
            Some(_) => Err(LobbyError::NotHost),
            None => Err(LobbyError::UserNotFound),
        }
    }

    fn require_idle(&self) -> Result<(), LobbyError> {
        if self.game.stage == Stage::Idle {
            Ok(())
        } else {
            Err(LobbyError::NotIdle)
        }
    }

    /// Joins or reconnects a user. Returns the user's id (generated if none
    /// was supplied and no existing user matched).
    pub fn join(&mut self, id: Option<String>, name: &str) -> String {
        if let Some(id) = &id {
            if self.user_mut(id).is_some() {
                let user = self.user_mut(id).unwrap();
                user.is_connected = true;
                self.game.set_player_connection(id, true);
                self.game.mark_waiting_if_eligible(id);
                if !self.users.iter().any(|u| u.is_host && u.is_connected) {
                    for user in self.users.iter_mut() {
                        user.is_host = user.id == *id;
                    }
                }
                return id.clone();
            }
        }
        let id = id.unwrap_or_else(generate_id);
        let is_host = self.users.is_empty();
        self.users.push(User {
            id: id.clone(),
            name: name.to_string(),
            is_spectator: true,
            is_host,
            is_connected: true,
        });
        id
    }

    pub fn leave(&mut self, id: &str) {
        let _ = self.game.forfeit_and_vacate_seat(id);
        let was_host = self.user(id).map(|u| u.is_host).unwrap_or(false);
        self.users.retain(|u| u.id != id);

        if was_host {
            if let Some(next) = self.users.first_mut() {
                next.is_host = true;
            }
        }
        if self.users.is_empty() {
            self.chat.set_capacity(self.config.max_chat_messages());
            self.game_in_progress = false;
        }
    }

    pub fn kick_player(&mut self, host_id: &str, target_id: &str) -> Result<(), LobbyError> {
        self.require_host(host_id)?;
        if host_id == target_id {
            return Err(LobbyError::CannotKickSelf);
        }
        if self.user(target_id).is_none() {
            return Err(LobbyError::UserNotFound);
        }
        self.leave(target_id);
        Ok(())
    }

    pub fn disconnect_player(&mut self, id: &str) {
        let was_host = self.user(id).map(|u| u.is_host).unwrap_or(false);
        if let Some(user) = self.user_mut(id) {
            user.is_connected = false;
        }
        self.game.set_player_connection(id, false);
        if was_host {
            if let Some(idx) = self.users.iter().position(|u| u.is_connected) {
                self.users[idx].is_host = true;
                if let Some(user) = self.user_mut(id) {
                    user.is_host = false;
                }
            }
        }
    }

    pub fn sit_player(&mut self, id: &str, seat_index: usize, buy_in: Option<Chips>) -> Result<(), LobbyError> {
        let name = self.user(id).ok_or(LobbyError::UserNotFound)?.name.clone();
        let buy_in = buy_in.unwrap_or(self.config.starting_stack);
        self.game.sit_player_at(seat_index, id, &name, buy_in)?;
        if let Some(user) = self.user_mut(id) {
            user.is_spectator = false;
        }
        Ok(())
    }

    pub fn stand_player(&mut self, id: &str) -> Result<(), LobbyError> {
        self.game.forfeit_and_vacate_seat(id)?;
        if let Some(user) = self.user_mut(id) {
            user.is_spectator = true;
        }
        Ok(())
    }

    pub fn rebuy(&mut self, id: &str, amount: Chips) -> Result<(), LobbyError> {
        self.require_idle()?;
        self.game.rebuy_player(id, amount)?;
        Ok(())
    }

    pub fn start_game(&mut self, host_id: &str) -> Result<(), LobbyError> {
        self.require_host(host_id)?;
        if self.game_in_progress {
            return Err(LobbyError::GameInProgress);
        }
        if !self.game.start_hand() {
            return Err(LobbyError::NotEnoughPlayers);
        }
        self.game_in_progress = true;
        Ok(())
    }

    pub fn start_next_hand(&mut self, host_id: &str) -> Result<(), LobbyError> {
        self.require_host(host_id)?;
        if !self.game_in_progress {
            return Err(LobbyError::GameNotInProgress);
        }
        self.require_idle()?;
        if !self.game.start_hand() {
            return Err(LobbyError::NotEnoughPlayers);
        }
        Ok(())
    }

    pub fn end_game(&mut self, host_id: &str) -> Result<(), LobbyError> {
        self.require_host(host_id)?;
        self.game_in_progress = false;
        self.game.reset_for_end_game();
        Ok(())
    }

    pub fn update_config(&mut self, host_id: &str, new_config: LobbyConfig) -> Result<(), LobbyError> {
        self.require_host(host_id)?;
        if self.game_in_progress {
            return Err(LobbyError::GameInProgress);
        }
        self.game.apply_config(engine::Config {
            max_seats: new_config.max_seats,
            small_blind: new_config.small_blind,
            big_blind: new_config.big_blind,
        });
        self.chat.set_capacity(new_config.max_chat_messages());
        self.config = new_config;
        Ok(())
    }

    pub fn game_action(&mut self, id: &str, action: Action) -> Result<(), LobbyError> {
        self.game.player_action(id, action)?;
        Ok(())
    }

    pub fn muck_show(&mut self, id: &str, show: bool) -> Result<(), LobbyError> {
        self.game.player_muck_or_show(id, show)?;
        Ok(())
    }

    pub fn add_chat_message(&mut self, id: &str, text: &str, timestamp_ms: u64) -> Result<(), LobbyError> {
        let name = self.user(id).ok_or(LobbyError::UserNotFound)?.name.clone();
        self.chat.push(id, &name, text, timestamp_ms);
        Ok(())
    }
}

fn generate_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Lobby {
        Lobby::new(LobbyConfig::new("ROOM1"))
    }

    #[test]
    fn first_joiner_becomes_host() {
        let mut lobby = lobby();
        let id = lobby.join(None, "Alice");
        assert!(lobby.user(&id).unwrap().is_host);
    }

    #[test]
    fn host_reelected_when_host_leaves() {
        let mut lobby = lobby();
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        lobby.leave(&a);
        assert!(lobby.user(&b).unwrap().is_host);
    }

    #[test]
    fn non_host_cannot_kick() {
        let mut lobby = lobby();
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        assert_eq!(lobby.kick_player(&b, &a), Err(LobbyError::NotHost));
    }

    #[test]
    fn config_update_forbidden_mid_game() {
        let mut lobby = lobby();
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        lobby.sit_player(&a, 0, None).unwrap();
        lobby.sit_player(&b, 1, None).unwrap();
        lobby.start_game(&a).unwrap();
        let new_config = LobbyConfig::new("ROOM1");
        assert_eq!(lobby.update_config(&a, new_config), Err(LobbyError::GameInProgress));
    }

    #[test]
    fn rebuy_gated_to_idle() {
        let mut lobby = lobby();
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        lobby.sit_player(&a, 0, None).unwrap();
        lobby.sit_player(&b, 1, None).unwrap();
        lobby.start_game(&a).unwrap();
        assert_eq!(lobby.rebuy(&a, 100), Err(LobbyError::NotIdle));
    }
}
