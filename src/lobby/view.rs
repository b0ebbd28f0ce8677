use super::chat::ChatMessage;
use super::lobby::Lobby;
use super::user::User;
use crate::cards::Card;
use crate::engine::{self, SidePot, ShowdownResult, Stage, Status};
use crate::Chips;
use serde::Serialize;
use std::collections::HashMap;

/// Per-seat projection. `hand` holds only the cards this viewer is allowed
/// to see; `hand_card_count` always reports how many hole cards the seat
/// actually holds, so a client can still draw face-down card backs.
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub id: Option<String>,
    pub name: String,
    pub chips: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub status: Status,
    pub hand: Vec<Card>,
    pub hand_card_count: usize,
    pub show_cards: bool,
    pub is_connected: bool,
}

/// Everything one viewer (player or spectator) is allowed to see, fully
/// redacted. Built fresh on every mutation by [`project`]; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerState {
    pub room_code: String,
    pub stage: Stage,
    pub pot: Chips,
    pub board: Vec<Card>,
    pub seats: Vec<SeatView>,
    pub users: Vec<User>,
    pub chat: Vec<ChatMessage>,
    pub button_pos: Option<usize>,
    pub sb_pos: Option<usize>,
    pub bb_pos: Option<usize>,
    pub current_actor: Option<usize>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub side_pots: Vec<SidePot>,
    pub showdown_results: Vec<ShowdownResult>,
    pub viewer_id: String,
    pub is_spectator: bool,
    /// seat index -> win probability, only populated for a spectator in a
    /// god-mode room once at least two hole-card hands are dealt.
    pub equities: Option<HashMap<usize, f32>>,
}

/// Pure projection of a [`Lobby`] into one viewer's redacted state. `equities`
/// is supplied by the caller (the equity estimator is a separate concern)
/// and is only attached to the result when it applies to this viewer.
pub fn project(lobby: &Lobby, viewer_id: &str, equities: Option<HashMap<usize, f32>>) -> ViewerState {
    let is_spectator = lobby
        .users
        .iter()
        .find(|u| u.id == viewer_id)
        .map(|u| u.is_spectator)
        .unwrap_or(true);

    let dealt_hands = lobby
        .game
        .seats
        .iter()
        .filter(|s| s.status != Status::Folded && s.hand.len() == 2)
        .count();
    let god_mode_reveal = is_spectator && lobby.config.god_mode && dealt_hands >= 2;

    let seats = lobby
        .game
        .seats
        .iter()
        .map(|seat| {
            let reveal = god_mode_reveal
                || seat.show_cards
                || lobby.game.stage == Stage::Showdown
                || seat.id.as_deref() == Some(viewer_id);
            SeatView {
                id: seat.id.clone(),
                name: seat.name.clone(),
                chips: seat.chips,
                current_bet: seat.current_bet,
                total_bet: seat.total_bet,
                status: seat.status,
                hand: if reveal { seat.hand.clone() } else { Vec::new() },
                hand_card_count: seat.hand.len(),
                show_cards: seat.show_cards,
                is_connected: seat.is_connected,
            }
        })
        .collect();

    ViewerState {
        room_code: lobby.config.room_code.clone(),
        stage: lobby.game.stage,
        pot: lobby.game.pot,
        board: lobby.game.board.clone(),
        seats,
        users: lobby.users.clone(),
        chat: lobby.chat.messages().to_vec(),
        button_pos: lobby.game.button_pos,
        sb_pos: lobby.game.sb_pos,
        bb_pos: lobby.game.bb_pos,
        current_actor: lobby.game.current_actor,
        current_bet: lobby.game.current_bet,
        min_raise: lobby.game.min_raise,
        side_pots: lobby.game.side_pots.clone(),
        showdown_results: lobby.game.showdown_results.clone(),
        viewer_id: viewer_id.to_string(),
        is_spectator,
        equities: if god_mode_reveal { equities } else { None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::config::LobbyConfig;

    #[test]
    fn spectator_without_god_mode_sees_no_hole_cards() {
        let mut lobby = Lobby::new(LobbyConfig::new("R1"));
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        let spectator = lobby.join(None, "Watcher");
        lobby.sit_player(&a, 0, None).unwrap();
        lobby.sit_player(&b, 1, None).unwrap();
        lobby.start_game(&a).unwrap();

        let view = project(&lobby, &spectator, None);
        assert!(view.is_spectator);
        for seat in &view.seats {
            if seat.id.is_some() {
                assert!(seat.hand.is_empty());
                assert_eq!(seat.hand_card_count, 2);
            }
        }
    }

    #[test]
    fn player_sees_own_cards_not_opponents() {
        let mut lobby = Lobby::new(LobbyConfig::new("R1"));
        let a = lobby.join(None, "Alice");
        let b = lobby.join(None, "Bob");
        lobby.sit_player(&a, 0, None).unwrap();
        lobby.sit_player(&b, 1, None).unwrap();
        lobby.start_game(&a).unwrap();

        let view = project(&lobby, &a, None);
        let own = view.seats.iter().find(|s| s.id.as_deref() == Some(a.as_str())).unwrap();
        let opp = view.seats.iter().find(|s| s.id.as_deref() == Some(b.as_str())).unwrap();
        assert_eq!(own.hand.len(), 2);
        assert!(opp.hand.is_empty());
    }
}
