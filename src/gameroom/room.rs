use super::table::{ConnId, Table};
use crate::dto::{
    ChatPayload, Envelope, ErrorCode, GameActionPayload, JoinPayload, JoinResult, KickPlayerPayload,
    MuckShowPayload, RebuyPayload, SitPayload, UpdateConfigPayload,
};
use crate::lobby::{self, Lobby, LobbyConfig, LobbyError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One inbound event on a room's single-threaded processing loop.
pub enum ToRoom {
    Connect {
        conn: ConnId,
        output: UnboundedSender<String>,
    },
    Message {
        conn: ConnId,
        text: String,
    },
    Disconnect {
        conn: ConnId,
    },
}

/// Handle to a running room task: a channel into its inbox plus the next
/// connection id to hand out for a fresh websocket session.
#[derive(Clone)]
pub struct RoomHandle {
    pub tx: UnboundedSender<ToRoom>,
    pub next_conn: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

impl RoomHandle {
    pub fn next_conn_id(&self) -> ConnId {
        self.next_conn.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }
}

/// Owns one table's [`Lobby`] plus the per-connection broadcaster. Runs as a
/// single task; all mutation happens on this one loop so the engine and
/// lobby never need their own locking.
pub struct Room {
    lobby: Lobby,
    table: Table,
    rx: UnboundedReceiver<ToRoom>,
}

impl Room {
    pub fn spawn(config: LobbyConfig) -> RoomHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let room = Room {
            lobby: Lobby::new(config),
            table: Table::new(),
            rx,
        };
        tokio::spawn(room.run());
        RoomHandle {
            tx,
            next_conn: std::sync::Arc::new(std::sync::atomic::AtomicU64::new(1)),
        }
    }

    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                ToRoom::Connect { conn, output } => self.table.register(conn, output),
                ToRoom::Message { conn, text } => self.handle_message(conn, &text),
                ToRoom::Disconnect { conn } => self.handle_disconnect(conn),
            }
        }
        log::info!("[room] inbox closed, shutting down");
    }

    fn handle_disconnect(&mut self, conn: ConnId) {
        if let Some(user_id) = self.table.owner_of(conn).map(str::to_string) {
            if self.table.is_live(&user_id, conn) {
                self.lobby.disconnect_player(&user_id);
            }
        }
        self.table.disconnect(conn);
        self.broadcast_state();
    }

    fn handle_message(&mut self, conn: ConnId, text: &str) {
        let envelope: Envelope = match serde_json::from_str(text) {
            Ok(e) => e,
            Err(e) => {
                self.table
                    .unicast(conn, to_json(&Envelope::err("0", ErrorCode::BadPayload, e.to_string())));
                return;
            }
        };
        let Envelope::Request { id, action, data, .. } = envelope else {
            self.table
                .unicast(conn, to_json(&Envelope::err("0", ErrorCode::BadPayload, "expected a request")));
            return;
        };

        if action == "join" {
            self.handle_join(conn, id, data);
            return;
        }

        let Some(user_id) = self.table.owner_of(conn).map(str::to_string) else {
            self.table
                .unicast(conn, to_json(&Envelope::err(id, ErrorCode::Unauthorized, "join before acting")));
            return;
        };
        if !self.table.is_live(&user_id, conn) {
            self.table
                .unicast(conn, to_json(&Envelope::err(id, ErrorCode::StaleConnection, "superseded by a newer connection")));
            return;
        }

        let result = self.dispatch(&user_id, &action, data);
        match result {
            Ok(value) => {
                self.table.unicast(conn, to_json(&Envelope::ok(id, value)));
                self.broadcast_state();
            }
            Err(message) => {
                self.table
                    .unicast(conn, to_json(&Envelope::err(id, ErrorCode::InvalidAction, message)));
            }
        }
    }

    fn handle_join(&mut self, conn: ConnId, id: String, data: serde_json::Value) {
        let payload: JoinPayload = match serde_json::from_value(data) {
            Ok(p) => p,
            Err(e) => {
                self.table
                    .unicast(conn, to_json(&Envelope::err(id, ErrorCode::BadPayload, e.to_string())));
                return;
            }
        };
        let user_id = self.lobby.join(payload.id, &payload.name);
        if let Some(evicted) = self.table.bind(&user_id, conn) {
            log::debug!("[room] conn {conn} superseded stale conn {evicted} for user {user_id}");
        }
        self.table
            .unicast(conn, to_json(&Envelope::ok(id, serde_json::to_value(JoinResult { user_id }).unwrap())));
        self.broadcast_state();
    }

    fn dispatch(&mut self, user_id: &str, action: &str, data: serde_json::Value) -> Result<serde_json::Value, String> {
        match action {
            "sit" => {
                let payload: SitPayload = parse(data)?;
                self.lobby.sit_player(user_id, payload.seat_index, payload.buy_in).map_err(stringify)?;
            }
            "stand" => {
                self.lobby.stand_player(user_id).map_err(stringify)?;
            }
            "start_game" => {
                self.lobby.start_game(user_id).map_err(stringify)?;
            }
            "start_next_hand" => {
                self.lobby.start_next_hand(user_id).map_err(stringify)?;
            }
            "end_game" => {
                self.lobby.end_game(user_id).map_err(stringify)?;
            }
            "game_action" => {
                let payload: GameActionPayload = parse(data)?;
                let action = payload.into_action()?;
                self.lobby.game_action(user_id, action).map_err(stringify)?;
            }
            "muck_show" => {
                let payload: MuckShowPayload = parse(data)?;
                self.lobby.muck_show(user_id, payload.show).map_err(stringify)?;
            }
            "rebuy" => {
                let payload: RebuyPayload = parse(data)?;
                self.lobby.rebuy(user_id, payload.amount).map_err(stringify)?;
            }
            "chat" => {
                let payload: ChatPayload = parse(data)?;
                self.lobby.add_chat_message(user_id, &payload.message, now_ms()).map_err(stringify)?;
            }
            "update_config" => {
                let payload: UpdateConfigPayload = parse(data)?;
                let config = LobbyConfig {
                    room_code: self.lobby.config.room_code.clone(),
                    max_seats: payload.max_seats,
                    starting_stack: payload.starting_stack,
                    small_blind: payload.small_blind,
                    big_blind: payload.big_blind,
                    action_timeout_secs: payload.action_timeout_secs,
                    god_mode: payload.god_mode,
                };
                self.lobby.update_config(user_id, config).map_err(stringify)?;
            }
            "kick_player" => {
                let payload: KickPlayerPayload = parse(data)?;
                self.lobby.kick_player(user_id, &payload.target_id).map_err(stringify)?;
                self.notify_kicked(&payload.target_id);
            }
            "leave" => {
                self.lobby.leave(user_id);
            }
            other => return Err(format!("unknown action: {other}")),
        }
        Ok(serde_json::Value::Null)
    }

    fn notify_kicked(&mut self, user_id: &str) {
        // The hosting layer closes the socket once it relays this event to
        // the kicked user's own connection.
        if let Some(conn) = self.table.conn_of(user_id) {
            let message = to_json(&Envelope::event("kicked", serde_json::json!({ "userId": user_id })));
            self.table.unicast(conn, message);
        }
    }

    fn broadcast_state(&mut self) {
        let equities = self.god_mode_equities();
        let ids: Vec<String> = self.table.bound_user_ids().map(str::to_string).collect();
        for user_id in ids {
            let Some(conn) = self.table.conn_of(&user_id) else { continue };
            let view = lobby::project(&self.lobby, &user_id, equities.clone());
            let event = Envelope::event("game_state", serde_json::to_value(view).unwrap());
            self.table.unicast(conn, to_json(&event));
        }
    }

    fn god_mode_equities(&self) -> Option<std::collections::HashMap<usize, f32>> {
        if !self.lobby.config.god_mode {
            return None;
        }
        let hands: Vec<(usize, Vec<crate::cards::Card>)> = self
            .lobby
            .game
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status != crate::engine::Status::Folded && s.hand.len() == 2)
            .map(|(i, s)| (i, s.hand.clone()))
            .collect();
        if hands.len() < 2 {
            return None;
        }
        let indices: Vec<usize> = hands.iter().map(|(i, _)| *i).collect();
        let only_hands: Vec<Vec<crate::cards::Card>> = hands.into_iter().map(|(_, h)| h).collect();
        let shares = crate::equity::estimate(&only_hands, &self.lobby.game.board);
        Some(indices.into_iter().zip(shares).collect())
    }
}

fn parse<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(data).map_err(|e| e.to_string())
}

fn stringify(e: LobbyError) -> String {
    e.to_string()
}

fn to_json(envelope: &Envelope) -> String {
    serde_json::to_string(envelope).unwrap_or_else(|_| "{}".to_string())
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
