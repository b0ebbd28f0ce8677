use crate::gameroom::{Room, RoomHandle, ToRoom};
use crate::lobby::LobbyConfig;
use std::collections::HashMap;
use tokio::sync::RwLock;

pub type RoomId = String;

/// Manages active rooms and their lifecycles. Holds no game state itself --
/// each room is its own single-threaded task reachable only through its
/// [`RoomHandle`].
#[derive(Default)]
pub struct Casino {
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
}

impl Casino {
    /// Opens a new room under `room_code`, spawning its task. Errors if the
    /// code is already taken.
    pub async fn start(&self, config: LobbyConfig) -> anyhow::Result<RoomId> {
        let id = config.room_code.clone();
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&id) {
            anyhow::bail!("room {id} already exists");
        }
        let handle = Room::spawn(config);
        rooms.insert(id.clone(), handle);
        log::info!("opened room {id}");
        Ok(id)
    }

    pub async fn close(&self, id: &str) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(id)
            .map(|_| log::info!("closed room {id}"))
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    pub async fn handle(&self, id: &str) -> anyhow::Result<RoomHandle> {
        self.rooms
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    /// Bridges one websocket connection into a room: registers its outbound
    /// sender, forwards inbound text frames as `ToRoom::Message`, and tells
    /// the room when the socket closes.
    pub async fn bridge(
        &self,
        id: &str,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) -> anyhow::Result<()> {
        use futures::StreamExt;
        let handle = self.handle(id).await?;
        let conn = handle.next_conn_id();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
        let _ = handle.tx.send(ToRoom::Connect { conn, output: tx });

        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => {
                            let _ = handle.tx.send(ToRoom::Message { conn, text: text.to_string() });
                        }
                        Some(Ok(actix_ws::Message::Close(_))) | Some(Err(_)) | None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            let _ = handle.tx.send(ToRoom::Disconnect { conn });
        });
        Ok(())
    }
}
