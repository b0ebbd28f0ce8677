use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

pub type ConnId = u64;

/// Per-user broadcaster registry for one room. Tracks which connection is
/// currently bound to which user id, so a `join` that rebinds an existing
/// user drops the old connection's sender -- its websocket bridge loop then
/// observes a closed channel and tears itself down without an explicit
/// close call.
#[derive(Debug, Default)]
pub struct Table {
    senders: HashMap<ConnId, UnboundedSender<String>>,
    binding: HashMap<String, ConnId>,
    owner: HashMap<ConnId, String>,
}

impl Table {
    pub fn new() -> Table {
        Table::default()
    }

    pub fn register(&mut self, conn: ConnId, sender: UnboundedSender<String>) {
        self.senders.insert(conn, sender);
    }

    /// Binds `user_id` to `conn`, evicting whatever connection previously
    /// held that binding. Returns the evicted connection, if any.
    pub fn bind(&mut self, user_id: &str, conn: ConnId) -> Option<ConnId> {
        self.owner.insert(conn, user_id.to_string());
        let previous = self.binding.insert(user_id.to_string(), conn);
        if let Some(old) = previous {
            if old != conn {
                self.senders.remove(&old);
                self.owner.remove(&old);
                return Some(old);
            }
        }
        None
    }

    pub fn owner_of(&self, conn: ConnId) -> Option<&str> {
        self.owner.get(&conn).map(String::as_str)
    }

    pub fn conn_of(&self, user_id: &str) -> Option<ConnId> {
        self.binding.get(user_id).copied()
    }

    /// True when `conn` is still the live, bound connection for `user_id`
    /// (rather than one superseded by a later `join`).
    pub fn is_live(&self, user_id: &str, conn: ConnId) -> bool {
        self.binding.get(user_id) == Some(&conn)
    }

    pub fn disconnect(&mut self, conn: ConnId) {
        self.senders.remove(&conn);
        if let Some(user_id) = self.owner.remove(&conn) {
            if self.binding.get(&user_id) == Some(&conn) {
                self.binding.remove(&user_id);
            }
        }
    }

    pub fn unicast(&self, conn: ConnId, message: String) {
        if let Some(sender) = self.senders.get(&conn) {
            if sender.send(message).is_err() {
                log::warn!("[table] unicast to conn {conn} failed, receiver gone");
            }
        }
    }

    pub fn bound_user_ids(&self) -> impl Iterator<Item = &str> {
        self.binding.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn rebind_evicts_previous_connection() {
        let mut table = Table::new();
        let (tx1, mut rx1) = unbounded_channel();
        let (tx2, _rx2) = unbounded_channel();
        table.register(1, tx1);
        table.register(2, tx2);
        table.bind("alice", 1);
        assert!(table.is_live("alice", 1));
        let evicted = table.bind("alice", 2);
        assert_eq!(evicted, Some(1));
        assert!(!table.is_live("alice", 1));
        assert!(table.is_live("alice", 2));
        drop(table);
        assert!(rx1.try_recv().is_err());
    }
}
