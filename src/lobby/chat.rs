use serde::Serialize;

/// One chat line. `timestamp_ms` is supplied by the caller (the Lobby has
/// no clock of its own) so that hand histories and tests stay deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub text: String,
    pub timestamp_ms: u64,
}

const MAX_MESSAGE_LEN: usize = 280;

/// Bounded, append-only chat history. Oldest messages drop off once
/// `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    capacity: usize,
    next_id: u64,
}

impl ChatLog {
    pub fn new(capacity: usize) -> ChatLog {
        ChatLog {
            messages: Vec::new(),
            capacity,
            next_id: 1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.trim();
    }

    /// Trims and rejects empty text; truncates overlong text to
    /// [`MAX_MESSAGE_LEN`]. Returns `false` if the message was rejected.
    pub fn push(&mut self, user_id: &str, name: &str, text: &str, timestamp_ms: u64) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let text = if trimmed.chars().count() > MAX_MESSAGE_LEN {
            trimmed.chars().take(MAX_MESSAGE_LEN).collect()
        } else {
            trimmed.to_string()
        };
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            user_id: user_id.to_string(),
            name: name.to_string(),
            text,
            timestamp_ms,
        });
        self.trim();
        true
    }

    fn trim(&mut self) {
        if self.messages.len() > self.capacity {
            let excess = self.messages.len() - self.capacity;
            self.messages.drain(0..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_messages() {
        let mut log = ChatLog::new(10);
        assert!(!log.push("u1", "A", "   ", 0));
        assert!(log.messages().is_empty());
    }

    #[test]
    fn caps_at_capacity() {
        let mut log = ChatLog::new(2);
        log.push("u1", "A", "one", 0);
        log.push("u1", "A", "two", 1);
        log.push("u1", "A", "three", 2);
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[0].text, "two");
    }

    #[test]
    fn truncates_long_messages() {
        let mut log = ChatLog::new(10);
        let long = "x".repeat(300);
        log.push("u1", "A", &long, 0);
        assert_eq!(log.messages()[0].text.chars().count(), MAX_MESSAGE_LEN);
    }
}
