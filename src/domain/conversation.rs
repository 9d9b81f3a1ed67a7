use super::Message;
use chrono::{DateTime, Utc};

/// Append-only message history. Insertion order is display and replay order.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn append(&mut self, message: Message) -> &Message {
        self.updated_at = Utc::now();
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Drops every message. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.messages.len();
        self.messages.clear();
        self.updated_at = Utc::now();
        removed
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
