//! Shared conversation types exposed by the dialogue module.
use std::fmt;

use crate::world::catalog::NpcId;

/// Identifier assigned to chat messages. Monotonic per process, so it also
/// encodes insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MSG-{:05}", self.0)
    }
}

/// One line in a conversation transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: String,
    pub text: String,
    pub is_player: bool,
    /// Seconds since startup. Strictly increasing within one history.
    pub timestamp: f64,
}

/// Per-NPC transcript plus the reply-in-flight flag.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
    /// True from the moment a player message is appended until the reply
    /// (or its fallback) lands.
    pub typing: bool,
}

/// Everything the reply generator needs for one exchange.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    pub npc: NpcId,
    pub npc_name: String,
    pub persona: String,
    /// Bounded window of recent transcript lines, newest last, already
    /// including the player message that triggered the exchange.
    pub history: Vec<ChatMessage>,
    pub user_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_order_by_value() {
        assert!(MessageId::new(2) > MessageId::new(1));
        assert_eq!(MessageId::new(7).to_string(), "MSG-00007");
    }
}
