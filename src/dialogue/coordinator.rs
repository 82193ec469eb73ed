//! Conversation coordinator: per-NPC transcripts, typing state, and the
//! exchange lifecycle. Pure state transforms, headless-testable.
use std::collections::HashMap;

use bevy::prelude::*;

use crate::world::catalog::{NpcId, NpcRecord};

use super::{
    errors::ReplyError,
    types::{ChatMessage, Conversation, MessageId, ReplyRequest},
};

/// Minimum spacing between consecutive timestamps in one history, so
/// ordering stays strict even when two appends land in the same frame.
const TIMESTAMP_EPSILON: f64 = 1e-6;

/// The NPC whose conversation panel is open, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveConversation(pub Option<NpcId>);

/// All conversation state, keyed by NPC id. Conversations are created
/// lazily on first engagement and never evicted.
#[derive(Resource, Debug, Default)]
pub struct ConversationLog {
    conversations: HashMap<NpcId, Conversation>,
    next_message_id: u64,
}

impl ConversationLog {
    /// Transcript for an NPC; empty if the player never engaged it.
    pub fn history(&self, npc: NpcId) -> &[ChatMessage] {
        self.conversations
            .get(&npc)
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a reply request is in flight for this NPC.
    pub fn is_typing(&self, npc: NpcId) -> bool {
        self.conversations.get(&npc).is_some_and(|c| c.typing)
    }

    /// Opens a conversation, seeding the greeting on first contact.
    pub fn engage(&mut self, npc: &NpcRecord, now: f64) {
        if self.history(npc.id).is_empty() {
            self.append(npc.id, npc.name.clone(), npc.greeting.clone(), false, now);
        }
    }

    /// Starts an exchange: appends the player message, raises the typing
    /// flag, and returns the request to hand to the reply generator.
    ///
    /// Returns `None` (no state change) when the text is blank after
    /// trimming or when a request for this NPC is already in flight.
    pub fn begin_exchange(
        &mut self,
        npc: &NpcRecord,
        player_name: &str,
        text: &str,
        now: f64,
        history_window: usize,
    ) -> Option<ReplyRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.is_typing(npc.id) {
            debug!("Ignoring overlapping send for {}; reply in flight", npc.id);
            return None;
        }

        self.append(npc.id, player_name.to_string(), text.to_string(), true, now);

        let conversation = self
            .conversations
            .get_mut(&npc.id)
            .expect("conversation exists after append");
        conversation.typing = true;

        let messages = &conversation.messages;
        let window_start = messages.len().saturating_sub(history_window);
        Some(ReplyRequest {
            npc: npc.id,
            npc_name: npc.name.clone(),
            persona: npc.persona.clone(),
            history: messages[window_start..].to_vec(),
            user_message: text.to_string(),
        })
    }

    /// Finishes an exchange: appends the reply text, or the error's fixed
    /// fallback line, then clears the typing flag. The append always
    /// happens before the flag clears.
    pub fn complete_exchange(
        &mut self,
        npc: NpcId,
        npc_name: &str,
        outcome: Result<String, ReplyError>,
        now: f64,
    ) {
        let text = match outcome {
            Ok(text) => text,
            Err(err) => {
                warn!("Reply for {} failed ({}); using fallback line", npc, err);
                err.fallback_line().to_string()
            }
        };

        self.append(npc, npc_name.to_string(), text, false, now);
        if let Some(conversation) = self.conversations.get_mut(&npc) {
            conversation.typing = false;
        }
    }

    fn append(&mut self, npc: NpcId, sender: String, text: String, is_player: bool, now: f64) {
        let conversation = self.conversations.entry(npc).or_default();

        let timestamp = match conversation.messages.last() {
            Some(last) if now <= last.timestamp => last.timestamp + TIMESTAMP_EPSILON,
            _ => now,
        };

        let id = MessageId::new(self.next_message_id);
        self.next_message_id += 1;

        conversation.messages.push(ChatMessage {
            id,
            sender,
            text,
            is_player,
            timestamp,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::catalog::CharacterStyle;

    fn npc(id: u32) -> NpcRecord {
        NpcRecord {
            id: NpcId::new(id),
            slug: format!("npc-{id}"),
            name: format!("Npc {id}"),
            role: "Test".to_string(),
            position: Vec2::ZERO,
            interaction_radius: 40.0,
            persona: "Test persona".to_string(),
            greeting: "Hello there!".to_string(),
            style: CharacterStyle {
                hair: Color::WHITE,
                shirt: Color::WHITE,
                pants: Color::WHITE,
                skin: Color::WHITE,
            },
        }
    }

    #[test]
    fn engage_seeds_greeting_once() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);

        log.engage(&melisa, 1.0);
        log.engage(&melisa, 2.0);

        let history = log.history(melisa.id);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "Hello there!");
        assert!(!history[0].is_player);
    }

    #[test]
    fn blank_text_changes_nothing() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        log.engage(&melisa, 1.0);

        assert!(log.begin_exchange(&melisa, "Alex", "", 2.0, 6).is_none());
        assert!(log.begin_exchange(&melisa, "Alex", "   ", 2.0, 6).is_none());
        assert_eq!(log.history(melisa.id).len(), 1);
        assert!(!log.is_typing(melisa.id));
    }

    #[test]
    fn exchange_appends_player_message_before_reply_resolves() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        log.engage(&melisa, 1.0);

        let request = log
            .begin_exchange(&melisa, "Alex", "hello", 2.0, 6)
            .expect("exchange starts");
        assert_eq!(log.history(melisa.id).len(), 2);
        assert!(log.is_typing(melisa.id));
        assert_eq!(request.user_message, "hello");
        assert_eq!(request.history.len(), 2);

        log.complete_exchange(melisa.id, &melisa.name, Ok("Hi Alex!".to_string()), 3.0);
        let history = log.history(melisa.id);
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].text, "Hi Alex!");
        assert!(!log.is_typing(melisa.id));
    }

    #[test]
    fn failed_exchange_appends_exactly_one_fallback_line() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        log.engage(&melisa, 1.0);
        log.begin_exchange(&melisa, "Alex", "hello", 2.0, 6);

        log.complete_exchange(
            melisa.id,
            &melisa.name,
            Err(ReplyError::transport("connection reset")),
            3.0,
        );

        let history = log.history(melisa.id);
        assert_eq!(history.len(), 3);
        assert_eq!(
            history[2].text,
            crate::dialogue::errors::SERVICE_FAILURE_LINE
        );
        assert!(!log.is_typing(melisa.id));
    }

    #[test]
    fn overlapping_sends_are_ignored_while_typing() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        log.engage(&melisa, 1.0);

        assert!(log
            .begin_exchange(&melisa, "Alex", "first", 2.0, 6)
            .is_some());
        assert!(log
            .begin_exchange(&melisa, "Alex", "second", 2.5, 6)
            .is_none());
        assert_eq!(log.history(melisa.id).len(), 2);
    }

    #[test]
    fn npcs_have_independent_typing_state() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        let can = npc(1);
        log.engage(&melisa, 1.0);
        log.engage(&can, 1.0);

        log.begin_exchange(&melisa, "Alex", "hi melisa", 2.0, 6);
        assert!(log.is_typing(melisa.id));
        assert!(!log.is_typing(can.id));

        let request = log
            .begin_exchange(&can, "Alex", "hi can", 2.0, 6)
            .expect("second NPC accepts sends independently");
        assert_eq!(request.npc, can.id);
        assert!(log.is_typing(can.id));
    }

    #[test]
    fn history_window_is_bounded() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);
        log.engage(&melisa, 0.0);

        for i in 0..5 {
            log.begin_exchange(&melisa, "Alex", &format!("msg {i}"), i as f64 + 1.0, 6);
            log.complete_exchange(melisa.id, &melisa.name, Ok(format!("re {i}")), i as f64 + 1.5);
        }

        let request = log
            .begin_exchange(&melisa, "Alex", "latest", 10.0, 6)
            .expect("exchange starts");
        assert_eq!(request.history.len(), 6);
        assert_eq!(request.history.last().unwrap().text, "latest");
    }

    #[test]
    fn timestamps_strictly_increase_even_within_one_frame() {
        let mut log = ConversationLog::default();
        let melisa = npc(0);

        log.engage(&melisa, 5.0);
        log.begin_exchange(&melisa, "Alex", "hello", 5.0, 6);
        log.complete_exchange(melisa.id, &melisa.name, Ok("hi".to_string()), 5.0);

        let history = log.history(melisa.id);
        assert_eq!(history.len(), 3);
        for pair in history.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
            assert!(pair[1].id > pair[0].id);
        }
    }
}
