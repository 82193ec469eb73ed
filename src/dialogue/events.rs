//! Messages flowing between the interaction, dialogue, and UI layers.
use bevy::prelude::*;

use crate::world::catalog::NpcId;

/// Fired when a click engages an NPC; opens its conversation panel.
#[derive(Message, Debug, Clone, Copy)]
pub struct NpcEngagedEvent {
    pub npc: NpcId,
}

/// Fired when the conversation panel should close. History is retained.
#[derive(Message, Debug, Clone, Copy)]
pub struct ChatClosedEvent;

/// Chat text submitted for the active NPC (input boundary contract).
#[derive(Message, Debug, Clone)]
pub struct ChatSubmitEvent {
    pub text: String,
}

/// Fired after a player message is appended; drives the speech bubble.
#[derive(Message, Debug, Clone)]
pub struct PlayerSpokeEvent {
    pub text: String,
}

/// Fired when a reply (or its fallback) lands in an NPC history.
#[derive(Message, Debug, Clone, Copy)]
pub struct ReplyArrivedEvent {
    pub npc: NpcId,
}
