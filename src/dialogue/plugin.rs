//! Dialogue plugin wiring conversation state, the reply broker, and the
//! background reply channel.
use std::sync::Arc;

use bevy::prelude::*;

use super::{
    broker::{ActiveReplyBroker, GeminiReplyBroker},
    coordinator::{ActiveConversation, ConversationLog},
    events::{
        ChatClosedEvent, ChatSubmitEvent, NpcEngagedEvent, PlayerSpokeEvent, ReplyArrivedEvent,
    },
    systems::{
        handle_chat_closed, handle_chat_submit, handle_npc_engaged, poll_reply_outcomes,
        ReplyChannel,
    },
};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConversationLog>()
            .init_resource::<ActiveConversation>()
            .init_resource::<ReplyChannel>()
            .insert_resource(ActiveReplyBroker::new(Arc::new(GeminiReplyBroker::new())))
            .add_message::<NpcEngagedEvent>()
            .add_message::<ChatClosedEvent>()
            .add_message::<ChatSubmitEvent>()
            .add_message::<PlayerSpokeEvent>()
            .add_message::<ReplyArrivedEvent>()
            .add_systems(Startup, log_reply_provider)
            .add_systems(
                Update,
                (
                    handle_npc_engaged,
                    handle_chat_closed.after(handle_npc_engaged),
                    handle_chat_submit.after(handle_chat_closed),
                    poll_reply_outcomes.after(handle_chat_submit),
                ),
            );
    }
}

fn log_reply_provider(broker: Res<ActiveReplyBroker>) {
    info!(
        "DialoguePlugin initialised with provider: {}",
        broker.provider_label()
    );
}
