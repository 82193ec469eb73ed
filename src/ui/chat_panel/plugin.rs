//! Plugin registration for the conversation panel.
use bevy::prelude::*;

use crate::dialogue::events::{PlayerSpokeEvent, ReplyArrivedEvent};

use super::components::{ChatInputBuffer, ChatPanelSettings, ChatPanelTracker};
use super::systems::{capture_chat_input, refresh_chat_panel};

pub struct ChatPanelPlugin;

impl Plugin for ChatPanelPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ChatPanelSettings::default())
            .init_resource::<ChatPanelTracker>()
            .init_resource::<ChatInputBuffer>()
            .add_message::<PlayerSpokeEvent>()
            .add_message::<ReplyArrivedEvent>()
            .add_systems(
                Update,
                (
                    capture_chat_input,
                    refresh_chat_panel.after(capture_chat_input),
                ),
            );

        info!("ChatPanelPlugin registered");
    }
}
