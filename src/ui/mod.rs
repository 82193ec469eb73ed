//! UI module: the conversation panel and ephemeral speech bubbles.

pub mod chat_panel;
pub mod speech_bubble;

use bevy::prelude::*;

use chat_panel::ChatPanelPlugin;
use speech_bubble::SpeechBubblePlugin;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((ChatPanelPlugin, SpeechBubblePlugin));
    }
}
