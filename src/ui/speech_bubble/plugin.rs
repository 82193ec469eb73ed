//! Plugin registration for speech bubble systems.
use bevy::prelude::*;

use super::components::SpeechBubbleTracker;
use super::systems::{expire_speech_bubbles, spawn_player_bubbles};

pub struct SpeechBubblePlugin;

impl Plugin for SpeechBubblePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpeechBubbleTracker>().add_systems(
            Update,
            (
                spawn_player_bubbles,
                expire_speech_bubbles.after(spawn_player_bubbles),
            ),
        );

        info!("SpeechBubblePlugin registered");
    }
}
