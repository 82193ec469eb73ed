//! Systems spawning and expiring speech bubbles above the player avatar.
use bevy::{ecs::message::MessageReader, prelude::*, text::TextBounds};

use crate::{
    core::settings::GameTuning,
    dialogue::events::PlayerSpokeEvent,
    player::components::Player,
    world::systems::AVATAR_SIZE,
};

use super::components::{SpeechBubble, SpeechBubbleTracker};

const BUBBLE_TEXT_COLOR: Color = Color::srgb(0.05, 0.05, 0.1);
const BUBBLE_FONT_SIZE: f32 = 13.0;
const BUBBLE_MAX_WIDTH: f32 = 220.0;
const BUBBLE_FADE_SECONDS: f32 = 0.5;

/// Spawns a bubble above the player when they speak. A second message
/// while a bubble is live replaces its text and restarts its timer, so
/// only one expiry ever fires per actor.
pub fn spawn_player_bubbles(
    mut commands: Commands,
    mut tracker: ResMut<SpeechBubbleTracker>,
    tuning: Res<GameTuning>,
    mut events: MessageReader<PlayerSpokeEvent>,
    player: Query<Entity, With<Player>>,
) {
    for event in events.read() {
        let Ok(speaker) = player.single() else {
            continue;
        };
        let lifetime = tuning.bubble.lifetime_seconds;

        if let Some(&bubble) = tracker.by_actor.get(&speaker) {
            commands
                .entity(bubble)
                .insert(SpeechBubble::new(speaker, lifetime))
                .insert(Text2d::new(event.text.clone()));
            continue;
        }

        let bubble = commands
            .spawn((
                SpeechBubble::new(speaker, lifetime),
                Text2d::new(event.text.clone()),
                TextFont {
                    font_size: BUBBLE_FONT_SIZE,
                    ..default()
                },
                TextColor(BUBBLE_TEXT_COLOR),
                TextLayout::new_with_justify(Justify::Center),
                TextBounds::new_horizontal(BUBBLE_MAX_WIDTH),
                // Child of the avatar, so it follows the walk for free.
                Transform::from_xyz(0.0, AVATAR_SIZE.y / 2.0 + 34.0, 0.2),
            ))
            .id();

        commands.entity(speaker).add_child(bubble);
        tracker.by_actor.insert(speaker, bubble);
    }
}

/// Ticks bubble lifetimes, fades them out, and despawns the expired ones.
pub fn expire_speech_bubbles(
    mut commands: Commands,
    time: Res<Time>,
    mut tracker: ResMut<SpeechBubbleTracker>,
    mut bubbles: Query<(Entity, &mut SpeechBubble, &mut TextColor)>,
) {
    for (entity, mut bubble, mut color) in bubbles.iter_mut() {
        bubble.tick(time.delta());

        if bubble.is_finished() {
            tracker.by_actor.remove(&bubble.speaker());
            commands.entity(entity).despawn();
            continue;
        }

        color.0 = BUBBLE_TEXT_COLOR.with_alpha(bubble.fade_alpha(BUBBLE_FADE_SECONDS));
    }
}
