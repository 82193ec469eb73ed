//! Components and resources for speech bubbles.
use std::collections::HashMap;

use bevy::prelude::*;

/// A bubble hovering above a speaking actor. Despawns when the lifetime
/// timer expires; replacing the bubble resets the timer.
#[derive(Component, Debug)]
pub struct SpeechBubble {
    /// The avatar entity this bubble hangs above.
    speaker_entity: Entity,
    lifetime: Timer,
}

impl SpeechBubble {
    pub fn new(speaker_entity: Entity, lifetime_secs: f32) -> Self {
        Self {
            speaker_entity,
            lifetime: Timer::from_seconds(lifetime_secs, TimerMode::Once),
        }
    }

    pub fn speaker(&self) -> Entity {
        self.speaker_entity
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.lifetime.tick(delta);
    }

    pub fn is_finished(&self) -> bool {
        self.lifetime.is_finished()
    }

    /// Alpha for the fade during the final `fade_duration` seconds.
    pub fn fade_alpha(&self, fade_duration: f32) -> f32 {
        let remaining = self.lifetime.remaining_secs();
        if remaining < fade_duration {
            remaining / fade_duration
        } else {
            1.0
        }
    }
}

/// Tracks the live bubble per actor, so each actor shows at most one.
#[derive(Resource, Debug, Default)]
pub struct SpeechBubbleTracker {
    pub by_actor: HashMap<Entity, Entity>,
}
