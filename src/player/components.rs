//! Components and resources for the player.
use bevy::prelude::*;

/// Marker component identifying the player avatar entity.
#[derive(Component, Debug)]
pub struct Player;

/// Horizontal facing of the avatar. Retained while standing still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Authoritative walk state for the player. Written by the interaction
/// resolver (target) and the movement simulator (position); rendering only
/// reads it.
#[derive(Resource, Debug)]
pub struct PlayerState {
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub facing: Facing,
    pub name: String,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            position,
            target: None,
            facing: Facing::default(),
            name: name.into(),
        }
    }

    /// The avatar is moving exactly while a target is set.
    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new("Alex", Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_iff_target_set() {
        let mut state = PlayerState::new("Test", Vec2::ZERO);
        assert!(!state.is_moving());
        state.set_target(Vec2::new(10.0, 10.0));
        assert!(state.is_moving());
        state.target = None;
        assert!(!state.is_moving());
    }
}
