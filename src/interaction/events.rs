//! Messages emitted by the input boundary.
use bevy::prelude::*;

/// A pointer click translated into world coordinates.
#[derive(Message, Debug, Clone, Copy)]
pub struct WorldClickEvent {
    pub point: Vec2,
}
