//! Components used by the world module.
use bevy::prelude::*;

/// Marker component for the primary 2D camera following the player.
#[derive(Component, Default)]
pub struct WorldCamera;

/// Marker component for building sprites.
#[derive(Component, Default)]
pub struct Scenery;

/// Marker component attached to NPC avatar entities. The record lives in the
/// [`WorldCatalog`](crate::world::catalog::WorldCatalog); the avatar only
/// carries its id.
#[derive(Component, Debug)]
pub struct NpcAvatar;
