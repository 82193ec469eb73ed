//! Camera offset derivation: viewport centered on the player, clamped to
//! world bounds.
use bevy::{prelude::*, window::PrimaryWindow};

use crate::player::components::PlayerState;
use crate::world::{catalog::WorldCatalog, components::WorldCamera, systems::world_to_render};

/// Current viewport offset in world coordinates (top-left corner).
#[derive(Resource, Debug, Default)]
pub struct CameraState {
    pub offset: Vec2,
}

/// Centers the viewport on `player` and clamps each axis to
/// `[0, world - viewport]`. A world smaller than the viewport saturates the
/// clamp to 0 instead of producing an inverted range.
pub fn compute_offset(player: Vec2, viewport: Vec2, world: Vec2) -> Vec2 {
    let desired = player - viewport / 2.0;
    let max = (world - viewport).max(Vec2::ZERO);
    desired.clamp(Vec2::ZERO, max)
}

/// Recomputes the camera offset from the player position each frame.
pub fn follow_player(
    player: Res<PlayerState>,
    catalog: Res<WorldCatalog>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<CameraState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = Vec2::new(window.resolution.width(), window.resolution.height());
    camera.offset = compute_offset(player.position, viewport, catalog.bounds);
}

/// Moves the render camera so the viewport's top-left corner sits at the
/// computed world offset.
pub fn sync_camera_transform(
    camera: Res<CameraState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<&mut Transform, With<WorldCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    let viewport = Vec2::new(window.resolution.width(), window.resolution.height());
    let center = camera.offset + viewport / 2.0;
    transform.translation = world_to_render(center, transform.translation.z);
}
