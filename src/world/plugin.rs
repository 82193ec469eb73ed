//! WorldPlugin coordinates the static catalog, scene spawning, and the
//! clamped follow camera.
use bevy::prelude::*;

use crate::world::{
    camera::{follow_player, sync_camera_transform, CameraState},
    catalog::WorldCatalog,
    systems::spawn_world_environment,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let catalog = WorldCatalog::load_or_default();
        info!(
            "World catalog loaded: {} NPCs, {} buildings",
            catalog.npcs.len(),
            catalog.buildings.len()
        );

        app.insert_resource(catalog)
            .init_resource::<CameraState>()
            .add_systems(Startup, spawn_world_environment)
            .add_systems(
                Update,
                (follow_player, sync_camera_transform.after(follow_player)),
            );
    }
}
