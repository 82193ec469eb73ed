//! Player plugin wiring walk state and movement systems.
use bevy::prelude::*;

use crate::{
    player::{
        components::PlayerState,
        systems::{advance_player, spawn_player, sync_player_transform},
    },
    world::systems::spawn_world_environment,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerState>()
            .add_systems(Startup, spawn_player.after(spawn_world_environment))
            .add_systems(
                Update,
                (advance_player, sync_player_transform.after(advance_player)),
            );
    }
}
