//! Systems for the world module.
use bevy::prelude::*;

use crate::world::{
    catalog::{NpcRecord, WorldCatalog},
    components::{NpcAvatar, Scenery, WorldCamera},
};

const GROUND_COLOR: Color = Color::srgb_u8(134, 197, 160);
const LABEL_COLOR: Color = Color::srgb(0.15, 0.15, 0.2);
const LABEL_FONT_SIZE: f32 = 14.0;

pub const AVATAR_SIZE: Vec2 = Vec2::new(40.0, 70.0);
const LABEL_OFFSET_Y: f32 = AVATAR_SIZE.y / 2.0 + 14.0;

/// Depth scale turning the world y coordinate into a z layer so actors
/// further down the map draw in front.
const DEPTH_PER_UNIT: f32 = 0.0001;

/// Maps a world coordinate (y-down, origin top-left) to render space.
pub fn world_to_render(position: Vec2, z: f32) -> Vec3 {
    Vec3::new(position.x, -position.y, z)
}

/// Depth layer for an actor standing at `position`.
pub fn depth_for(position: Vec2) -> f32 {
    1.0 + position.y * DEPTH_PER_UNIT
}

/// Spawns the camera, ground, buildings, and NPC avatars from the catalog.
pub fn spawn_world_environment(mut commands: Commands, catalog: Res<WorldCatalog>) {
    commands.spawn((Camera2d, WorldCamera, Name::new("World Camera")));

    commands.spawn((
        Sprite::from_color(GROUND_COLOR, catalog.bounds),
        Transform::from_translation(world_to_render(catalog.bounds / 2.0, 0.0)),
        Name::new("Ground"),
    ));

    for building in &catalog.buildings {
        let center = building.position + building.dimensions / 2.0;
        commands
            .spawn((
                Sprite::from_color(building.color, building.dimensions),
                Transform::from_translation(world_to_render(center, 0.5)),
                Scenery,
                Name::new(building.name.clone()),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(building.name.clone()),
                    TextFont {
                        font_size: LABEL_FONT_SIZE,
                        ..default()
                    },
                    TextColor(LABEL_COLOR),
                    Transform::from_xyz(0.0, building.dimensions.y / 2.0 + 12.0, 0.1),
                ));
            });
    }

    for npc in &catalog.npcs {
        spawn_npc_avatar(&mut commands, npc);
    }

    info!(
        "World spawned: {} buildings, {} NPCs, bounds {}x{}",
        catalog.buildings.len(),
        catalog.npcs.len(),
        catalog.bounds.x,
        catalog.bounds.y
    );
}

fn spawn_npc_avatar(commands: &mut Commands, npc: &NpcRecord) {
    commands
        .spawn((
            Sprite::from_color(npc.style.shirt, AVATAR_SIZE),
            Transform::from_translation(world_to_render(npc.position, depth_for(npc.position))),
            NpcAvatar,
            npc.id,
            Name::new(format!("{} ({})", npc.name, npc.id)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(format!("{}\n{}", npc.name, npc.role)),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(LABEL_COLOR),
                Transform::from_xyz(0.0, LABEL_OFFSET_Y, 0.1),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mapping_flips_y_axis() {
        let mapped = world_to_render(Vec2::new(120.0, 80.0), 2.0);
        assert_eq!(mapped, Vec3::new(120.0, -80.0, 2.0));
    }

    #[test]
    fn deeper_world_rows_draw_in_front() {
        assert!(depth_for(Vec2::new(0.0, 900.0)) > depth_for(Vec2::new(0.0, 100.0)));
    }
}
