//! Systems advancing and presenting the player avatar.
use bevy::prelude::*;

use crate::{
    core::{plugin::TickClock, settings::GameTuning},
    player::{
        components::{Facing, Player, PlayerState},
        movement::step_toward,
    },
    world::{
        catalog::WorldCatalog,
        systems::{depth_for, world_to_render, AVATAR_SIZE},
    },
};

const NAME_LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.3);
const NAME_LABEL_FONT_SIZE: f32 = 14.0;

/// Seeds the player state from the catalog and spawns the avatar entity.
pub fn spawn_player(
    mut commands: Commands,
    catalog: Res<WorldCatalog>,
    mut state: ResMut<PlayerState>,
) {
    let seed = &catalog.player;
    *state = PlayerState::new(seed.name.clone(), seed.start_position);

    commands
        .spawn((
            Sprite::from_color(seed.style.shirt, AVATAR_SIZE),
            Transform::from_translation(world_to_render(
                seed.start_position,
                depth_for(seed.start_position),
            )),
            Player,
            Name::new(format!("Player ({})", seed.name)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(seed.name.clone()),
                TextFont {
                    font_size: NAME_LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(NAME_LABEL_COLOR),
                Transform::from_xyz(0.0, AVATAR_SIZE.y / 2.0 + 14.0, 0.1),
            ));
        });

    info!(
        "Player '{}' starts at ({}, {})",
        seed.name, seed.start_position.x, seed.start_position.y
    );
}

/// Advances the player toward the current target, one movement step per
/// pending logical tick. The only consumer of the tick clock.
pub fn advance_player(
    mut clock: ResMut<TickClock>,
    tuning: Res<GameTuning>,
    mut state: ResMut<PlayerState>,
) {
    let pending = clock.take_pending();
    if pending == 0 {
        return;
    }

    let speed = tuning.movement.step_per_tick;
    for _ in 0..pending {
        let Some(target) = state.target else {
            break;
        };

        let step = step_toward(state.position, target, speed);
        state.position = step.position;
        if let Some(facing) = step.facing {
            state.facing = facing;
        }
        if step.arrived {
            state.target = None;
            debug!("Player arrived at ({}, {})", target.x, target.y);
        }
    }
}

/// Mirrors the walk state onto the avatar transform, flipping the sprite to
/// match facing.
pub fn sync_player_transform(
    state: Res<PlayerState>,
    mut query: Query<(&mut Transform, &mut Sprite), With<Player>>,
) {
    let Ok((mut transform, mut sprite)) = query.single_mut() else {
        return;
    };
    transform.translation = world_to_render(state.position, depth_for(state.position));
    sprite.flip_x = state.facing == Facing::Left;
}
