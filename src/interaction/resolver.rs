//! Click resolution: a world coordinate becomes a movement target or an
//! NPC engagement.
use bevy::prelude::*;

use crate::core::settings::InteractionTuning;
use crate::world::catalog::{NpcId, NpcRecord};

/// What a pointer click means for the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickIntent {
    /// Walk toward the NPC's stand-point and open its conversation panel
    /// immediately.
    EngageNpc { npc: NpcId, stand_point: Vec2 },
    /// Walk to the clicked point.
    MoveTo(Vec2),
}

/// Resolves a click against the NPC registry.
///
/// NPCs are scanned in registry order and the first record whose
/// `interaction_radius` contains the click wins; overlapping radii are
/// tie-broken by catalog order, not by distance.
pub fn resolve_click(
    point: Vec2,
    npcs: &[NpcRecord],
    player_position: Vec2,
    tuning: &InteractionTuning,
) -> ClickIntent {
    for npc in npcs {
        if point.distance(npc.position) < npc.interaction_radius {
            return ClickIntent::EngageNpc {
                npc: npc.id,
                stand_point: stand_point(npc.position, player_position, tuning),
            };
        }
    }

    ClickIntent::MoveTo(point)
}

/// A spot slightly in front of the NPC: horizontally offset toward the
/// approaching player, vertically offset below.
fn stand_point(npc_position: Vec2, player_position: Vec2, tuning: &InteractionTuning) -> Vec2 {
    let dx = npc_position.x - player_position.x;
    let side = if dx > 0.0 {
        -tuning.stand_off
    } else {
        tuning.stand_off
    };
    Vec2::new(npc_position.x + side, npc_position.y + tuning.stand_below)
}
