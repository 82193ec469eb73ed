//! Interaction plugin wiring the click pipeline.
use bevy::prelude::*;

use crate::interaction::{
    events::WorldClickEvent,
    systems::{apply_click_intents, emit_world_clicks},
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WorldClickEvent>().add_systems(
            Update,
            (emit_world_clicks, apply_click_intents.after(emit_world_clicks)),
        );
    }
}
