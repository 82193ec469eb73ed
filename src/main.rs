use std::path::Path;

use bevy::prelude::*;

mod core;
mod dialogue;
mod interaction;
mod player;
mod ui;
mod world;

use crate::{
    core::CorePlugin, dialogue::DialoguePlugin, interaction::InteractionPlugin,
    player::PlayerPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    load_secrets_env();

    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            WorldPlugin,
            PlayerPlugin,
            InteractionPlugin,
            DialoguePlugin,
            UiPlugin, // After DialoguePlugin; panels read its resources
        ))
        .run();
}

fn load_secrets_env() {
    const SECRETS_FILE: &str = "secrets.env";

    let path = Path::new(SECRETS_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", SECRETS_FILE, err);
    }
}
