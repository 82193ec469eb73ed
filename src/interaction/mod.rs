//! Interaction module: pointer clicks resolved into move or engage intents.

pub mod events;
pub mod plugin;
pub mod resolver;
pub mod systems;

pub use plugin::InteractionPlugin;
