//! Player module: walk state and the fixed-step movement simulator.

pub mod components;
pub mod movement;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
