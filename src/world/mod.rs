//! World module: static geometry catalog, camera follow, and scene spawning.

pub mod camera;
pub mod catalog;
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
