//! Ephemeral speech bubbles shown above an actor for a fixed duration.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::SpeechBubblePlugin;
