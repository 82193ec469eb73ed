//! Conversation panel: transcript display, typing indicator, and the
//! keyboard input line for the engaged NPC.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ChatPanelPlugin;
