//! Dialogue module hosting the conversation coordinator, reply broker
//! abstractions, and the background reply channel.

pub mod broker;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod systems;
pub mod types;

pub use plugin::DialoguePlugin;
