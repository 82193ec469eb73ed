//! Core module hosting the fixed-step tick clock and global tuning.

pub mod plugin;
pub mod settings;

pub use plugin::CorePlugin;
