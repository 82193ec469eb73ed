//! Components and resources for the conversation panel.
use bevy::prelude::*;

/// Marker for the panel root node, so rebuilds can find and replace it.
#[derive(Component, Debug)]
pub struct ChatPanelRoot;

/// The live panel entity, if the panel is open.
#[derive(Resource, Debug, Default)]
pub struct ChatPanelTracker {
    pub root: Option<Entity>,
}

/// Text the player has typed but not yet submitted.
#[derive(Resource, Debug, Default)]
pub struct ChatInputBuffer {
    pub text: String,
}

/// Layout settings for the conversation panel.
#[derive(Resource, Debug)]
pub struct ChatPanelSettings {
    /// Panel width (pixels).
    pub panel_width: f32,

    /// Offset from bottom edge of screen (pixels).
    pub bottom_offset: f32,

    /// Padding inside panel (pixels).
    pub padding: f32,

    /// Border width (pixels).
    pub border_width: f32,

    /// Most recent transcript lines shown at once.
    pub max_visible_lines: usize,

    /// Font size for the NPC header (points).
    pub name_font_size: f32,

    /// Font size for transcript and input text (points).
    pub text_font_size: f32,
}

impl Default for ChatPanelSettings {
    fn default() -> Self {
        Self {
            panel_width: 420.0,
            bottom_offset: 16.0,
            padding: 12.0,
            border_width: 2.0,
            max_visible_lines: 8,
            name_font_size: 18.0,
            text_font_size: 15.0,
        }
    }
}
