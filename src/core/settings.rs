//! Game tuning loaded from `config/game.toml`, with compiled-in defaults.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/game.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    simulation: RawSimulationSection,
    #[serde(default)]
    movement: RawMovementSection,
    #[serde(default)]
    interaction: RawInteractionSection,
    #[serde(default)]
    chat: RawChatSection,
    #[serde(default)]
    bubble: RawBubbleSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSimulationSection {
    tick_hz: f32,
}

impl Default for RawSimulationSection {
    fn default() -> Self {
        Self { tick_hz: 60.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMovementSection {
    step_per_tick: f32,
}

impl Default for RawMovementSection {
    fn default() -> Self {
        Self { step_per_tick: 6.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractionSection {
    stand_off: f32,
    stand_below: f32,
}

impl Default for RawInteractionSection {
    fn default() -> Self {
        Self {
            stand_off: 50.0,
            stand_below: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawChatSection {
    history_window: usize,
}

impl Default for RawChatSection {
    fn default() -> Self {
        Self { history_window: 6 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawBubbleSection {
    lifetime_seconds: f32,
}

impl Default for RawBubbleSection {
    fn default() -> Self {
        Self {
            lifetime_seconds: 4.0,
        }
    }
}

/// Simulation timing parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimulationTuning {
    pub tick_hz: f32,
}

/// Player movement parameters.
#[derive(Debug, Clone, Copy)]
pub struct MovementTuning {
    /// World units travelled per logical tick.
    pub step_per_tick: f32,
}

/// Click-to-engage parameters.
#[derive(Debug, Clone, Copy)]
pub struct InteractionTuning {
    /// Horizontal stand-off from an engaged NPC, away from the player.
    pub stand_off: f32,
    /// Vertical stand-off below an engaged NPC.
    pub stand_below: f32,
}

/// Conversation parameters.
#[derive(Debug, Clone, Copy)]
pub struct ChatTuning {
    /// Most recent messages forwarded to the reply generator.
    pub history_window: usize,
}

/// Speech bubble parameters.
#[derive(Debug, Clone, Copy)]
pub struct BubbleTuning {
    pub lifetime_seconds: f32,
}

/// Tunable parameters for the whole simulation, loaded once at startup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GameTuning {
    pub simulation: SimulationTuning,
    pub movement: MovementTuning,
    pub interaction: InteractionTuning,
    pub chat: ChatTuning,
    pub bubble: BubbleTuning,
}

impl GameTuning {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawGameConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawGameConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawGameConfig::default().into()
            }
        }
    }
}

impl Default for GameTuning {
    fn default() -> Self {
        RawGameConfig::default().into()
    }
}

impl From<RawGameConfig> for GameTuning {
    fn from(value: RawGameConfig) -> Self {
        Self {
            simulation: SimulationTuning {
                tick_hz: value.simulation.tick_hz.max(1.0),
            },
            movement: MovementTuning {
                step_per_tick: value.movement.step_per_tick.max(0.1),
            },
            interaction: InteractionTuning {
                stand_off: value.interaction.stand_off,
                stand_below: value.interaction.stand_below,
            },
            chat: ChatTuning {
                history_window: value.chat.history_window.max(1),
            },
            bubble: BubbleTuning {
                lifetime_seconds: value.bubble.lifetime_seconds.max(0.1),
            },
        }
    }
}
