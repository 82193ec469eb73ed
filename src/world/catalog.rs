//! Static world catalog: NPC and building records loaded once from
//! `config/world.toml`, with the San-AI-lika defaults compiled in.
use std::{fmt, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/world.toml";

const DEFAULT_WORLD_WIDTH: f32 = 2000.0;
const DEFAULT_WORLD_HEIGHT: f32 = 1500.0;
const DEFAULT_INTERACTION_RADIUS: f32 = 40.0;

/// Unique identifier for an NPC, dense in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct NpcId(u32);

impl NpcId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NPC-{:03}", self.0)
    }
}

/// Avatar palette carried for the presentation layer.
#[derive(Debug, Clone)]
pub struct CharacterStyle {
    pub hair: Color,
    pub shirt: Color,
    pub pants: Color,
    pub skin: Color,
}

/// One NPC in the world. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct NpcRecord {
    pub id: NpcId,
    pub slug: String,
    pub name: String,
    pub role: String,
    pub position: Vec2,
    pub interaction_radius: f32,
    pub persona: String,
    pub greeting: String,
    pub style: CharacterStyle,
}

/// Building flavour, used only for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Cafe,
    Shop,
    Cinema,
    House,
    Fountain,
}

/// One building footprint. Never part of movement collision.
#[derive(Debug, Clone)]
pub struct BuildingRecord {
    pub slug: String,
    pub name: String,
    /// Top-left corner in world coordinates.
    pub position: Vec2,
    pub dimensions: Vec2,
    pub color: Color,
    pub kind: BuildingKind,
    /// Door offset relative to the building's top-left corner.
    pub door_position: Option<Vec2>,
}

/// Player seed data from the catalog.
#[derive(Debug, Clone)]
pub struct PlayerSeed {
    pub name: String,
    pub start_position: Vec2,
    pub style: CharacterStyle,
}

/// Read-only registry of everything the world contains.
#[derive(Resource, Debug, Clone)]
pub struct WorldCatalog {
    pub bounds: Vec2,
    pub npcs: Vec<NpcRecord>,
    pub buildings: Vec<BuildingRecord>,
    pub player: PlayerSeed,
}

impl WorldCatalog {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawWorldConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawWorldConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawWorldConfig::default().into()
            }
        }
    }

    pub fn npc(&self, id: NpcId) -> Option<&NpcRecord> {
        self.npcs.get(id.index())
    }
}

impl Default for WorldCatalog {
    fn default() -> Self {
        RawWorldConfig::default().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawWorldConfig {
    world: RawWorldSection,
    player: RawPlayerSection,
    npcs: Vec<RawNpc>,
    buildings: Vec<RawBuilding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawWorldSection {
    width: f32,
    height: f32,
}

impl Default for RawWorldSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    name: String,
    start: [f32; 2],
    style: RawStyle,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            name: "Alex".to_string(),
            start: [700.0, 900.0],
            style: RawStyle {
                hair: "#8d5524".to_string(),
                shirt: "#3b82f6".to_string(),
                pants: "#1e293b".to_string(),
                skin: "#fed7aa".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawStyle {
    hair: String,
    shirt: String,
    pants: String,
    skin: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawNpc {
    slug: String,
    name: String,
    role: String,
    position: [f32; 2],
    #[serde(default = "default_interaction_radius")]
    interaction_radius: f32,
    persona: String,
    greeting: String,
    style: RawStyle,
}

fn default_interaction_radius() -> f32 {
    DEFAULT_INTERACTION_RADIUS
}

#[derive(Debug, Clone, Deserialize)]
struct RawBuilding {
    slug: String,
    name: String,
    position: [f32; 2],
    dimensions: [f32; 2],
    color: String,
    kind: BuildingKind,
    #[serde(default)]
    door_position: Option<[f32; 2]>,
}

impl Default for RawWorldConfig {
    fn default() -> Self {
        Self {
            world: RawWorldSection::default(),
            player: RawPlayerSection::default(),
            npcs: default_npcs(),
            buildings: default_buildings(),
        }
    }
}

fn default_npcs() -> Vec<RawNpc> {
    vec![
        RawNpc {
            slug: "barista".to_string(),
            name: "Melisa".to_string(),
            role: "Cafe Owner".to_string(),
            position: [550.0, 520.0],
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            persona: "You are Melisa, a cheerful barista in the virtual city of San-AI-lika. \
                      You love coffee and gossip. Keep your responses short, bubbly, and use \
                      emojis. You know everything about the town."
                .to_string(),
            greeting: "Hi there! Need a coffee to boost your energy?".to_string(),
            style: RawStyle {
                hair: "#facc15".to_string(),
                shirt: "#4ade80".to_string(),
                pants: "#334155".to_string(),
                skin: "#fed7aa".to_string(),
            },
        },
        RawNpc {
            slug: "artist".to_string(),
            name: "Can".to_string(),
            role: "Street Artist".to_string(),
            position: [900.0, 750.0],
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            persona: "You are Can, a cool, laid-back street artist. You use slang like 'dude', \
                      'vibes', and 'lit'. You are passionate about art and hate boring grey \
                      walls."
                .to_string(),
            greeting: "Yo! The vibe today is immaculate for some sketching.".to_string(),
            style: RawStyle {
                hair: "#000000".to_string(),
                shirt: "#ef4444".to_string(),
                pants: "#2563eb".to_string(),
                skin: "#fde68a".to_string(),
            },
        },
        RawNpc {
            slug: "guide".to_string(),
            name: "Professor Bit".to_string(),
            role: "City Guide".to_string(),
            position: [780.0, 550.0],
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            persona: "You are Professor Bit, an old wise AI researcher who knows he is in a \
                      simulation. You are helpful but slightly cryptic. You speak formally."
                .to_string(),
            greeting: "Greetings, traveler! I can answer any questions about this simulation."
                .to_string(),
            style: RawStyle {
                hair: "#e5e7eb".to_string(),
                shirt: "#4338ca".to_string(),
                pants: "#1f2937".to_string(),
                skin: "#fdba74".to_string(),
            },
        },
    ]
}

fn default_buildings() -> Vec<RawBuilding> {
    vec![
        RawBuilding {
            slug: "cafe".to_string(),
            name: "Starbean Cafe".to_string(),
            position: [400.0, 300.0],
            dimensions: [300.0, 200.0],
            color: "#fef3c7".to_string(),
            kind: BuildingKind::Cafe,
            door_position: Some([120.0, 180.0]),
        },
        RawBuilding {
            slug: "cinema".to_string(),
            name: "Galaxy Cinema".to_string(),
            position: [900.0, 250.0],
            dimensions: [350.0, 220.0],
            color: "#e9d5ff".to_string(),
            kind: BuildingKind::Cinema,
            door_position: Some([150.0, 200.0]),
        },
        RawBuilding {
            slug: "boutique".to_string(),
            name: "Fashionista".to_string(),
            position: [450.0, 700.0],
            dimensions: [250.0, 180.0],
            color: "#fce7f3".to_string(),
            kind: BuildingKind::Shop,
            door_position: Some([100.0, 160.0]),
        },
        RawBuilding {
            slug: "fountain".to_string(),
            name: "Central Fountain".to_string(),
            position: [800.0, 600.0],
            dimensions: [160.0, 120.0],
            color: "#dbeafe".to_string(),
            kind: BuildingKind::Fountain,
            door_position: None,
        },
    ]
}

impl From<RawWorldConfig> for WorldCatalog {
    fn from(value: RawWorldConfig) -> Self {
        let npcs = value
            .npcs
            .into_iter()
            .enumerate()
            .map(|(index, raw)| NpcRecord {
                id: NpcId::new(index as u32),
                slug: raw.slug,
                name: raw.name,
                role: raw.role,
                position: Vec2::from_array(raw.position),
                interaction_radius: raw.interaction_radius.max(1.0),
                persona: raw.persona,
                greeting: raw.greeting,
                style: (&raw.style).into(),
            })
            .collect();

        let buildings = value
            .buildings
            .into_iter()
            .map(|raw| BuildingRecord {
                slug: raw.slug,
                name: raw.name,
                position: Vec2::from_array(raw.position),
                dimensions: Vec2::from_array(raw.dimensions),
                color: parse_color(&raw.color),
                kind: raw.kind,
                door_position: raw.door_position.map(Vec2::from_array),
            })
            .collect();

        Self {
            bounds: Vec2::new(value.world.width.max(1.0), value.world.height.max(1.0)),
            npcs,
            buildings,
            player: PlayerSeed {
                name: value.player.name,
                start_position: Vec2::from_array(value.player.start),
                style: (&value.player.style).into(),
            },
        }
    }
}

impl From<&RawStyle> for CharacterStyle {
    fn from(value: &RawStyle) -> Self {
        Self {
            hair: parse_color(&value.hair),
            shirt: parse_color(&value.shirt),
            pants: parse_color(&value.pants),
            skin: parse_color(&value.skin),
        }
    }
}

/// Parses `#rrggbb` into a color, falling back to magenta on bad input so a
/// typo in the config is visible instead of invisible.
fn parse_color(hex: &str) -> Color {
    let trimmed = hex.trim().trim_start_matches('#');
    if trimmed.len() == 6 {
        let channels = (
            u8::from_str_radix(&trimmed[0..2], 16),
            u8::from_str_radix(&trimmed[2..4], 16),
            u8::from_str_radix(&trimmed[4..6], 16),
        );
        if let (Ok(r), Ok(g), Ok(b)) = channels {
            return Color::srgb_u8(r, g, b);
        }
    }
    warn!("Invalid color literal '{}' in world config", hex);
    Color::srgb_u8(255, 0, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_town_layout() {
        let catalog = WorldCatalog::default();
        assert_eq!(catalog.bounds, Vec2::new(2000.0, 1500.0));
        assert_eq!(catalog.npcs.len(), 3);
        assert_eq!(catalog.buildings.len(), 4);
        assert_eq!(catalog.player.start_position, Vec2::new(700.0, 900.0));

        // Registry order is config order; ids are dense.
        let names: Vec<&str> = catalog.npcs.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Melisa", "Can", "Professor Bit"]);
        for (index, npc) in catalog.npcs.iter().enumerate() {
            assert_eq!(npc.id, NpcId::new(index as u32));
        }
    }

    #[test]
    fn lookup_by_id_round_trips() {
        let catalog = WorldCatalog::default();
        let id = catalog.npcs[1].id;
        assert_eq!(catalog.npc(id).map(|n| n.slug.as_str()), Some("artist"));
        assert!(catalog.npc(NpcId::new(99)).is_none());
    }

    #[test]
    fn parses_config_with_custom_npc() {
        let raw: RawWorldConfig = toml::from_str(
            r##"
            [world]
            width = 800.0
            height = 600.0

            [[npcs]]
            slug = "mayor"
            name = "Greta"
            role = "Mayor"
            position = [100.0, 200.0]
            persona = "You are the mayor."
            greeting = "Welcome!"
            style = { hair = "#112233", shirt = "#445566", pants = "#778899", skin = "#aabbcc" }

            [[buildings]]
            slug = "hall"
            name = "Town Hall"
            position = [10.0, 10.0]
            dimensions = [50.0, 40.0]
            color = "#ffffff"
            kind = "house"
            "##,
        )
        .expect("valid toml");

        let catalog = WorldCatalog::from(raw);
        assert_eq!(catalog.bounds, Vec2::new(800.0, 600.0));
        assert_eq!(catalog.npcs.len(), 1);
        assert_eq!(catalog.npcs[0].interaction_radius, 40.0);
        assert_eq!(catalog.buildings[0].kind, BuildingKind::House);
        assert!(catalog.buildings[0].door_position.is_none());
    }

    #[test]
    fn bad_color_literal_falls_back_to_magenta() {
        assert_eq!(parse_color("nonsense"), Color::srgb_u8(255, 0, 255));
        assert_eq!(parse_color("#00ff00"), Color::srgb_u8(0, 255, 0));
    }
}
