//! Mob type definitions.
//!
//! Provides a registry of known mob types with their stats and behavior
//! flags. The built-in table lives in `wildlands-content`; custom types from
//! content files are registered on top of it.

use serde::{Deserialize, Serialize};

/// Combat stats of a mob type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: u32,
    pub strength: u32,
    pub defense: u32,
    pub ranged: u32,
}

/// Behavior flags controlling aggro and pursuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobBehavior {
    /// Attacks players on sight, not only when provoked.
    #[serde(default)]
    pub aggressive: bool,
    /// Distance at which an aggressive mob notices a player.
    #[serde(default = "default_aggro_range")]
    pub aggro_range: f32,
    /// Distance beyond which a target is no longer tracked as seen.
    #[serde(default = "default_chase_range")]
    pub chase_range: f32,
    /// Skip players whose combat level exceeds `level_threshold`.
    #[serde(default)]
    pub ignore_low_level_players: bool,
    #[serde(default)]
    pub level_threshold: u32,
}

fn default_aggro_range() -> f32 {
    8.0
}

fn default_chase_range() -> f32 {
    20.0
}

impl Default for MobBehavior {
    fn default() -> Self {
        Self {
            aggressive: false,
            aggro_range: default_aggro_range(),
            chase_range: default_chase_range(),
            ignore_low_level_players: false,
            level_threshold: 0,
        }
    }
}

/// Definition of a mob type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobDefinition {
    /// Type identifier, e.g. `"goblin"`.
    pub type_id: String,
    /// Display name, e.g. `"Goblin"`.
    pub display_name: String,
    pub level: u32,
    pub max_health: u32,
    #[serde(default)]
    pub stats: CombatStats,
    #[serde(default)]
    pub behavior: MobBehavior,
    /// Movement speed in world units per second.
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    /// Default respawn delay; spawn descriptors may override it.
    #[serde(default = "default_respawn_delay")]
    pub respawn_delay_secs: f64,
    /// XP granted to the killer. Derived from level when absent.
    #[serde(default)]
    pub xp_reward: Option<u32>,
}

fn default_movement_speed() -> f32 {
    3.0
}

fn default_respawn_delay() -> f64 {
    30.0
}

impl MobDefinition {
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
            .unwrap_or(self.level * 10 + self.max_health / 4)
    }
}

/// Registry of supported mob types.
#[derive(Debug, Clone, Default)]
pub struct MobRegistry {
    mobs: Vec<MobDefinition>,
}

impl MobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a mob definition by its type identifier.
    pub fn get(&self, type_id: &str) -> Option<&MobDefinition> {
        self.mobs.iter().find(|m| m.type_id == type_id)
    }

    /// All known mob definitions.
    pub fn all(&self) -> &[MobDefinition] {
        &self.mobs
    }

    /// Register a mob type, replacing any existing type with the same id.
    pub fn register_mob(&mut self, def: MobDefinition) {
        match self.mobs.iter_mut().find(|m| m.type_id == def.type_id) {
            Some(existing) => *existing = def,
            None => self.mobs.push(def),
        }
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }
}
