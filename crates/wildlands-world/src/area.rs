//! World area definitions: named regions with their content descriptors.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::geometry::{Bounds, Vec2};

/// Identifier of a world area (and of the chunk generated from it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub String);

impl AreaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AreaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-hostile character placed in an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcDescriptor {
    pub id: String,
    pub name: String,
    /// Free-form role tag, e.g. `"banker"` or `"shopkeeper"`.
    #[serde(default)]
    pub role: String,
    pub position: Vec2,
}

/// A harvestable resource node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: String,
    /// Resource kind, e.g. `"oak_tree"` or `"copper_rock"`.
    pub kind: String,
    pub position: Vec2,
    /// Seconds until a harvested node becomes available again.
    #[serde(default = "default_resource_respawn")]
    pub respawn_secs: f64,
}

fn default_resource_respawn() -> f64 {
    30.0
}

/// A mob spawn point as authored in area data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobSpawnDescriptor {
    /// Mob type id, resolved against the mob registry at generation time.
    pub mob_type: String,
    pub position: Vec2,
    pub spawn_radius: f32,
    pub max_count: u32,
    /// Overrides the mob type's default respawn delay when set.
    #[serde(default)]
    pub respawn_delay_secs: Option<f64>,
}

/// Immutable definition of one named region of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldArea {
    pub id: AreaId,
    pub name: String,
    /// 0 = safe, 1..=3 = combat zones of increasing danger.
    pub difficulty: u8,
    pub bounds: Bounds,
    pub biome: Biome,
    #[serde(default)]
    pub npcs: Vec<NpcDescriptor>,
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
    #[serde(default)]
    pub mob_spawns: Vec<MobSpawnDescriptor>,
    #[serde(default)]
    pub connections: Vec<AreaId>,
}

impl WorldArea {
    pub fn is_safe(&self) -> bool {
        self.difficulty == 0
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_area_json_defaults() {
        let json = r#"{
            "id": "meadow",
            "name": "Quiet Meadow",
            "difficulty": 1,
            "bounds": { "min_x": 0, "min_z": 0, "max_x": 100, "max_z": 100 },
            "biome": "plains",
            "mob_spawns": [
                { "mob_type": "giant_rat", "position": { "x": 50, "z": 50 },
                  "spawn_radius": 8, "max_count": 3 }
            ],
            "resources": [
                { "id": "meadow-oak-1", "kind": "oak_tree", "position": { "x": 10, "z": 10 } }
            ]
        }"#;
        let area: WorldArea = serde_json::from_str(json).unwrap();
        assert_eq!(area.id, AreaId::from("meadow"));
        assert!(!area.is_safe());
        assert!(area.npcs.is_empty());
        assert!(area.connections.is_empty());
        assert_eq!(area.mob_spawns[0].max_count, 3);
        assert_eq!(area.mob_spawns[0].respawn_delay_secs, None);
        assert_eq!(area.resources[0].respawn_secs, 30.0);
        assert_eq!(area.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn area_id_display() {
        assert_eq!(AreaId::new("crypt").to_string(), "crypt");
    }
}
