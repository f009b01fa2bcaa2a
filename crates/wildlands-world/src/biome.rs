//! Biome tags for world areas.
//!
//! A biome only selects the terrain material handed to the rendering side
//! when a chunk's terrain is generated; it has no simulation effect.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Town,
    Plains,
    Forest,
    Swamp,
    Desert,
    Mountains,
    Crypt,
}

/// Static terrain parameters for a biome.
#[derive(Debug, Clone)]
pub struct BiomeDef {
    pub biome: Biome,
    pub name: &'static str,
    /// Material used for the ground mesh.
    pub terrain_material: &'static str,
    /// Vertical amplitude of the ground mesh.
    pub height_scale: f32,
}

static BIOME_DEFS: &[BiomeDef] = &[
    BiomeDef {
        biome: Biome::Town,
        name: "town",
        terrain_material: "cobblestone",
        height_scale: 0.0,
    },
    BiomeDef {
        biome: Biome::Plains,
        name: "plains",
        terrain_material: "grass",
        height_scale: 0.5,
    },
    BiomeDef {
        biome: Biome::Forest,
        name: "forest",
        terrain_material: "forest_floor",
        height_scale: 1.5,
    },
    BiomeDef {
        biome: Biome::Swamp,
        name: "swamp",
        terrain_material: "mud",
        height_scale: 0.3,
    },
    BiomeDef {
        biome: Biome::Desert,
        name: "desert",
        terrain_material: "sand",
        height_scale: 2.0,
    },
    BiomeDef {
        biome: Biome::Mountains,
        name: "mountains",
        terrain_material: "stone",
        height_scale: 6.0,
    },
    BiomeDef {
        biome: Biome::Crypt,
        name: "crypt",
        terrain_material: "dark_stone",
        height_scale: 0.0,
    },
];

impl Biome {
    pub fn def(self) -> &'static BiomeDef {
        // Every variant has exactly one entry above.
        BIOME_DEFS
            .iter()
            .find(|d| d.biome == self)
            .unwrap_or(&BIOME_DEFS[0])
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
