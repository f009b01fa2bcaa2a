//! Content directory loader.
//!
//! Layout:
//!
//! ```text
//! <dir>/mobs/*.json    one MobDefinition per file
//! <dir>/areas/*.json   one WorldArea per file
//! ```
//!
//! Files are layered over the built-in content: a definition with an
//! existing id replaces the built-in one. Files that cannot be read or
//! parsed are logged and skipped.

use std::path::Path;

use tracing::{info, warn};
use wildlands_world::{AreaCatalog, MobDefinition, MobRegistry, WorldArea};

use crate::builtin::{builtin_areas, builtin_mobs};
use crate::error::ContentError;

/// Mob table and world areas, ready to be frozen into the simulation.
#[derive(Debug, Clone)]
pub struct Content {
    pub mobs: MobRegistry,
    pub areas: Vec<WorldArea>,
}

impl Content {
    /// The built-in default world.
    pub fn builtin() -> Self {
        let mut mobs = MobRegistry::new();
        for def in builtin_mobs() {
            mobs.register_mob(def);
        }
        Self {
            mobs,
            areas: builtin_areas(),
        }
    }

    /// Add or replace an area. An area with empty bounds, or whose bounds
    /// overlap a different existing area, is rejected and the content is
    /// left unchanged.
    pub fn add_area(&mut self, area: WorldArea) -> bool {
        if area.bounds.is_empty() {
            warn!("Skipping area {}: bounds are empty", area.id);
            return false;
        }
        if let Some(clash) = self
            .areas
            .iter()
            .find(|a| a.id != area.id && a.bounds.overlaps(&area.bounds))
        {
            warn!(
                "Skipping area {}: bounds overlap area {}",
                area.id, clash.id
            );
            return false;
        }
        match self.areas.iter_mut().find(|a| a.id == area.id) {
            Some(existing) => *existing = area,
            None => self.areas.push(area),
        }
        true
    }

    /// Layer the definitions found in `dir` over this content.
    pub fn merge_dir(&mut self, dir: &Path) {
        let mobs: Vec<MobDefinition> = load_and_parse(dir, "mobs");
        let areas: Vec<WorldArea> = load_and_parse(dir, "areas");
        let (mob_count, area_count) = (mobs.len(), areas.len());

        for def in mobs {
            self.mobs.register_mob(def);
        }
        let mut accepted = 0;
        for area in areas {
            if self.add_area(area) {
                accepted += 1;
            }
        }

        info!(
            "Loaded content from {} ({} mob types, {}/{} areas)",
            dir.display(),
            mob_count,
            accepted,
            area_count
        );
    }

    /// Freeze into the mob table and the area catalog.
    pub fn into_parts(self) -> Result<(MobRegistry, AreaCatalog), ContentError> {
        let catalog = AreaCatalog::new(self.areas)?;
        Ok((self.mobs, catalog))
    }
}

/// Built-in content, optionally overlaid with a content directory.
pub fn load_content(dir: Option<&Path>) -> Content {
    let mut content = Content::builtin();
    if let Some(dir) = dir {
        if dir.is_dir() {
            content.merge_dir(dir);
        } else {
            warn!(
                "Content directory {} not found, using built-in content",
                dir.display()
            );
        }
    }
    content
}

/// Read and deserialize one JSON file.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all JSON files from a subdirectory, sorted by file name.
fn load_and_parse<T: serde::de::DeserializeOwned>(root: &Path, subdir: &str) -> Vec<T> {
    let dir = root.join(subdir);
    let entries = match std::fs::read_dir(&dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();

    let mut results = Vec::new();
    for path in paths {
        match read_json_file::<T>(&path) {
            Ok(parsed) => results.push(parsed),
            Err(e) => warn!("{e}"),
        }
    }
    results
}
