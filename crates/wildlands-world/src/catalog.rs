//! World Area Catalog: read-only lookup over all defined areas.

use tracing::warn;

use crate::area::{AreaId, WorldArea};
use crate::error::WorldError;

/// All world areas, in definition order.
///
/// Lookups never fail loudly: an unknown id or a point outside every area
/// yields `None`, which callers treat as wilderness.
#[derive(Debug, Clone, Default)]
pub struct AreaCatalog {
    areas: Vec<WorldArea>,
}

impl AreaCatalog {
    /// Build a catalog, rejecting duplicate ids, empty bounds, and overlaps.
    pub fn new(areas: Vec<WorldArea>) -> Result<Self, WorldError> {
        for (i, area) in areas.iter().enumerate() {
            if area.bounds.is_empty() {
                return Err(WorldError::EmptyBounds(area.id.clone()));
            }
            for other in &areas[..i] {
                if other.id == area.id {
                    return Err(WorldError::DuplicateArea(area.id.clone()));
                }
                if other.bounds.overlaps(&area.bounds) {
                    return Err(WorldError::OverlappingAreas {
                        a: other.id.clone(),
                        b: area.id.clone(),
                    });
                }
            }
        }

        for area in &areas {
            for conn in &area.connections {
                if !areas.iter().any(|a| &a.id == conn) {
                    warn!("Area {} lists unknown connection {}", area.id, conn);
                }
            }
        }

        Ok(Self { areas })
    }

    pub fn get(&self, id: &AreaId) -> Option<&WorldArea> {
        self.areas.iter().find(|a| &a.id == id)
    }

    /// First area whose bounds contain `(x, z)`.
    pub fn area_at(&self, x: f32, z: f32) -> Option<&WorldArea> {
        self.areas.iter().find(|a| a.bounds.contains(x, z))
    }

    pub fn areas_by_difficulty(&self, tier: u8) -> Vec<&WorldArea> {
        self.areas.iter().filter(|a| a.difficulty == tier).collect()
    }

    /// Areas reachable from `id`. Unknown connection ids are skipped.
    pub fn connected_areas(&self, id: &AreaId) -> Vec<&WorldArea> {
        match self.get(id) {
            Some(area) => area
                .connections
                .iter()
                .filter_map(|c| self.get(c))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn all(&self) -> &[WorldArea] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::geometry::Bounds;

    fn area(id: &str, tier: u8, bounds: Bounds, connections: &[&str]) -> WorldArea {
        WorldArea {
            id: AreaId::from(id),
            name: id.to_uppercase(),
            difficulty: tier,
            bounds,
            biome: Biome::Plains,
            npcs: Vec::new(),
            resources: Vec::new(),
            mob_spawns: Vec::new(),
            connections: connections.iter().map(|c| AreaId::from(*c)).collect(),
        }
    }

    fn catalog() -> AreaCatalog {
        AreaCatalog::new(vec![
            area("town", 0, Bounds::new(0.0, 0.0, 100.0, 100.0), &["woods"]),
            area("woods", 1, Bounds::new(100.0, 0.0, 300.0, 100.0), &["town", "nowhere"]),
            area("swamp", 1, Bounds::new(0.0, 100.0, 100.0, 200.0), &[]),
            area("crypt", 3, Bounds::new(-200.0, 0.0, -100.0, 100.0), &[]),
        ])
        .unwrap()
    }

    #[test]
    fn get_known_and_unknown() {
        let cat = catalog();
        assert_eq!(cat.get(&AreaId::from("woods")).unwrap().difficulty, 1);
        assert!(cat.get(&AreaId::from("moon")).is_none());
    }

    #[test]
    fn area_at_hits_and_wilderness() {
        let cat = catalog();
        assert_eq!(cat.area_at(150.0, 50.0).unwrap().id.as_str(), "woods");
        assert_eq!(cat.area_at(100.0, 50.0).unwrap().id.as_str(), "woods");
        assert_eq!(cat.area_at(-150.0, 20.0).unwrap().id.as_str(), "crypt");
        assert!(cat.area_at(5000.0, 5000.0).is_none());
    }

    #[test]
    fn by_difficulty() {
        let cat = catalog();
        let tier1: Vec<&str> = cat
            .areas_by_difficulty(1)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(tier1, vec!["woods", "swamp"]);
        assert!(cat.areas_by_difficulty(2).is_empty());
    }

    #[test]
    fn connections_skip_unknown() {
        let cat = catalog();
        let conns = cat.connected_areas(&AreaId::from("woods"));
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].id.as_str(), "town");
        assert!(cat.connected_areas(&AreaId::from("moon")).is_empty());
    }

    #[test]
    fn rejects_overlap() {
        let err = AreaCatalog::new(vec![
            area("a", 1, Bounds::new(0.0, 0.0, 10.0, 10.0), &[]),
            area("b", 1, Bounds::new(5.0, 5.0, 15.0, 15.0), &[]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            WorldError::OverlappingAreas {
                a: AreaId::from("a"),
                b: AreaId::from("b"),
            }
        );
    }

    #[test]
    fn rejects_duplicate_and_empty() {
        let dup = AreaCatalog::new(vec![
            area("a", 1, Bounds::new(0.0, 0.0, 10.0, 10.0), &[]),
            area("a", 1, Bounds::new(20.0, 0.0, 30.0, 10.0), &[]),
        ]);
        assert_eq!(dup.unwrap_err(), WorldError::DuplicateArea(AreaId::from("a")));

        let empty = AreaCatalog::new(vec![area("e", 0, Bounds::new(0.0, 0.0, 0.0, 10.0), &[])]);
        assert_eq!(empty.unwrap_err(), WorldError::EmptyBounds(AreaId::from("e")));
    }
}
