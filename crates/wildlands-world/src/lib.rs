//! Static world data: geometry, biomes, world areas, and the mob-type table.
//!
//! Everything in this crate is built once at startup and never mutated
//! afterwards. The simulation consumes it through read-only queries.

pub mod area;
pub mod biome;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod mob_registry;

pub use area::{AreaId, MobSpawnDescriptor, NpcDescriptor, ResourceDescriptor, WorldArea};
pub use biome::Biome;
pub use catalog::AreaCatalog;
pub use error::WorldError;
pub use geometry::{Bounds, Vec2};
pub use mob_registry::{CombatStats, MobBehavior, MobDefinition, MobRegistry};
