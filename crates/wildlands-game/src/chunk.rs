//! Chunk manager: one chunk per world area, loaded and unloaded by player
//! proximity.
//!
//! A chunk generates its content (terrain handle, NPCs, resources, spawn
//! points) the first time it loads and keeps it for the rest of the run.
//! Unloading only takes things out of the scene; mob AI, health, and respawn
//! timers carry on untouched.

use std::time::Duration;

use tracing::{debug, info, warn};
use wildlands_world::{AreaCatalog, AreaId, Bounds, Vec2, WorldArea};

use crate::clock::secs;
use crate::config::ChunkConfig;
use crate::context::SimContext;
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::mob::{MobArena, MobId, MobTypes};
use crate::scene::SceneObject;
use crate::spawning::SpawnRegistry;

/// Opaque terrain description handed to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainHandle {
    pub area: AreaId,
    pub material: &'static str,
    pub width: f32,
    pub depth: f32,
    pub height_scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcInstance {
    pub id: String,
    pub name: String,
    pub role: String,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstance {
    pub id: String,
    pub kind: String,
    pub position: Vec2,
    pub active: bool,
    pub respawn_delay: Duration,
    pub depleted_at: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: AreaId,
    pub bounds: Bounds,
    pub center: Vec2,
    pub loaded: bool,
    pub generated: bool,
    pub terrain: Option<TerrainHandle>,
    pub npcs: Vec<NpcInstance>,
    pub resources: Vec<ResourceInstance>,
    /// Spawn-point mobs plus admin mobs placed in this area.
    pub mobs: Vec<MobId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTransition {
    Load,
    Unload,
}

impl Chunk {
    fn new(area: &WorldArea) -> Self {
        Self {
            id: area.id.clone(),
            bounds: area.bounds,
            center: area.center(),
            loaded: false,
            generated: false,
            terrain: None,
            npcs: Vec::new(),
            resources: Vec::new(),
            mobs: Vec::new(),
        }
    }

    /// Load decision for the given player positions.
    pub fn transition_for(&self, players: &[Vec2], cfg: &ChunkConfig) -> Option<ChunkTransition> {
        if !self.loaded {
            players
                .iter()
                .any(|p| p.distance(self.center) <= cfg.load_distance)
                .then_some(ChunkTransition::Load)
        } else {
            players
                .iter()
                .all(|p| p.distance(self.center) > cfg.unload_distance)
                .then_some(ChunkTransition::Unload)
        }
    }

    fn generate(
        &mut self,
        area: &WorldArea,
        types: &MobTypes,
        spawns: &mut SpawnRegistry,
        mobs: &mut MobArena,
        ctx: &mut SimContext<'_>,
    ) {
        let biome = area.biome.def();
        self.terrain = Some(TerrainHandle {
            area: area.id.clone(),
            material: biome.terrain_material,
            width: area.bounds.width(),
            depth: area.bounds.depth(),
            height_scale: biome.height_scale,
        });

        for npc in &area.npcs {
            if !area.bounds.contains_point(npc.position) {
                warn!(
                    "Area {}: NPC {} at {} is outside the area bounds, skipping",
                    area.id, npc.id, npc.position
                );
                continue;
            }
            self.npcs.push(NpcInstance {
                id: npc.id.clone(),
                name: npc.name.clone(),
                role: npc.role.clone(),
                position: npc.position,
            });
        }

        for res in &area.resources {
            if !area.bounds.contains_point(res.position) {
                warn!(
                    "Area {}: resource {} at {} is outside the area bounds, skipping",
                    area.id, res.id, res.position
                );
                continue;
            }
            self.resources.push(ResourceInstance {
                id: res.id.clone(),
                kind: res.kind.clone(),
                position: res.position,
                active: true,
                respawn_delay: secs(res.respawn_secs),
                depleted_at: None,
            });
        }

        let spawned = spawns.generate_spawns(area, types, mobs, ctx.rng, ctx.now);
        self.mobs.extend(spawned);
        self.generated = true;
        debug!(
            "Generated chunk {}: {} NPCs, {} resources, {} mobs",
            self.id,
            self.npcs.len(),
            self.resources.len(),
            self.mobs.len()
        );
    }
}

pub struct ChunkManager {
    chunks: Vec<Chunk>,
    config: ChunkConfig,
}

impl ChunkManager {
    pub fn new(catalog: &AreaCatalog, config: ChunkConfig) -> Self {
        Self {
            chunks: catalog.all().iter().map(Chunk::new).collect(),
            config,
        }
    }

    pub fn get(&self, id: &AreaId) -> Option<&Chunk> {
        self.chunks.iter().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn is_loaded(&self, id: &AreaId) -> bool {
        self.get(id).is_some_and(|c| c.loaded)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.loaded).count()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Transitions needed for the given player positions.
    pub fn plan(&self, players: &[Vec2]) -> Vec<(AreaId, ChunkTransition)> {
        self.chunks
            .iter()
            .filter_map(|c| {
                c.transition_for(players, &self.config)
                    .map(|t| (c.id.clone(), t))
            })
            .collect()
    }

    /// Load a chunk, generating it on first load. Returns `false` if it was
    /// already loaded.
    pub fn load(
        &mut self,
        id: &AreaId,
        catalog: &AreaCatalog,
        types: &MobTypes,
        spawns: &mut SpawnRegistry,
        mobs: &mut MobArena,
        ctx: &mut SimContext<'_>,
    ) -> GameResult<bool> {
        let chunk = self
            .chunks
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| GameError::ChunkNotFound(id.clone()))?;
        if chunk.loaded {
            return Ok(false);
        }
        if !chunk.generated {
            let area = catalog
                .get(id)
                .ok_or_else(|| GameError::ChunkNotFound(id.clone()))?;
            chunk.generate(area, types, spawns, mobs, ctx);
        }

        ctx.show(SceneObject::Terrain(chunk.id.clone()));
        for npc in &chunk.npcs {
            ctx.show(SceneObject::Npc(npc.id.clone()));
        }
        for res in chunk.resources.iter().filter(|r| r.active) {
            ctx.show(SceneObject::Resource(res.id.clone()));
        }
        let mut shown = 0;
        for mob_id in &chunk.mobs {
            if let Some(mob) = mobs.get_mut(*mob_id) {
                if mob.alive && !mob.in_scene {
                    ctx.show(SceneObject::Mob(mob.id));
                    mob.in_scene = true;
                    shown += 1;
                }
            }
        }

        chunk.loaded = true;
        info!("Chunk {} loaded ({} mobs visible)", chunk.id, shown);
        ctx.emit(GameEvent::ChunkLoaded {
            chunk: chunk.id.clone(),
        });
        Ok(true)
    }

    /// Take a loaded chunk out of the scene. Returns `false` if it was not
    /// loaded.
    pub fn unload(
        &mut self,
        id: &AreaId,
        mobs: &mut MobArena,
        ctx: &mut SimContext<'_>,
    ) -> GameResult<bool> {
        let chunk = self
            .chunks
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| GameError::ChunkNotFound(id.clone()))?;
        if !chunk.loaded {
            return Ok(false);
        }

        ctx.hide(SceneObject::Terrain(chunk.id.clone()));
        for npc in &chunk.npcs {
            ctx.hide(SceneObject::Npc(npc.id.clone()));
        }
        for res in chunk.resources.iter().filter(|r| r.active) {
            ctx.hide(SceneObject::Resource(res.id.clone()));
        }
        for mob_id in &chunk.mobs {
            if let Some(mob) = mobs.get_mut(*mob_id) {
                if mob.in_scene {
                    ctx.hide(SceneObject::Mob(mob.id));
                    mob.in_scene = false;
                }
            }
        }

        chunk.loaded = false;
        info!("Chunk {} unloaded", chunk.id);
        ctx.emit(GameEvent::ChunkUnloaded {
            chunk: chunk.id.clone(),
        });
        Ok(true)
    }

    /// Record a mob as belonging to a chunk.
    pub fn attach_mob(&mut self, id: &AreaId, mob: MobId) {
        if let Some(chunk) = self.chunks.iter_mut().find(|c| &c.id == id) {
            if !chunk.mobs.contains(&mob) {
                chunk.mobs.push(mob);
            }
        }
    }

    pub fn detach_mob(&mut self, id: &AreaId, mob: MobId) {
        if let Some(chunk) = self.chunks.iter_mut().find(|c| &c.id == id) {
            chunk.mobs.retain(|m| *m != mob);
        }
    }

    /// Deplete a resource node. Returns `false` if it was already depleted.
    pub fn harvest(&mut self, resource_id: &str, ctx: &mut SimContext<'_>) -> GameResult<bool> {
        for chunk in &mut self.chunks {
            let loaded = chunk.loaded;
            if let Some(res) = chunk.resources.iter_mut().find(|r| r.id == resource_id) {
                if !res.active {
                    return Ok(false);
                }
                res.active = false;
                res.depleted_at = Some(ctx.now);
                if loaded {
                    ctx.hide(SceneObject::Resource(res.id.clone()));
                }
                debug!("Resource {} ({}) harvested", res.id, res.kind);
                return Ok(true);
            }
        }
        Err(GameError::ResourceNotFound(resource_id.to_string()))
    }

    /// Reactivate depleted resources whose delay has passed.
    pub fn respawn_resources(&mut self, ctx: &mut SimContext<'_>) {
        for chunk in &mut self.chunks {
            let loaded = chunk.loaded;
            for res in chunk.resources.iter_mut().filter(|r| !r.active) {
                let Some(at) = res.depleted_at else {
                    continue;
                };
                if ctx.now.saturating_sub(at) < res.respawn_delay {
                    continue;
                }
                res.active = true;
                res.depleted_at = None;
                if loaded {
                    ctx.show(SceneObject::Resource(res.id.clone()));
                }
                ctx.emit(GameEvent::ResourceRespawned {
                    resource_id: res.id.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wildlands_world::{
        Biome, MobDefinition, MobRegistry, MobSpawnDescriptor, NpcDescriptor, ResourceDescriptor,
    };

    use crate::events::EventQueue;
    use crate::mob::resolve_types;
    use crate::players::InMemoryPlayers;
    use crate::scene::SceneIndex;

    fn catalog() -> AreaCatalog {
        let woods = WorldArea {
            id: AreaId::from("woods"),
            name: "Woods".into(),
            difficulty: 1,
            bounds: Bounds::new(0.0, 0.0, 100.0, 100.0),
            biome: Biome::Forest,
            npcs: vec![
                NpcDescriptor {
                    id: "hermit".into(),
                    name: "Hermit".into(),
                    role: "quest".into(),
                    position: Vec2::new(10.0, 10.0),
                },
                NpcDescriptor {
                    id: "lost".into(),
                    name: "Lost".into(),
                    role: String::new(),
                    position: Vec2::new(500.0, 10.0),
                },
            ],
            resources: vec![ResourceDescriptor {
                id: "oak-1".into(),
                kind: "oak_tree".into(),
                position: Vec2::new(20.0, 20.0),
                respawn_secs: 15.0,
            }],
            mob_spawns: vec![
                MobSpawnDescriptor {
                    mob_type: "boar".into(),
                    position: Vec2::new(50.0, 50.0),
                    spawn_radius: 5.0,
                    max_count: 2,
                    respawn_delay_secs: None,
                },
                MobSpawnDescriptor {
                    mob_type: "unicorn".into(),
                    position: Vec2::new(60.0, 60.0),
                    spawn_radius: 5.0,
                    max_count: 2,
                    respawn_delay_secs: None,
                },
            ],
            connections: vec![],
        };
        AreaCatalog::new(vec![woods]).unwrap()
    }

    fn types() -> MobTypes {
        let mut registry = MobRegistry::new();
        registry.register_mob(MobDefinition {
            type_id: "boar".into(),
            display_name: "Boar".into(),
            level: 3,
            max_health: 20,
            stats: Default::default(),
            behavior: Default::default(),
            movement_speed: 3.0,
            respawn_delay_secs: 30.0,
            xp_reward: None,
        });
        resolve_types(&registry)
    }

    struct Io {
        rng: StdRng,
        scene: SceneIndex,
        events: EventQueue,
        players: InMemoryPlayers,
    }

    impl Io {
        fn ctx(&mut self, now: u64) -> SimContext<'_> {
            SimContext {
                now: Duration::from_secs(now),
                rng: &mut self.rng,
                scene: &mut self.scene,
                events: &mut self.events,
                players: &self.players,
            }
        }
    }

    struct Fixture {
        catalog: AreaCatalog,
        types: MobTypes,
        chunks: ChunkManager,
        spawns: SpawnRegistry,
        mobs: MobArena,
        io: Io,
        scene: SceneIndex,
        events: EventQueue,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = catalog();
            let chunks = ChunkManager::new(&catalog, ChunkConfig::default());
            let scene = SceneIndex::new();
            let events = EventQueue::new();
            Self {
                catalog,
                types: types(),
                chunks,
                spawns: SpawnRegistry::new(),
                mobs: MobArena::new(),
                io: Io {
                    rng: StdRng::seed_from_u64(5),
                    scene: scene.clone(),
                    events: events.clone(),
                    players: InMemoryPlayers::new(),
                },
                scene,
                events,
            }
        }

        fn load(&mut self, now: u64) -> bool {
            let mut ctx = self.io.ctx(now);
            self.chunks
                .load(
                    &AreaId::from("woods"),
                    &self.catalog,
                    &self.types,
                    &mut self.spawns,
                    &mut self.mobs,
                    &mut ctx,
                )
                .unwrap()
        }

        fn unload(&mut self, now: u64) -> bool {
            let mut ctx = self.io.ctx(now);
            self.chunks
                .unload(&AreaId::from("woods"), &mut self.mobs, &mut ctx)
                .unwrap()
        }
    }

    #[test]
    fn plan_uses_hysteresis() {
        let f = Fixture::new();
        // center is (50, 50)
        assert!(f.chunks.plan(&[Vec2::new(50.0, 250.0)]).is_empty());
        assert_eq!(
            f.chunks.plan(&[Vec2::new(50.0, 170.0)]),
            vec![(AreaId::from("woods"), ChunkTransition::Load)]
        );

        let mut f = Fixture::new();
        f.load(0);
        assert!(f.chunks.plan(&[Vec2::new(50.0, 240.0)]).is_empty());
        assert_eq!(
            f.chunks.plan(&[Vec2::new(50.0, 260.0)]),
            vec![(AreaId::from("woods"), ChunkTransition::Unload)]
        );
        assert_eq!(
            f.chunks.plan(&[]),
            vec![(AreaId::from("woods"), ChunkTransition::Unload)]
        );
    }

    #[test]
    fn first_load_generates_once() {
        let mut f = Fixture::new();
        assert!(f.load(0));
        let chunk = f.chunks.get(&AreaId::from("woods")).unwrap();
        assert!(chunk.generated);
        assert_eq!(chunk.terrain.as_ref().unwrap().material, "forest_floor");
        // out-of-bounds NPC and unknown mob type are skipped
        assert_eq!(chunk.npcs.len(), 1);
        assert_eq!(chunk.resources.len(), 1);
        assert_eq!(chunk.mobs.len(), 2);
        // terrain + npc + resource + 2 mobs
        assert_eq!(f.scene.len(), 5);

        assert!(!f.load(1));
        assert_eq!(f.mobs.len(), 2);
        assert!(f.unload(2));
        assert!(!f.unload(3));
        assert!(f.scene.is_empty());
        assert!(f.load(4));
        assert_eq!(f.mobs.len(), 2);
        assert_eq!(f.scene.len(), 5);
    }

    #[test]
    fn unload_keeps_mob_state() {
        let mut f = Fixture::new();
        f.load(0);
        let id = f.chunks.get(&AreaId::from("woods")).unwrap().mobs[0];
        f.mobs.get_mut(id).unwrap().health = 7;
        f.unload(1);
        let mob = f.mobs.get(id).unwrap();
        assert_eq!(mob.health, 7);
        assert!(mob.alive);
        assert!(!mob.in_scene);
    }

    #[test]
    fn dead_mobs_are_not_shown_on_load() {
        let mut f = Fixture::new();
        f.load(0);
        let id = f.chunks.get(&AreaId::from("woods")).unwrap().mobs[0];
        f.unload(1);
        f.mobs.get_mut(id).unwrap().kill(Duration::from_secs(1));
        f.load(2);
        assert!(!f.scene.contains_mob(id));
        assert_eq!(f.scene.mobs().len(), 1);
    }

    #[test]
    fn load_unknown_chunk_fails() {
        let mut f = Fixture::new();
        let mut ctx = f.io.ctx(0);
        let err = f
            .chunks
            .load(
                &AreaId::from("moon"),
                &f.catalog,
                &f.types,
                &mut f.spawns,
                &mut f.mobs,
                &mut ctx,
            )
            .unwrap_err();
        assert_eq!(err, GameError::ChunkNotFound(AreaId::from("moon")));
    }

    #[test]
    fn harvest_and_respawn_resource() {
        let mut f = Fixture::new();
        f.load(0);
        let oak = SceneObject::Resource("oak-1".into());
        assert!(f.scene.contains(&oak));

        let mut ctx = f.io.ctx(10);
        assert!(f.chunks.harvest("oak-1", &mut ctx).unwrap());
        assert!(!f.chunks.harvest("oak-1", &mut ctx).unwrap());
        assert_eq!(
            f.chunks.harvest("gold-1", &mut ctx).unwrap_err(),
            GameError::ResourceNotFound("gold-1".into())
        );
        assert!(!f.scene.contains(&oak));

        f.chunks.respawn_resources(&mut f.io.ctx(24));
        assert!(!f.scene.contains(&oak));
        f.chunks.respawn_resources(&mut f.io.ctx(25));
        assert!(f.scene.contains(&oak));
        assert!(f
            .events
            .drain()
            .iter()
            .any(|e| matches!(e, GameEvent::ResourceRespawned { resource_id } if resource_id == "oak-1")));
    }

    #[test]
    fn resource_respawned_while_unloaded_stays_hidden() {
        let mut f = Fixture::new();
        f.load(0);
        f.chunks.harvest("oak-1", &mut f.io.ctx(1)).unwrap();
        f.unload(2);
        f.chunks.respawn_resources(&mut f.io.ctx(20));
        let oak = SceneObject::Resource("oak-1".into());
        assert!(!f.scene.contains(&oak));
        f.load(21);
        assert!(f.scene.contains(&oak));
    }
}
