//! The game world: owns the simulation state and runs the fixed-step tick.
//!
//! Hosts construct a [`GameWorld`] from static content plus a set of
//! [`Collaborators`], call [`GameWorld::tick`] at a fixed rate, and drive the
//! admin surface (`spawn_mob_at`, `despawn_mob`, `respawn_all_mobs`, ...)
//! between ticks.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use wildlands_world::{AreaCatalog, AreaId, MobRegistry, Vec2};

use crate::ai::{BehaviorEngine, DamageOutcome};
use crate::chunk::{Chunk, ChunkManager, ChunkTransition};
use crate::clock::{secs, Clock};
use crate::combat::{DamageModel, StrengthRoll};
use crate::config::GameConfig;
use crate::context::SimContext;
use crate::error::{GameError, GameResult};
use crate::events::{EventSink, GameEvent};
use crate::mob::{resolve_types, MobArena, MobId, MobInstance, MobSpawn, MobTypes};
use crate::players::{PlayerDirectory, PlayerId, PlayerPositionTracker};
use crate::scene::{Scene, SceneObject};
use crate::spawning::{SpawnPoint, SpawnRegistry};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// External collaborators, resolved once when the world is built.
pub struct Collaborators {
    pub players: Box<dyn PlayerDirectory>,
    pub scene: Box<dyn Scene>,
    pub events: Box<dyn EventSink>,
    pub clock: Box<dyn Clock>,
}

impl Collaborators {
    fn context<'a>(&'a mut self, rng: &'a mut StdRng, now: Duration) -> SimContext<'a> {
        SimContext {
            now,
            rng,
            scene: self.scene.as_mut(),
            events: self.events.as_mut(),
            players: self.players.as_ref(),
        }
    }
}

/// Counters for the host's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStatus {
    pub tick: u64,
    pub chunks_loaded: usize,
    pub chunks_total: usize,
    pub mobs_alive: usize,
    pub mobs_total: usize,
    pub spawn_points: usize,
    pub players: usize,
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

pub struct GameWorld {
    config: GameConfig,
    catalog: AreaCatalog,
    types: MobTypes,
    mobs: MobArena,
    spawns: SpawnRegistry,
    chunks: ChunkManager,
    engine: BehaviorEngine,
    tracker: PlayerPositionTracker,
    io: Collaborators,
    rng: StdRng,
    tick: u64,
    last_tick: Duration,
    last_aggro: Duration,
    next_aggro: Duration,
    next_state: Duration,
}

impl GameWorld {
    pub fn new(
        config: GameConfig,
        catalog: AreaCatalog,
        registry: &MobRegistry,
        io: Collaborators,
    ) -> Self {
        let now = io.clock.now();
        let engine = BehaviorEngine::new(
            config.ai.clone(),
            config.threat.clone(),
            Box::new(StrengthRoll::default()),
        );
        let chunks = ChunkManager::new(&catalog, config.chunks.clone());
        info!(
            "Game world created: {} areas, {} mob types, seed {}",
            catalog.len(),
            registry.len(),
            config.seed
        );
        Self {
            tracker: PlayerPositionTracker::new(config.movement_threshold),
            rng: StdRng::seed_from_u64(config.seed),
            types: resolve_types(registry),
            mobs: MobArena::new(),
            spawns: SpawnRegistry::new(),
            chunks,
            engine,
            catalog,
            config,
            io,
            tick: 0,
            last_tick: now,
            last_aggro: now,
            next_aggro: now,
            next_state: now,
        }
    }

    /// Replace the mob-to-player damage strategy.
    pub fn with_damage_model(mut self, model: Box<dyn DamageModel>) -> Self {
        self.engine.set_damage_model(model);
        self
    }

    /// Run one simulation step against the current clock reading.
    pub fn tick(&mut self) {
        let now = self.io.clock.now();
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        self.tick += 1;

        let listing = self.io.players.players();
        if self.tracker.refresh(listing, now) {
            self.update_chunks(now);
        }

        if now >= self.next_aggro {
            let elapsed = now.saturating_sub(self.last_aggro);
            self.engine
                .aggro_pass(&mut self.mobs, &self.tracker, now, elapsed);
            self.last_aggro = now;
            self.next_aggro = now + secs(self.config.ai.aggro_interval);
        }

        if now >= self.next_state {
            self.engine.state_pass(&mut self.mobs, &mut self.rng, now);
            self.respawn_mobs(now);
            let mut ctx = self.io.context(&mut self.rng, now);
            self.chunks.respawn_resources(&mut ctx);
            self.next_state = now + secs(self.config.ai.state_interval);
        }

        let mut ctx = self.io.context(&mut self.rng, now);
        self.engine.movement_pass(&mut self.mobs, &mut ctx, dt);
    }

    fn update_chunks(&mut self, now: Duration) {
        let positions = self.tracker.positions();
        for (id, transition) in self.chunks.plan(&positions) {
            let mut ctx = self.io.context(&mut self.rng, now);
            let result = match transition {
                ChunkTransition::Load => self.chunks.load(
                    &id,
                    &self.catalog,
                    &self.types,
                    &mut self.spawns,
                    &mut self.mobs,
                    &mut ctx,
                ),
                ChunkTransition::Unload => self.chunks.unload(&id, &mut self.mobs, &mut ctx),
            };
            if let Err(e) = result {
                warn!("Chunk {} {:?} failed: {}", id, transition, e);
            }
        }
    }

    fn respawn_mobs(&mut self, now: Duration) {
        let revived = self.spawns.respawn_due(&mut self.mobs, &mut self.rng, now);
        if revived.is_empty() {
            return;
        }
        let mut ctx = self.io.context(&mut self.rng, now);
        for id in revived {
            if let Some(mob) = self.mobs.get_mut(id) {
                show_if_visible(&self.chunks, mob, &mut ctx);
                ctx.emit(GameEvent::MobRespawned {
                    mob_id: id,
                    position: mob.position,
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Admin surface
    // -----------------------------------------------------------------------

    /// Force-load the given areas regardless of player distance. Unknown ids
    /// are logged. Returns how many chunks were newly loaded.
    pub fn warm_up(&mut self, areas: &[AreaId]) -> usize {
        let mut loaded = 0;
        for id in areas {
            match self.load_chunk(id) {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => warn!("Warm-up of {} skipped: {}", id, e),
            }
        }
        loaded
    }

    /// Load a chunk regardless of player distance.
    pub fn load_chunk(&mut self, id: &AreaId) -> GameResult<bool> {
        let now = self.io.clock.now();
        let mut ctx = self.io.context(&mut self.rng, now);
        self.chunks.load(
            id,
            &self.catalog,
            &self.types,
            &mut self.spawns,
            &mut self.mobs,
            &mut ctx,
        )
    }

    pub fn unload_chunk(&mut self, id: &AreaId) -> GameResult<bool> {
        let now = self.io.clock.now();
        let mut ctx = self.io.context(&mut self.rng, now);
        self.chunks.unload(id, &mut self.mobs, &mut ctx)
    }

    /// Spawn a mob that belongs to no spawn point, homed at `position`.
    pub fn spawn_mob_at(&mut self, mob_type: &str, position: Vec2) -> GameResult<MobId> {
        let def = self
            .types
            .get(mob_type)
            .cloned()
            .ok_or_else(|| GameError::UnknownMobType(mob_type.to_string()))?;
        let now = self.io.clock.now();
        let chunk = self
            .catalog
            .area_at(position.x, position.z)
            .map(|a| a.id.clone());
        let id = self.mobs.spawn(
            def,
            MobSpawn {
                position,
                spawn_radius: self.config.adhoc_spawn_radius,
                spawn_point: None,
                chunk: chunk.clone(),
            },
            now,
        );
        if let Some(c) = &chunk {
            self.chunks.attach_mob(c, id);
        }
        let mut ctx = self.io.context(&mut self.rng, now);
        if let Some(mob) = self.mobs.get_mut(id) {
            show_if_visible(&self.chunks, mob, &mut ctx);
        }
        info!(
            "Spawned {} {} at {} ({})",
            mob_type,
            id,
            position,
            chunk.as_ref().map_or("wilderness", |c| c.as_str())
        );
        Ok(id)
    }

    /// Remove a mob immediately, alive or dead.
    pub fn despawn_mob(&mut self, id: MobId) -> GameResult<()> {
        let mob = self.mobs.get(id).ok_or(GameError::MobNotFound(id))?;
        if mob.in_scene {
            self.io.scene.remove_from_scene(SceneObject::Mob(id));
        }
        if let Some(chunk) = mob.chunk.clone() {
            self.chunks.detach_mob(&chunk, id);
        }
        let removed = self.spawns.despawn(&mut self.mobs, id)?;
        info!("Despawned {} {}", removed.mob_type(), id);
        Ok(())
    }

    /// Revive every dead spawn-point mob and refill despawned slots. Returns
    /// the number of mobs brought to life.
    pub fn respawn_all_mobs(&mut self) -> usize {
        let now = self.io.clock.now();
        let revived = self
            .spawns
            .refill_all(&self.types, &mut self.mobs, &mut self.rng, now);
        let mut ctx = self.io.context(&mut self.rng, now);
        for id in &revived {
            let Some(mob) = self.mobs.get_mut(*id) else {
                continue;
            };
            if let Some(chunk) = &mob.chunk {
                self.chunks.attach_mob(chunk, *id);
            }
            show_if_visible(&self.chunks, mob, &mut ctx);
            ctx.emit(GameEvent::MobRespawned {
                mob_id: *id,
                position: mob.position,
            });
        }
        info!("Respawned {} mobs", revived.len());
        revived.len()
    }

    /// Apply player damage to a mob. Admin-spawned mobs are removed once dead.
    pub fn apply_damage(
        &mut self,
        id: MobId,
        amount: u32,
        attacker: &PlayerId,
    ) -> GameResult<DamageOutcome> {
        let now = self.io.clock.now();
        let mob = self.mobs.get_mut(id).ok_or(GameError::MobNotFound(id))?;
        if mob.is_dead() {
            return Err(GameError::MobDead(id));
        }
        let mut ctx = self.io.context(&mut self.rng, now);
        let outcome = self.engine.apply_damage(mob, amount, attacker, &mut ctx);

        if outcome.killed && mob.spawn_point.is_none() {
            let chunk = mob.chunk.clone();
            self.mobs.remove(id);
            if let Some(c) = chunk {
                self.chunks.detach_mob(&c, id);
            }
            debug!("Ad-hoc mob {} removed after death", id);
        }
        Ok(outcome)
    }

    /// Deplete a resource node. Returns `false` if it was already depleted.
    pub fn harvest_resource(&mut self, resource_id: &str) -> GameResult<bool> {
        let now = self.io.clock.now();
        let mut ctx = self.io.context(&mut self.rng, now);
        self.chunks.harvest(resource_id, &mut ctx)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn mob(&self, id: MobId) -> Option<&MobInstance> {
        self.mobs.get(id)
    }

    pub fn mobs(&self) -> impl Iterator<Item = &MobInstance> {
        self.mobs.iter()
    }

    pub fn mobs_in(&self, area: &AreaId) -> Vec<&MobInstance> {
        self.chunks
            .get(area)
            .map(|c| c.mobs.iter().filter_map(|id| self.mobs.get(*id)).collect())
            .unwrap_or_default()
    }

    pub fn chunk(&self, id: &AreaId) -> Option<&Chunk> {
        self.chunks.get(id)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn spawn_points(&self) -> &[SpawnPoint] {
        self.spawns.points()
    }

    pub fn tracker(&self) -> &PlayerPositionTracker {
        &self.tracker
    }

    pub fn catalog(&self) -> &AreaCatalog {
        &self.catalog
    }

    pub fn mob_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn status(&self) -> WorldStatus {
        WorldStatus {
            tick: self.tick,
            chunks_loaded: self.chunks.loaded_count(),
            chunks_total: self.chunks.len(),
            mobs_alive: self.mobs.alive_count(),
            mobs_total: self.mobs.len(),
            spawn_points: self.spawns.len(),
            players: self.tracker.len(),
        }
    }
}

/// Put an alive mob in the scene if its chunk is loaded. Wilderness mobs are
/// always visible.
fn show_if_visible(chunks: &ChunkManager, mob: &mut MobInstance, ctx: &mut SimContext<'_>) {
    let visible = match &mob.chunk {
        Some(c) => chunks.is_loaded(c),
        None => true,
    };
    if visible && mob.alive && !mob.in_scene {
        ctx.show(SceneObject::Mob(mob.id));
        mob.in_scene = true;
    }
}
