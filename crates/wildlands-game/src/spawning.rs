//! Spawn point registry.
//!
//! Spawn points are created from area descriptors the first time their
//! chunk generates. Each point tracks the ids of the mobs it owns; the mobs
//! themselves live in the [`MobArena`].

use std::f32::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};
use wildlands_world::{AreaId, Vec2, WorldArea};

use crate::clock::secs;
use crate::error::{GameError, GameResult};
use crate::mob::{MobArena, MobId, MobInstance, MobSpawn, MobTypes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnPointId(pub u32);

impl std::fmt::Display for SpawnPointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SpawnPoint {
    pub id: SpawnPointId,
    pub area: AreaId,
    pub mob_type: String,
    pub anchor: Vec2,
    pub radius: f32,
    pub max_count: u32,
    pub respawn_delay: Duration,
    pub mobs: Vec<MobId>,
}

impl SpawnPoint {
    pub fn alive_count(&self, arena: &MobArena) -> u32 {
        self.mobs
            .iter()
            .filter(|id| arena.get(**id).is_some_and(|m| m.alive))
            .count() as u32
    }

    pub fn has_space(&self, arena: &MobArena) -> bool {
        self.alive_count(arena) < self.max_count
    }
}

/// Uniform angle, uniform radius in `[0, radius]`.
pub fn random_offset(anchor: Vec2, radius: f32, rng: &mut StdRng) -> Vec2 {
    let angle = rng.gen::<f32>() * TAU;
    let r = rng.gen::<f32>() * radius.max(0.0);
    anchor.offset_polar(angle, r)
}

#[derive(Debug, Default)]
pub struct SpawnRegistry {
    points: Vec<SpawnPoint>,
    next_id: u32,
}

impl SpawnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the spawn points of `area` and fill each to `max_count`.
    ///
    /// Descriptors naming an unknown mob type or with an invalid radius or
    /// count are logged and skipped. Returns the ids of the new mobs.
    pub fn generate_spawns(
        &mut self,
        area: &WorldArea,
        types: &MobTypes,
        arena: &mut MobArena,
        rng: &mut StdRng,
        now: Duration,
    ) -> Vec<MobId> {
        let mut spawned = Vec::new();
        for (index, desc) in area.mob_spawns.iter().enumerate() {
            let Some(def) = types.get(&desc.mob_type) else {
                warn!(
                    "Area {}: spawn #{} references unknown mob type '{}', skipping",
                    area.id, index, desc.mob_type
                );
                continue;
            };
            if !desc.spawn_radius.is_finite() || desc.spawn_radius < 0.0 || desc.max_count == 0 {
                warn!(
                    "Area {}: spawn #{} ({}) has radius {} and max_count {}, skipping",
                    area.id, index, desc.mob_type, desc.spawn_radius, desc.max_count
                );
                continue;
            }

            self.next_id += 1;
            let id = SpawnPointId(self.next_id);
            let delay = desc.respawn_delay_secs.unwrap_or(def.respawn_delay_secs);
            let mut point = SpawnPoint {
                id,
                area: area.id.clone(),
                mob_type: desc.mob_type.clone(),
                anchor: desc.position,
                radius: desc.spawn_radius,
                max_count: desc.max_count,
                respawn_delay: secs(delay),
                mobs: Vec::with_capacity(desc.max_count as usize),
            };
            for _ in 0..desc.max_count {
                let mob = arena.spawn(
                    def.clone(),
                    MobSpawn {
                        position: random_offset(point.anchor, point.radius, rng),
                        spawn_radius: point.radius,
                        spawn_point: Some(id),
                        chunk: Some(area.id.clone()),
                    },
                    now,
                );
                point.mobs.push(mob);
                spawned.push(mob);
            }
            debug!(
                "Spawn point {} in {}: {} x{}",
                id, area.id, point.mob_type, point.max_count
            );
            self.points.push(point);
        }
        spawned
    }

    /// Revive a dead mob whose respawn delay has elapsed. Returns `true` if
    /// the mob came back.
    pub fn respawn_check(
        &self,
        arena: &mut MobArena,
        mob_id: MobId,
        rng: &mut StdRng,
        now: Duration,
    ) -> bool {
        let Some(mob) = arena.get(mob_id) else {
            return false;
        };
        if mob.alive {
            return false;
        }
        let Some(point) = mob.spawn_point.and_then(|p| self.get(p)) else {
            return false;
        };
        let Some(died) = mob.last_death else {
            return false;
        };
        if now.saturating_sub(died) < point.respawn_delay {
            return false;
        }
        if !point.has_space(arena) {
            warn!(
                "Spawn point {} already has {} live mobs, not respawning {}",
                point.id, point.max_count, mob_id
            );
            return false;
        }

        let position = random_offset(point.anchor, point.radius, rng);
        match arena.get_mut(mob_id) {
            Some(mob) => {
                mob.revive(position, now);
                debug!("Mob {} ({}) respawned at {}", mob_id, point.mob_type, position);
                true
            }
            None => false,
        }
    }

    /// Run the respawn check on every dead mob. Returns the revived ids.
    pub fn respawn_due(&self, arena: &mut MobArena, rng: &mut StdRng, now: Duration) -> Vec<MobId> {
        let dead: Vec<MobId> = self
            .points
            .iter()
            .flat_map(|p| p.mobs.iter().copied())
            .filter(|id| arena.get(*id).is_some_and(|m| !m.alive))
            .collect();
        dead.into_iter()
            .filter(|id| self.respawn_check(arena, *id, rng, now))
            .collect()
    }

    /// Remove a mob immediately from the arena and from its spawn point.
    pub fn despawn(&mut self, arena: &mut MobArena, mob_id: MobId) -> GameResult<MobInstance> {
        let mob = arena.remove(mob_id).ok_or(GameError::MobNotFound(mob_id))?;
        if let Some(point) = mob
            .spawn_point
            .and_then(|p| self.points.iter_mut().find(|sp| sp.id == p))
        {
            point.mobs.retain(|id| *id != mob_id);
        }
        Ok(mob)
    }

    /// Revive every dead mob now and create new mobs for slots emptied by
    /// despawns. Returns the ids that became alive.
    pub fn refill_all(
        &mut self,
        types: &MobTypes,
        arena: &mut MobArena,
        rng: &mut StdRng,
        now: Duration,
    ) -> Vec<MobId> {
        let mut revived = Vec::new();
        for point in &mut self.points {
            let dead: Vec<MobId> = point
                .mobs
                .iter()
                .copied()
                .filter(|id| arena.get(*id).is_some_and(|m| !m.alive))
                .collect();
            for id in dead {
                if !point.has_space(arena) {
                    break;
                }
                let position = random_offset(point.anchor, point.radius, rng);
                if let Some(mob) = arena.get_mut(id) {
                    mob.revive(position, now);
                    revived.push(id);
                }
            }

            let Some(def) = types.get(&point.mob_type) else {
                continue;
            };
            while (point.mobs.len() as u32) < point.max_count {
                let id = arena.spawn(
                    def.clone(),
                    MobSpawn {
                        position: random_offset(point.anchor, point.radius, rng),
                        spawn_radius: point.radius,
                        spawn_point: Some(point.id),
                        chunk: Some(point.area.clone()),
                    },
                    now,
                );
                point.mobs.push(id);
                revived.push(id);
            }
        }
        revived
    }

    pub fn get(&self, id: SpawnPointId) -> Option<&SpawnPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn points(&self) -> &[SpawnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
