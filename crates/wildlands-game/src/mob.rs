//! Mob instances and the arena that owns them.
//!
//! Spawn points, chunks, and the scene refer to mobs by [`MobId`]; the arena
//! is the only owner of mob state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use wildlands_world::{AreaId, MobDefinition, MobRegistry, Vec2};

use crate::ai::{AiRecord, AiState};
use crate::spawning::SpawnPointId;

/// Stable handle of a mob instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MobId(pub u64);

impl std::fmt::Display for MobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mob types resolved once at startup and shared by every instance.
pub type MobTypes = BTreeMap<String, Arc<MobDefinition>>;

pub fn resolve_types(registry: &MobRegistry) -> MobTypes {
    registry
        .all()
        .iter()
        .map(|def| (def.type_id.clone(), Arc::new(def.clone())))
        .collect()
}

/// One live (or dead, awaiting respawn) mob.
#[derive(Debug, Clone)]
pub struct MobInstance {
    pub id: MobId,
    pub def: Arc<MobDefinition>,
    /// `None` for admin-spawned mobs.
    pub spawn_point: Option<SpawnPointId>,
    /// `None` for mobs outside every area.
    pub chunk: Option<AreaId>,
    pub health: u32,
    pub position: Vec2,
    /// Patrol anchor and leash origin.
    pub home: Vec2,
    pub spawn_radius: f32,
    pub yaw: f32,
    pub alive: bool,
    pub last_death: Option<Duration>,
    pub in_scene: bool,
    pub ai: AiRecord,
}

/// Placement data for a new instance.
#[derive(Debug, Clone)]
pub struct MobSpawn {
    pub position: Vec2,
    pub spawn_radius: f32,
    pub spawn_point: Option<SpawnPointId>,
    pub chunk: Option<AreaId>,
}

impl MobInstance {
    pub fn mob_type(&self) -> &str {
        &self.def.type_id
    }

    pub fn state(&self) -> AiState {
        self.ai.state
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Mark dead. Targets and patrol data are dropped.
    pub fn kill(&mut self, now: Duration) {
        self.alive = false;
        self.health = 0;
        self.last_death = Some(now);
        self.ai.targets.clear();
        self.ai.transition(AiState::Dead, now);
    }

    /// Bring back at `position` with full health in Idle.
    pub fn revive(&mut self, position: Vec2, now: Duration) {
        self.alive = true;
        self.health = self.def.max_health;
        self.position = position;
        self.home = position;
        self.last_death = None;
        self.ai.reset(now);
    }

    pub fn distance_from_home(&self) -> f32 {
        self.position.distance(self.home)
    }
}

#[derive(Debug, Default)]
pub struct MobArena {
    mobs: BTreeMap<MobId, MobInstance>,
    next_id: u64,
}

impl MobArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an alive, full-health, Idle instance.
    pub fn spawn(&mut self, def: Arc<MobDefinition>, spawn: MobSpawn, now: Duration) -> MobId {
        self.next_id += 1;
        let id = MobId(self.next_id);
        let instance = MobInstance {
            id,
            health: def.max_health,
            def,
            spawn_point: spawn.spawn_point,
            chunk: spawn.chunk,
            position: spawn.position,
            home: spawn.position,
            spawn_radius: spawn.spawn_radius,
            yaw: 0.0,
            alive: true,
            last_death: None,
            in_scene: false,
            ai: AiRecord::new(now),
        };
        self.mobs.insert(id, instance);
        id
    }

    pub fn get(&self, id: MobId) -> Option<&MobInstance> {
        self.mobs.get(&id)
    }

    pub fn get_mut(&mut self, id: MobId) -> Option<&mut MobInstance> {
        self.mobs.get_mut(&id)
    }

    pub fn remove(&mut self, id: MobId) -> Option<MobInstance> {
        self.mobs.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MobInstance> {
        self.mobs.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MobInstance> {
        self.mobs.values_mut()
    }

    pub fn alive_count(&self) -> usize {
        self.mobs.values().filter(|m| m.alive).count()
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildlands_world::MobBehavior;

    fn test_def() -> Arc<MobDefinition> {
        Arc::new(MobDefinition {
            type_id: "rat".into(),
            display_name: "Rat".into(),
            level: 1,
            max_health: 8,
            stats: Default::default(),
            behavior: MobBehavior::default(),
            movement_speed: 3.0,
            respawn_delay_secs: 10.0,
            xp_reward: None,
        })
    }

    fn spawn_at(x: f32, z: f32) -> MobSpawn {
        MobSpawn {
            position: Vec2::new(x, z),
            spawn_radius: 5.0,
            spawn_point: None,
            chunk: None,
        }
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let mut arena = MobArena::new();
        let a = arena.spawn(test_def(), spawn_at(0.0, 0.0), Duration::ZERO);
        let b = arena.spawn(test_def(), spawn_at(1.0, 0.0), Duration::ZERO);
        assert_ne!(a, b);
        arena.remove(a);
        let c = arena.spawn(test_def(), spawn_at(2.0, 0.0), Duration::ZERO);
        assert_ne!(a, c);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).unwrap().position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn kill_and_revive_keep_dead_iff_not_alive() {
        let mut arena = MobArena::new();
        let id = arena.spawn(test_def(), spawn_at(0.0, 0.0), Duration::ZERO);
        let mob = arena.get_mut(id).unwrap();
        assert_eq!(mob.state(), AiState::Idle);
        assert_eq!(mob.health, 8);

        mob.kill(Duration::from_secs(3));
        assert!(mob.is_dead());
        assert_eq!(mob.state(), AiState::Dead);
        assert_eq!(mob.last_death, Some(Duration::from_secs(3)));

        mob.revive(Vec2::new(2.0, 2.0), Duration::from_secs(20));
        assert!(mob.alive);
        assert_eq!(mob.state(), AiState::Idle);
        assert_eq!(mob.health, 8);
        assert_eq!(mob.home, Vec2::new(2.0, 2.0));
        assert_eq!(arena.alive_count(), 1);
    }

    #[test]
    fn resolve_types_indexes_by_id() {
        let mut registry = MobRegistry::new();
        registry.register_mob((*test_def()).clone());
        let types = resolve_types(&registry);
        assert!(types.contains_key("rat"));
    }
}
