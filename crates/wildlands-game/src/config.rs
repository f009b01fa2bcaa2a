//! Tuning knobs for the simulation core.
//!
//! Every section deserializes with defaults, so a host config only needs to
//! name the values it changes. Durations are in seconds.

use serde::Deserialize;

/// Chunk load/unload distances, measured from chunk center to player.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub load_distance: f32,
    pub unload_distance: f32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            load_distance: 120.0,
            unload_distance: 200.0,
        }
    }
}

/// Mob state machine timing and ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Interval of the high-level state pass.
    pub state_interval: f64,
    /// Interval of the aggro detection pass.
    pub aggro_interval: f64,
    /// Time spent idle before starting to patrol.
    pub idle_dwell: f64,
    /// A new patrol point is picked this often while patrolling.
    pub patrol_interval: f64,
    /// Patrol points lie within this fraction of the spawn radius.
    pub patrol_radius_factor: f32,
    /// Distance under which a destination counts as reached.
    pub arrival_distance: f32,
    pub chase_timeout: f64,
    /// Distance at which a chasing mob engages.
    pub engage_range: f32,
    /// Distance beyond which a fighting mob resumes the chase.
    pub combat_range: f32,
    pub attack_cooldown: f64,
    /// Leash length as a multiple of the spawn radius.
    pub leash_factor: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub combat_speed: f32,
    pub returning_speed: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            state_interval: 1.0,
            aggro_interval: 0.5,
            idle_dwell: 5.0,
            patrol_interval: 10.0,
            patrol_radius_factor: 0.8,
            arrival_distance: 1.0,
            chase_timeout: 30.0,
            engage_range: 2.0,
            combat_range: 3.0,
            attack_cooldown: 3.0,
            leash_factor: 2.0,
            patrol_speed: 0.5,
            chase_speed: 1.3,
            combat_speed: 0.2,
            returning_speed: 1.0,
        }
    }
}

/// Threat accounting and decay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Added each aggro pass while a player stays in aggro range.
    pub aggro_threat: f32,
    /// Added each time a player damages the mob.
    pub damage_threat: f32,
    /// Targets unseen for longer than this start losing threat.
    pub decay_after: f64,
    pub decay_per_second: f32,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            aggro_threat: 50.0,
            damage_threat: 100.0,
            decay_after: 5.0,
            decay_per_second: 10.0,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for spawn offsets, patrol points, and damage rolls.
    pub seed: u64,
    /// Players must move this far before their cached position updates.
    pub movement_threshold: f32,
    /// Spawn radius given to admin-spawned mobs.
    pub adhoc_spawn_radius: f32,
    pub chunks: ChunkConfig,
    pub ai: AiConfig,
    pub threat: ThreatConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            movement_threshold: 0.5,
            adhoc_spawn_radius: 10.0,
            chunks: ChunkConfig::default(),
            ai: AiConfig::default(),
            threat: ThreatConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
