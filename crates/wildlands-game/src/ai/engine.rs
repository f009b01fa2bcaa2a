//! Mob behavior engine: aggro detection, the state machine, and steering.
//!
//! Three passes run at different rates. The aggro pass scans the tracker
//! snapshot for aggressive mobs; the state pass evaluates transitions; the
//! movement pass steers every tick and lands attacks.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};
use wildlands_world::{MobBehavior, Vec2};

use crate::clock::secs;
use crate::combat::DamageModel;
use crate::config::{AiConfig, ThreatConfig};
use crate::context::SimContext;
use crate::events::GameEvent;
use crate::mob::{MobArena, MobInstance};
use crate::players::{PlayerId, PlayerPositionTracker};
use crate::scene::SceneObject;

use super::pathfinding::{step_toward, yaw_toward};
use super::state::AiState;

/// Result of damaging a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub remaining_health: u32,
    pub killed: bool,
}

/// Level-sensitivity rule: mobs that ignore low-level players skip anyone
/// above their threshold.
pub fn notices(behavior: &MobBehavior, combat_level: u32) -> bool {
    !(behavior.ignore_low_level_players && combat_level > behavior.level_threshold)
}

pub struct BehaviorEngine {
    ai: AiConfig,
    threat: ThreatConfig,
    damage: Box<dyn DamageModel>,
}

impl BehaviorEngine {
    pub fn new(ai: AiConfig, threat: ThreatConfig, damage: Box<dyn DamageModel>) -> Self {
        Self { ai, threat, damage }
    }

    pub fn ai_config(&self) -> &AiConfig {
        &self.ai
    }

    pub fn set_damage_model(&mut self, damage: Box<dyn DamageModel>) {
        self.damage = damage;
    }

    // -----------------------------------------------------------------------
    // Aggro
    // -----------------------------------------------------------------------

    /// Add aggro threat for tracked players in range, then decay stale threat.
    /// `elapsed` is the time since the previous aggro pass.
    pub fn aggro_pass(
        &self,
        mobs: &mut MobArena,
        players: &PlayerPositionTracker,
        now: Duration,
        elapsed: Duration,
    ) {
        for mob in mobs.iter_mut().filter(|m| m.alive) {
            let behavior = mob.def.behavior;
            if behavior.aggressive {
                for (id, player) in players.iter() {
                    if mob.position.distance(player.position) > behavior.aggro_range {
                        continue;
                    }
                    if !notices(&behavior, player.combat_level) {
                        continue;
                    }
                    if mob.ai.targets.get(id).is_none() {
                        debug!("Mob {} ({}) aggroed on {}", mob.id, mob.mob_type(), id);
                    }
                    mob.ai
                        .targets
                        .add_threat(id, player.position, now, self.threat.aggro_threat);
                }
            }
            mob.ai.targets.decay(now, elapsed, &self.threat);
        }
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    /// Evaluate state transitions for every alive mob. Dead mobs are left to
    /// the respawn check.
    pub fn state_pass(&self, mobs: &mut MobArena, rng: &mut StdRng, now: Duration) {
        for mob in mobs.iter_mut().filter(|m| m.alive) {
            let before = mob.ai.state;
            self.evaluate(mob, rng, now);
            if mob.ai.state != before {
                debug!(
                    "Mob {} ({}) {} -> {}",
                    mob.id,
                    mob.mob_type(),
                    before,
                    mob.ai.state
                );
            }
        }
    }

    fn evaluate(&self, mob: &mut MobInstance, rng: &mut StdRng, now: Duration) {
        let leash = self.ai.leash_factor * mob.spawn_radius;
        match mob.ai.state {
            AiState::Idle => {
                if !mob.ai.targets.is_empty() {
                    mob.ai.transition(AiState::Chase, now);
                } else if mob.ai.time_in_state(now) >= secs(self.ai.idle_dwell) {
                    mob.ai.transition(AiState::Patrol, now);
                    self.pick_patrol_point(mob, rng, now);
                }
            }
            AiState::Patrol => {
                if !mob.ai.targets.is_empty() {
                    mob.ai.transition(AiState::Chase, now);
                } else if now >= mob.ai.next_patrol_pick || mob.ai.patrol_target.is_none() {
                    self.pick_patrol_point(mob, rng, now);
                }
            }
            AiState::Chase => {
                let to_target = mob
                    .ai
                    .targets
                    .primary()
                    .map(|t| mob.position.distance(t.last_position));
                let Some(to_target) = to_target else {
                    mob.ai.transition(AiState::Returning, now);
                    return;
                };
                if now.saturating_sub(mob.ai.chase_started) > secs(self.ai.chase_timeout) {
                    mob.ai.targets.clear();
                    mob.ai.transition(AiState::Returning, now);
                } else if mob.distance_from_home() > leash {
                    mob.ai.targets.clear();
                    mob.ai.transition(AiState::Returning, now);
                } else if to_target <= self.ai.engage_range {
                    mob.ai.transition(AiState::Combat, now);
                }
            }
            AiState::Combat => {
                let to_target = mob
                    .ai
                    .targets
                    .primary()
                    .map(|t| mob.position.distance(t.last_position));
                match to_target {
                    None => {
                        mob.ai.transition(AiState::Returning, now);
                    }
                    Some(d) if d > self.ai.combat_range => {
                        mob.ai.transition(AiState::Chase, now);
                    }
                    Some(_) => {}
                }
            }
            AiState::Returning => {
                if mob.distance_from_home() < self.ai.arrival_distance {
                    mob.ai.transition(AiState::Idle, now);
                }
            }
            AiState::Dead => {}
        }
    }

    fn pick_patrol_point(&self, mob: &mut MobInstance, rng: &mut StdRng, now: Duration) {
        let angle = rng.gen::<f32>() * TAU;
        let radius = rng.gen::<f32>() * mob.spawn_radius * self.ai.patrol_radius_factor;
        mob.ai.patrol_target = Some(mob.home.offset_polar(angle, radius));
        mob.ai.next_patrol_pick = now + secs(self.ai.patrol_interval);
    }

    // -----------------------------------------------------------------------
    // Movement and attacks
    // -----------------------------------------------------------------------

    /// Steer every alive mob by `dt` and land attacks that are off cooldown.
    pub fn movement_pass(&self, mobs: &mut MobArena, ctx: &mut SimContext<'_>, dt: Duration) {
        let dt = dt.as_secs_f32();
        for mob in mobs.iter_mut().filter(|m| m.alive) {
            match mob.ai.state {
                AiState::Patrol => {
                    let Some(goal) = mob.ai.patrol_target else {
                        mob.ai.transition(AiState::Idle, ctx.now);
                        continue;
                    };
                    self.steer(mob, goal, self.ai.patrol_speed, 0.0, dt);
                    if mob.position.distance(goal) < self.ai.arrival_distance {
                        mob.ai.transition(AiState::Idle, ctx.now);
                    }
                }
                AiState::Chase | AiState::Combat => {
                    let live = self.refresh_primary(mob, ctx);
                    let Some(goal) = mob.ai.targets.primary().map(|t| t.last_position) else {
                        continue;
                    };
                    if mob.ai.state == AiState::Combat
                        && live.is_some_and(|d| d > self.ai.combat_range)
                    {
                        mob.ai.transition(AiState::Chase, ctx.now);
                        debug!("Mob {} ({}) Combat -> Chase", mob.id, mob.mob_type());
                    }
                    let speed = if mob.ai.state == AiState::Chase {
                        self.ai.chase_speed
                    } else {
                        self.ai.combat_speed
                    };
                    self.steer(mob, goal, speed, self.ai.engage_range * 0.5, dt);
                    if let (AiState::Combat, Some(distance)) = (mob.ai.state, live) {
                        self.try_attack(mob, distance, ctx);
                    }
                }
                AiState::Returning => {
                    let home = mob.home;
                    self.steer(mob, home, self.ai.returning_speed, 0.0, dt);
                }
                AiState::Idle | AiState::Dead => {}
            }
        }
    }

    /// Re-read the primary target from the player directory and return its
    /// live distance. Departed players are dropped; players beyond chase range
    /// keep their last-known position.
    fn refresh_primary(&self, mob: &mut MobInstance, ctx: &SimContext<'_>) -> Option<f32> {
        while let Some(id) = mob.ai.targets.primary().map(|t| t.player_id.clone()) {
            match ctx.players.player(&id) {
                Some(info) => {
                    let distance = mob.position.distance(info.position);
                    if distance <= mob.def.behavior.chase_range {
                        mob.ai.targets.refresh(&id, info.position, ctx.now);
                    }
                    return Some(distance);
                }
                None => {
                    debug!("Mob {} lost target {} (gone)", mob.id, id);
                    mob.ai.targets.remove(&id);
                }
            }
        }
        None
    }

    fn steer(&self, mob: &mut MobInstance, goal: Vec2, multiplier: f32, stop_at: f32, dt: f32) {
        let max_step = mob.def.movement_speed * multiplier * dt;
        let next = step_toward(mob.position, goal, max_step, stop_at);
        if next != mob.position {
            mob.yaw = yaw_toward(mob.position, next);
            trace!("Mob {} moved {} -> {}", mob.id, mob.position, next);
            mob.position = next;
        }
    }

    /// `distance` is the live distance to the primary target.
    fn try_attack(&self, mob: &mut MobInstance, distance: f32, ctx: &mut SimContext<'_>) {
        if !mob.ai.cooldown_remaining(ctx.now).is_zero() || distance > self.ai.combat_range {
            return;
        }
        let Some(target_id) = mob.ai.targets.primary().map(|t| t.player_id.clone()) else {
            return;
        };
        let damage = self.damage.roll(&mob.def, ctx.rng);
        mob.ai.attack_ready_at = ctx.now + secs(self.ai.attack_cooldown);
        trace!("Mob {} attacks {} for {}", mob.id, target_id, damage);
        ctx.emit(GameEvent::MobAttack {
            mob_id: mob.id,
            target_id,
            damage,
        });
    }

    // -----------------------------------------------------------------------
    // Damage and death
    // -----------------------------------------------------------------------

    /// Apply player damage to an alive mob. The attacker becomes a high-threat
    /// target and the mob enters Combat; at zero health it dies, leaves the
    /// scene, and a death event is emitted.
    pub fn apply_damage(
        &self,
        mob: &mut MobInstance,
        amount: u32,
        attacker: &PlayerId,
        ctx: &mut SimContext<'_>,
    ) -> DamageOutcome {
        mob.health = mob.health.saturating_sub(amount);
        let attacker_pos = ctx
            .players
            .player(attacker)
            .map(|p| p.position)
            .unwrap_or(mob.position);
        mob.ai
            .targets
            .add_threat(attacker, attacker_pos, ctx.now, self.threat.damage_threat);

        if mob.health > 0 {
            mob.ai.transition(AiState::Combat, ctx.now);
            return DamageOutcome {
                remaining_health: mob.health,
                killed: false,
            };
        }

        mob.kill(ctx.now);
        if mob.in_scene {
            ctx.hide(SceneObject::Mob(mob.id));
            mob.in_scene = false;
        }
        debug!("Mob {} ({}) killed by {}", mob.id, mob.mob_type(), attacker);
        ctx.emit(GameEvent::MobDied {
            mob_id: mob.id,
            mob_type: mob.def.type_id.clone(),
            position: mob.position,
            killer_id: attacker.clone(),
            xp_reward: mob.def.xp_reward(),
        });
        DamageOutcome {
            remaining_health: 0,
            killed: true,
        }
    }
}
