//! Per-mob threat bookkeeping.

use std::cmp::Ordering;
use std::time::Duration;

use wildlands_world::Vec2;

use crate::config::ThreatConfig;
use crate::players::PlayerId;

/// A player a mob is hostile towards.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatTarget {
    pub player_id: PlayerId,
    pub last_position: Vec2,
    pub last_seen: Duration,
    pub threat: f32,
}

/// Targets ordered by threat, highest first. Equal threat keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct ThreatTable {
    targets: Vec<CombatTarget>,
}

impl ThreatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` threat for a player, inserting it if unknown.
    pub fn add_threat(&mut self, player: &PlayerId, position: Vec2, now: Duration, amount: f32) {
        match self.targets.iter_mut().find(|t| &t.player_id == player) {
            Some(t) => {
                t.threat += amount;
                t.last_position = position;
                t.last_seen = now;
            }
            None => self.targets.push(CombatTarget {
                player_id: player.clone(),
                last_position: position,
                last_seen: now,
                threat: amount,
            }),
        }
        self.sort();
    }

    /// Update the last known position of a target. Returns false if unknown.
    pub fn refresh(&mut self, player: &PlayerId, position: Vec2, now: Duration) -> bool {
        match self.targets.iter_mut().find(|t| &t.player_id == player) {
            Some(t) => {
                t.last_position = position;
                t.last_seen = now;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, player: &PlayerId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| &t.player_id != player);
        self.targets.len() != before
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Highest-threat target.
    pub fn primary(&self) -> Option<&CombatTarget> {
        self.targets.first()
    }

    pub fn get(&self, player: &PlayerId) -> Option<&CombatTarget> {
        self.targets.iter().find(|t| &t.player_id == player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Bleed threat from targets not seen for `decay_after`. Targets reaching
    /// zero are dropped.
    pub fn decay(&mut self, now: Duration, elapsed: Duration, cfg: &ThreatConfig) {
        if self.targets.is_empty() || elapsed.is_zero() {
            return;
        }
        let after = crate::clock::secs(cfg.decay_after);
        let loss = cfg.decay_per_second * elapsed.as_secs_f32();
        for t in &mut self.targets {
            if now.saturating_sub(t.last_seen) > after {
                t.threat -= loss;
            }
        }
        self.targets.retain(|t| t.threat > 0.0);
        self.sort();
    }

    fn sort(&mut self) {
        // stable, so ties keep the earlier target in front
        self.targets
            .sort_by(|a, b| b.threat.partial_cmp(&a.threat).unwrap_or(Ordering::Equal));
    }
}
