//! Per-mob AI record.

use std::time::Duration;

use wildlands_world::Vec2;

use super::threat::ThreatTable;

/// High-level behavior state of a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
    Idle,
    Patrol,
    Chase,
    Combat,
    Returning,
    Dead,
}

impl AiState {
    pub fn name(self) -> &'static str {
        match self {
            AiState::Idle => "idle",
            AiState::Patrol => "patrol",
            AiState::Chase => "chase",
            AiState::Combat => "combat",
            AiState::Returning => "returning",
            AiState::Dead => "dead",
        }
    }

    /// States in which the mob pursues a target.
    pub fn is_hostile(self) -> bool {
        matches!(self, AiState::Chase | AiState::Combat)
    }
}

impl std::fmt::Display for AiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// AI bookkeeping for one mob. Lives inside the mob record, so every mob
/// has exactly one.
#[derive(Debug, Clone)]
pub struct AiRecord {
    pub state: AiState,
    /// When the current state was entered.
    pub state_since: Duration,
    pub patrol_target: Option<Vec2>,
    /// Deadline for picking the next patrol point.
    pub next_patrol_pick: Duration,
    /// Earliest time the next attack may land.
    pub attack_ready_at: Duration,
    pub chase_started: Duration,
    pub targets: ThreatTable,
}

impl AiRecord {
    pub fn new(now: Duration) -> Self {
        Self {
            state: AiState::Idle,
            state_since: now,
            patrol_target: None,
            next_patrol_pick: now,
            attack_ready_at: now,
            chase_started: now,
            targets: ThreatTable::new(),
        }
    }

    /// Switch state. Returns `false` if already in `to`.
    pub fn transition(&mut self, to: AiState, now: Duration) -> bool {
        if self.state == to {
            return false;
        }
        tracing::trace!("AI state {} -> {}", self.state, to);
        self.state = to;
        self.state_since = now;
        match to {
            AiState::Chase => self.chase_started = now,
            AiState::Idle | AiState::Returning | AiState::Dead => self.patrol_target = None,
            AiState::Patrol | AiState::Combat => {}
        }
        true
    }

    /// Fresh record after a respawn: Idle, no targets, no cooldown.
    pub fn reset(&mut self, now: Duration) {
        *self = Self::new(now);
    }

    pub fn time_in_state(&self, now: Duration) -> Duration {
        now.saturating_sub(self.state_since)
    }

    pub fn cooldown_remaining(&self, now: Duration) -> Duration {
        self.attack_ready_at.saturating_sub(now)
    }
}
