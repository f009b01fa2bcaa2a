//! Mob AI: state machine, threat tables, and steering.

pub mod engine;
pub mod pathfinding;
pub mod state;
pub mod threat;

pub use engine::{notices, BehaviorEngine, DamageOutcome};
pub use state::{AiRecord, AiState};
pub use threat::{CombatTarget, ThreatTable};
