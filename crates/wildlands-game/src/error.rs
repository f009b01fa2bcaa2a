//! Errors returned by the admin/control surface of the game world.
//!
//! The tick loop itself never returns these: per-mob and per-chunk faults
//! are logged and skipped.

use thiserror::Error;
use wildlands_world::AreaId;

use crate::mob::MobId;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("unknown mob type: {0}")]
    UnknownMobType(String),

    #[error("mob not found: {0}")]
    MobNotFound(MobId),

    #[error("mob {0} is already dead")]
    MobDead(MobId),

    #[error("chunk not found: {0}")]
    ChunkNotFound(AreaId),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),
}

pub type GameResult<T> = Result<T, GameError>;
