//! Simulation core: mobs, spawn points, chunks, and the behavior engine.
//!
//! Everything runs inside [`GameWorld::tick`] on one thread. The outside
//! world is reached only through the collaborator traits ([`PlayerDirectory`],
//! [`Scene`], [`EventSink`], [`Clock`]).

pub mod ai;
pub mod chunk;
pub mod clock;
pub mod combat;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod game_world;
pub mod mob;
pub mod players;
pub mod scene;
pub mod spawning;

pub use ai::{AiState, DamageOutcome};
pub use chunk::{Chunk, ChunkManager};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use combat::{DamageModel, StrengthRoll};
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use events::{EventQueue, EventSink, GameEvent};
pub use game_world::{Collaborators, GameWorld, WorldStatus};
pub use mob::{MobId, MobInstance};
pub use players::{InMemoryPlayers, PlayerDirectory, PlayerId, PlayerInfo};
pub use scene::{Scene, SceneIndex, SceneObject};
pub use spawning::{SpawnPoint, SpawnPointId};
