//! Player Directory collaborator and the Player Position Tracker.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use wildlands_world::Vec2;

/// Identifier of a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the simulation needs to know about a player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub position: Vec2,
    pub combat_level: u32,
}

/// Read-only view of connected players, owned by the host.
pub trait PlayerDirectory: Send {
    fn players(&self) -> Vec<PlayerInfo>;
    fn player(&self, id: &PlayerId) -> Option<PlayerInfo>;
}

/// Shared in-memory player directory. Clones share the same table, so the
/// host keeps one handle for writing while the world holds another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayers {
    inner: Arc<RwLock<BTreeMap<PlayerId, PlayerInfo>>>,
}

impl InMemoryPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player record.
    pub fn upsert(&self, info: PlayerInfo) {
        let mut table = self.inner.write().unwrap_or_else(|e| e.into_inner());
        table.insert(info.id.clone(), info);
    }

    /// Move a known player. Returns `false` if the player is not present.
    pub fn move_to(&self, id: &PlayerId, position: Vec2) -> bool {
        let mut table = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match table.get_mut(id) {
            Some(p) => {
                p.position = position;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &PlayerId) -> Option<PlayerInfo> {
        let mut table = self.inner.write().unwrap_or_else(|e| e.into_inner());
        table.remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerDirectory for InMemoryPlayers {
    fn players(&self) -> Vec<PlayerInfo> {
        let table = self.inner.read().unwrap_or_else(|e| e.into_inner());
        table.values().cloned().collect()
    }

    fn player(&self, id: &PlayerId) -> Option<PlayerInfo> {
        let table = self.inner.read().unwrap_or_else(|e| e.into_inner());
        table.get(id).cloned()
    }
}

/// Last significant position of one player.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPlayer {
    pub position: Vec2,
    pub combat_level: u32,
    pub updated_at: Duration,
}

/// Cache of last-known player positions.
///
/// Positions only update once a player has moved at least `threshold`
/// units, which bounds how often chunk decisions need re-evaluating. The
/// cache is refreshed once per tick and read-only for the rest of it.
#[derive(Debug, Clone)]
pub struct PlayerPositionTracker {
    players: BTreeMap<PlayerId, TrackedPlayer>,
    threshold: f32,
}

impl PlayerPositionTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            players: BTreeMap::new(),
            threshold,
        }
    }

    /// Refresh from a directory listing. Returns `true` when a player joined,
    /// left, or moved significantly.
    pub fn refresh(&mut self, current: Vec<PlayerInfo>, now: Duration) -> bool {
        let mut changed = false;

        let before = self.players.len();
        self.players
            .retain(|id, _| current.iter().any(|p| &p.id == id));
        if self.players.len() != before {
            changed = true;
        }

        for info in current {
            match self.players.get_mut(&info.id) {
                Some(tracked) => {
                    tracked.combat_level = info.combat_level;
                    if tracked.position.distance(info.position) >= self.threshold {
                        tracked.position = info.position;
                        tracked.updated_at = now;
                        changed = true;
                    }
                }
                None => {
                    self.players.insert(
                        info.id,
                        TrackedPlayer {
                            position: info.position,
                            combat_level: info.combat_level,
                            updated_at: now,
                        },
                    );
                    changed = true;
                }
            }
        }

        changed
    }

    pub fn get(&self, id: &PlayerId) -> Option<&TrackedPlayer> {
        self.players.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &TrackedPlayer)> {
        self.players.iter()
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.players.values().map(|p| p.position).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
