//! Events emitted by the simulation for the host's combat/loot layer.

use std::sync::{Arc, Mutex};

use wildlands_world::{AreaId, Vec2};

use crate::mob::MobId;
use crate::players::PlayerId;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A mob was killed. Loot and XP are the consumer's business.
    MobDied {
        mob_id: MobId,
        mob_type: String,
        position: Vec2,
        killer_id: PlayerId,
        xp_reward: u32,
    },
    /// A mob swung at a player. Applying the damage is up to the consumer.
    MobAttack {
        mob_id: MobId,
        target_id: PlayerId,
        damage: u32,
    },
    /// A dead mob is alive again (visible only if its chunk is loaded).
    MobRespawned { mob_id: MobId, position: Vec2 },
    ChunkLoaded { chunk: AreaId },
    ChunkUnloaded { chunk: AreaId },
    ResourceRespawned { resource_id: String },
}

/// Fire-and-forget receiver of game events.
pub trait EventSink: Send {
    fn emit(&mut self, event: GameEvent);
}

/// Queue of pending events. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let mut q = EventQueue::new();
        let reader = q.clone();
        q.emit(GameEvent::ChunkLoaded {
            chunk: AreaId::from("a"),
        });
        q.emit(GameEvent::ChunkUnloaded {
            chunk: AreaId::from("a"),
        });
        assert_eq!(reader.len(), 2);
        let drained = reader.drain();
        assert!(matches!(drained[0], GameEvent::ChunkLoaded { .. }));
        assert!(matches!(drained[1], GameEvent::ChunkUnloaded { .. }));
        assert!(q.is_empty());
    }
}
