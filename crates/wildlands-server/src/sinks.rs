//! Log-backed rendering and combat collaborators.
//!
//! The server has no renderer or combat/loot layer, so scene changes and
//! game events end up in the log.

use tracing::{debug, info, trace};
use wildlands_game::{GameEvent, Scene, SceneIndex, SceneObject};

/// Scene that logs every change and keeps a [`SceneIndex`] of what is shown.
pub struct LoggedScene {
    index: SceneIndex,
}

impl LoggedScene {
    pub fn new(index: SceneIndex) -> Self {
        Self { index }
    }
}

impl Scene for LoggedScene {
    fn add_to_scene(&mut self, obj: SceneObject) {
        trace!("scene + {obj:?}");
        self.index.add_to_scene(obj);
    }

    fn remove_from_scene(&mut self, obj: SceneObject) {
        trace!("scene - {obj:?}");
        self.index.remove_from_scene(obj);
    }
}

/// Stand-in for the combat/loot consumer.
pub fn report_event(event: &GameEvent) {
    match event {
        GameEvent::MobDied {
            mob_id,
            mob_type,
            position,
            killer_id,
            xp_reward,
        } => info!(
            "{} #{} killed by {} at {} ({} xp)",
            mob_type, mob_id, killer_id, position, xp_reward
        ),
        GameEvent::MobAttack {
            mob_id,
            target_id,
            damage,
        } => debug!("Mob #{} hits {} for {}", mob_id, target_id, damage),
        GameEvent::MobRespawned { mob_id, position } => {
            debug!("Mob #{} respawned at {}", mob_id, position)
        }
        GameEvent::ChunkLoaded { chunk } => debug!("Chunk {} is live", chunk),
        GameEvent::ChunkUnloaded { chunk } => debug!("Chunk {} went dormant", chunk),
        GameEvent::ResourceRespawned { resource_id } => {
            debug!("Resource {} is back", resource_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildlands_game::MobId;

    #[test]
    fn logged_scene_updates_index() {
        let index = SceneIndex::new();
        let mut scene = LoggedScene::new(index.clone());
        scene.add_to_scene(SceneObject::Mob(MobId(1)));
        scene.add_to_scene(SceneObject::Npc("guide".into()));
        assert_eq!(index.len(), 2);
        scene.remove_from_scene(SceneObject::Mob(MobId(1)));
        assert!(!index.contains_mob(MobId(1)));
        assert_eq!(index.len(), 1);
    }
}
