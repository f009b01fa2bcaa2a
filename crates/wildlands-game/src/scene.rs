//! Rendering/scene collaborator.
//!
//! The simulation never builds meshes or colliders; it only tells the scene
//! which objects should currently exist.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use wildlands_world::AreaId;

use crate::mob::MobId;

/// Something the simulation can place in or remove from the scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneObject {
    /// Ground mesh of a chunk.
    Terrain(AreaId),
    Npc(String),
    Resource(String),
    Mob(MobId),
}

pub trait Scene: Send {
    fn add_to_scene(&mut self, obj: SceneObject);
    fn remove_from_scene(&mut self, obj: SceneObject);
}

/// Set of objects currently in the scene. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    objects: Arc<Mutex<BTreeSet<SceneObject>>>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, obj: &SceneObject) -> bool {
        self.lock().contains(obj)
    }

    pub fn contains_mob(&self, id: MobId) -> bool {
        self.contains(&SceneObject::Mob(id))
    }

    pub fn mobs(&self) -> Vec<MobId> {
        self.lock()
            .iter()
            .filter_map(|o| match o {
                SceneObject::Mob(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<SceneObject>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Scene for SceneIndex {
    fn add_to_scene(&mut self, obj: SceneObject) {
        if !self.lock().insert(obj.clone()) {
            tracing::warn!("Scene already contains {obj:?}");
        }
    }

    fn remove_from_scene(&mut self, obj: SceneObject) {
        if !self.lock().remove(&obj) {
            tracing::warn!("Scene does not contain {obj:?}");
        }
    }
}
