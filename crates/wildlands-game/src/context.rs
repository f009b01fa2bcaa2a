use std::time::Duration;

use rand::rngs::StdRng;

use crate::events::{EventSink, GameEvent};
use crate::players::PlayerDirectory;
use crate::scene::{Scene, SceneObject};

/// Mutable context passed to the simulation passes during a tick.
pub struct SimContext<'a> {
    /// Clock reading taken once at the start of the tick.
    pub now: Duration,
    pub rng: &'a mut StdRng,
    pub scene: &'a mut dyn Scene,
    pub events: &'a mut dyn EventSink,
    pub players: &'a dyn PlayerDirectory,
}

impl SimContext<'_> {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.emit(event);
    }

    pub fn show(&mut self, obj: SceneObject) {
        self.scene.add_to_scene(obj);
    }

    pub fn hide(&mut self, obj: SceneObject) {
        self.scene.remove_from_scene(obj);
    }
}
