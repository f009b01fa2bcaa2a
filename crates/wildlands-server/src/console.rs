//! Runs parsed admin commands against the game world.

use tracing::info;
use wildlands_command::{AdminCommand, CommandRegistry, CommandResult};
use wildlands_game::{GameWorld, MobId, MobInstance, PlayerId, SceneIndex};
use wildlands_world::{AreaId, Vec2};

pub struct Console {
    registry: CommandRegistry,
    scene: SceneIndex,
}

impl Console {
    /// `scene` is a view of the world's scene, used for the status line.
    pub fn new(scene: SceneIndex) -> Self {
        Self {
            registry: CommandRegistry::new(),
            scene,
        }
    }

    /// Parse and execute one console line.
    pub fn handle(&self, world: &mut GameWorld, line: &str) -> CommandResult {
        match self.registry.parse(line) {
            Ok(cmd) => self.execute(world, cmd),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }

    pub fn execute(&self, world: &mut GameWorld, cmd: AdminCommand) -> CommandResult {
        match cmd {
            AdminCommand::Help => CommandResult::lines(self.registry.help_lines()),
            AdminCommand::Stop => {
                info!("Stop requested from console");
                CommandResult::stop("Stopping server...")
            }
            AdminCommand::Status => CommandResult::ok(self.status_line(world)),
            AdminCommand::Mobs { area } => list_mobs(world, area.map(AreaId::new)),
            AdminCommand::Chunks => {
                let lines = world
                    .chunks()
                    .map(|c| {
                        format!(
                            "{} [{}] mobs: {}, resources: {}",
                            c.id,
                            if c.loaded { "loaded" } else { "unloaded" },
                            c.mobs.len(),
                            c.resources.len()
                        )
                    })
                    .collect();
                CommandResult::lines(lines)
            }
            AdminCommand::SpawnMob { mob_type, x, z } => {
                match world.spawn_mob_at(&mob_type, Vec2::new(x, z)) {
                    Ok(id) => CommandResult::ok(format!(
                        "Spawned {} #{} at {}",
                        mob_type,
                        id,
                        Vec2::new(x, z)
                    )),
                    Err(e) => CommandResult::err(e.to_string()),
                }
            }
            AdminCommand::Despawn { mob_id } => match world.despawn_mob(MobId(mob_id)) {
                Ok(()) => CommandResult::ok(format!("Despawned mob #{mob_id}")),
                Err(e) => CommandResult::err(e.to_string()),
            },
            AdminCommand::RespawnAll => {
                let count = world.respawn_all_mobs();
                CommandResult::ok(format!("Respawned {count} mob(s)"))
            }
            AdminCommand::Damage {
                mob_id,
                amount,
                player_id,
            } => match world.apply_damage(MobId(mob_id), amount, &PlayerId::new(player_id)) {
                Ok(outcome) if outcome.killed => {
                    CommandResult::ok(format!("Mob #{mob_id} killed"))
                }
                Ok(outcome) => CommandResult::ok(format!(
                    "Mob #{mob_id} has {} health left",
                    outcome.remaining_health
                )),
                Err(e) => CommandResult::err(e.to_string()),
            },
            AdminCommand::Load { area } => match world.load_chunk(&AreaId::from(area.as_str())) {
                Ok(true) => CommandResult::ok(format!("Loaded {area}")),
                Ok(false) => CommandResult::ok(format!("{area} is already loaded")),
                Err(e) => CommandResult::err(e.to_string()),
            },
            AdminCommand::Unload { area } => {
                match world.unload_chunk(&AreaId::from(area.as_str())) {
                    Ok(true) => CommandResult::ok(format!("Unloaded {area}")),
                    Ok(false) => CommandResult::ok(format!("{area} is not loaded")),
                    Err(e) => CommandResult::err(e.to_string()),
                }
            }
            AdminCommand::Harvest { resource_id } => match world.harvest_resource(&resource_id) {
                Ok(true) => CommandResult::ok(format!("Harvested {resource_id}")),
                Ok(false) => CommandResult::ok(format!("{resource_id} is already depleted")),
                Err(e) => CommandResult::err(e.to_string()),
            },
        }
    }

    pub fn status_line(&self, world: &GameWorld) -> String {
        let s = world.status();
        format!(
            "tick {} | chunks {}/{} | mobs {}/{} alive | spawn points {} | players {} | scene objects {}",
            s.tick,
            s.chunks_loaded,
            s.chunks_total,
            s.mobs_alive,
            s.mobs_total,
            s.spawn_points,
            s.players,
            self.scene.len()
        )
    }
}

fn list_mobs(world: &GameWorld, area: Option<AreaId>) -> CommandResult {
    let mobs: Vec<&MobInstance> = match &area {
        Some(id) => {
            if world.chunk(id).is_none() {
                return CommandResult::err(format!("chunk not found: {id}"));
            }
            world.mobs_in(id)
        }
        None => world.mobs().collect(),
    };
    if mobs.is_empty() {
        return CommandResult::ok("No mobs");
    }
    CommandResult::lines(mobs.into_iter().map(describe_mob).collect())
}

fn describe_mob(mob: &MobInstance) -> String {
    format!(
        "#{} {} [{}] hp {}/{} at {} in {}",
        mob.id,
        mob.mob_type(),
        mob.state(),
        mob.health,
        mob.def.max_health,
        mob.position,
        mob.chunk.as_ref().map_or("wilderness", |c| c.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildlands_content::Content;
    use wildlands_game::combat::FixedDamage;
    use wildlands_game::{
        Collaborators, EventQueue, GameConfig, GameEvent, InMemoryPlayers, ManualClock,
    };

    struct Fixture {
        world: GameWorld,
        console: Console,
        events: EventQueue,
    }

    fn fixture() -> Fixture {
        let (registry, catalog) = Content::builtin().into_parts().unwrap();
        let scene = SceneIndex::new();
        let events = EventQueue::new();
        let io = Collaborators {
            players: Box::new(InMemoryPlayers::new()),
            scene: Box::new(scene.clone()),
            events: Box::new(events.clone()),
            clock: Box::new(ManualClock::new()),
        };
        let world = GameWorld::new(GameConfig::default(), catalog, &registry, io)
            .with_damage_model(Box::new(FixedDamage(1)));
        Fixture {
            world,
            console: Console::new(scene),
            events,
        }
    }

    #[test]
    fn help_lists_commands() {
        let mut f = fixture();
        let result = f.console.handle(&mut f.world, "help");
        assert!(result.success);
        assert!(result.messages.iter().any(|m| m.contains("spawnmob")));
    }

    #[test]
    fn parse_errors_are_reported() {
        let mut f = fixture();
        let result = f.console.handle(&mut f.world, "fly away");
        assert!(!result.success);
        assert!(result.messages[0].contains("Unknown command"));

        let result = f.console.handle(&mut f.world, "spawnmob goblin 1");
        assert!(!result.success);
        assert!(result.messages[0].starts_with("Usage:"));
    }

    #[test]
    fn stop_flags_shutdown() {
        let mut f = fixture();
        let result = f.console.handle(&mut f.world, "/stop");
        assert!(result.should_stop);
    }

    #[test]
    fn load_then_list_mobs() {
        let mut f = fixture();
        let result = f.console.handle(&mut f.world, "load river-meadow");
        assert!(result.success);
        assert_eq!(result.messages[0], "Loaded river-meadow");

        let again = f.console.handle(&mut f.world, "load river-meadow");
        assert_eq!(again.messages[0], "river-meadow is already loaded");

        let mobs = f.console.handle(&mut f.world, "mobs river-meadow");
        assert_eq!(mobs.messages.len(), 7);
        assert!(mobs.messages.iter().all(|m| m.contains("river-meadow")));

        let status = f.console.handle(&mut f.world, "status");
        assert!(status.messages[0].contains("chunks 1/5"));
        assert!(status.messages[0].contains("mobs 7/7 alive"));
    }

    #[test]
    fn unknown_area_fails() {
        let mut f = fixture();
        assert!(!f.console.handle(&mut f.world, "load atlantis").success);
        assert!(!f.console.handle(&mut f.world, "mobs atlantis").success);
        assert!(!f.console.handle(&mut f.world, "unload atlantis").success);
    }

    #[test]
    fn spawn_damage_and_kill_adhoc_mob() {
        let mut f = fixture();
        let spawned = f.console.handle(&mut f.world, "spawnmob goblin 0 0");
        assert!(spawned.success, "{:?}", spawned.messages);
        let id = f.world.mobs().next().unwrap().id;
        let hp = f.world.mob(id).unwrap().health;

        let hit = f
            .console
            .handle(&mut f.world, &format!("damage {} 1 alice", id.0));
        assert!(hit.success);
        assert!(hit.messages[0].contains(&format!("{} health left", hp - 1)));

        let kill = f
            .console
            .handle(&mut f.world, &format!("damage {} 1000 alice", id.0));
        assert_eq!(kill.messages[0], format!("Mob #{} killed", id.0));
        assert!(f.world.mob(id).is_none());
        assert!(f
            .events
            .drain()
            .iter()
            .any(|e| matches!(e, GameEvent::MobDied { mob_id, .. } if *mob_id == id)));

        let gone = f
            .console
            .handle(&mut f.world, &format!("despawn {}", id.0));
        assert!(!gone.success);
    }

    #[test]
    fn spawn_unknown_type_fails() {
        let mut f = fixture();
        let result = f.console.handle(&mut f.world, "spawnmob dragon 0 0");
        assert!(!result.success);
        assert!(result.messages[0].contains("unknown mob type"));
    }

    #[test]
    fn harvest_twice() {
        let mut f = fixture();
        f.console.handle(&mut f.world, "load millbrook");
        let first = f.console.handle(&mut f.world, "harvest millbrook-well");
        assert_eq!(first.messages[0], "Harvested millbrook-well");
        let second = f.console.handle(&mut f.world, "harvest millbrook-well");
        assert_eq!(second.messages[0], "millbrook-well is already depleted");
        assert!(!f.console.handle(&mut f.world, "harvest nothing").success);
    }

    #[test]
    fn respawnall_after_despawn() {
        let mut f = fixture();
        f.console.handle(&mut f.world, "load river-meadow");
        let id = f.world.mobs().next().unwrap().id;
        assert!(f
            .console
            .handle(&mut f.world, &format!("despawn {}", id.0))
            .success);
        let result = f.console.handle(&mut f.world, "respawnall");
        assert_eq!(result.messages[0], "Respawned 1 mob(s)");
        assert_eq!(f.world.status().mobs_alive, 7);
    }
}
