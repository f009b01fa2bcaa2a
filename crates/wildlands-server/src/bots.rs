//! Scripted players that walk waypoint routes and publish their positions
//! to the in-memory player directory.

use tracing::{debug, warn};
use wildlands_game::ai::pathfinding::step_toward;
use wildlands_game::{InMemoryPlayers, PlayerId, PlayerInfo};
use wildlands_world::Vec2;

use crate::config::BotConfig;

#[derive(Debug, Clone)]
pub struct Bot {
    pub id: PlayerId,
    pub combat_level: u32,
    pub speed: f32,
    pub position: Vec2,
    route: Vec<Vec2>,
    next: usize,
}

impl Bot {
    /// A bot standing on its first waypoint. `None` for an empty route.
    pub fn new(config: &BotConfig) -> Option<Self> {
        let start = *config.waypoints.first()?;
        Some(Self {
            id: PlayerId::new(config.id.clone()),
            combat_level: config.combat_level,
            speed: config.speed.max(0.0),
            position: start,
            route: config.waypoints.clone(),
            next: 1 % config.waypoints.len(),
        })
    }

    /// Walk for `dt` seconds. The route loops back to its first waypoint.
    pub fn advance(&mut self, dt: f32) {
        let mut budget = self.speed * dt;
        // A long step can pass several waypoints.
        for _ in 0..self.route.len() {
            let goal = self.route[self.next];
            let remaining = self.position.distance(goal);
            if remaining > budget {
                self.position = step_toward(self.position, goal, budget, 0.0);
                return;
            }
            self.position = goal;
            budget -= remaining;
            self.next = (self.next + 1) % self.route.len();
        }
    }

    fn info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id.clone(),
            position: self.position,
            combat_level: self.combat_level,
        }
    }
}

/// All bots and the directory they write to.
pub struct BotFleet {
    bots: Vec<Bot>,
    players: InMemoryPlayers,
}

impl BotFleet {
    /// Build every bot with a usable route and register it as a player.
    pub fn new(configs: &[BotConfig], players: InMemoryPlayers) -> Self {
        let mut bots = Vec::new();
        for cfg in configs {
            match Bot::new(cfg) {
                Some(bot) => {
                    players.upsert(bot.info());
                    bots.push(bot);
                }
                None => warn!("Bot {} has no waypoints, skipping", cfg.id),
            }
        }
        Self { bots, players }
    }

    /// Move every bot and publish the new positions.
    pub fn step(&mut self, dt: f32) {
        for bot in &mut self.bots {
            bot.advance(dt);
            if !self.players.move_to(&bot.id, bot.position) {
                debug!("Bot {} re-registered", bot.id);
                self.players.upsert(bot.info());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}
