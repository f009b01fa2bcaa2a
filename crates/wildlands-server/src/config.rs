use serde::Deserialize;
use std::path::{Path, PathBuf};
use wildlands_game::GameConfig;
use wildlands_world::Vec2;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub bots: Vec<BotConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_name")]
    pub name: String,
    /// Fixed tick length in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// A status line is logged every this many ticks. 0 = disabled.
    #[serde(default = "default_status_every")]
    pub status_every: u64,
}

fn default_name() -> String {
    "Wildlands".into()
}

fn default_tick_ms() -> u64 {
    50
}

fn default_status_every() -> u64 {
    100
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            tick_ms: default_tick_ms(),
            status_every: default_status_every(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorldSection {
    /// JSON content layered over the built-in world.
    #[serde(default)]
    pub content_dir: Option<PathBuf>,
    /// Areas loaded at startup regardless of player positions.
    #[serde(default)]
    pub warm_up: Vec<String>,
    /// Overrides `[game] seed` when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// A scripted player walking a waypoint route.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub id: String,
    #[serde(default = "default_combat_level")]
    pub combat_level: u32,
    /// Units per second.
    #[serde(default = "default_bot_speed")]
    pub speed: f32,
    pub waypoints: Vec<Vec2>,
}

fn default_combat_level() -> u32 {
    3
}

fn default_bot_speed() -> f32 {
    4.0
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Game tuning with the `[world]` seed applied.
    pub fn game_config(&self) -> GameConfig {
        let game = self.game.clone();
        match self.world.seed {
            Some(seed) => game.with_seed(seed),
            None => game,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [server]
            name = "Test Realm"
            tick_ms = 100

            [world]
            content_dir = "content"
            warm_up = ["millbrook", "river-meadow"]
            seed = 12345

            [logging]
            level = "debug"

            [game.ai]
            chase_timeout = 20.0

            [[bots]]
            id = "scout"
            combat_level = 12
            waypoints = [{ x = 0, z = 0 }, { x = 120, z = 0 }]
        "#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.name, "Test Realm");
        assert_eq!(config.server.tick_ms, 100);
        assert_eq!(config.server.status_every, 100); // default
        assert_eq!(config.world.content_dir, Some(PathBuf::from("content")));
        assert_eq!(config.world.warm_up, vec!["millbrook", "river-meadow"]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.game.ai.chase_timeout, 20.0);
        assert_eq!(config.game.ai.engage_range, 2.0);
        assert_eq!(config.bots.len(), 1);
        assert_eq!(config.bots[0].combat_level, 12);
        assert_eq!(config.bots[0].speed, 4.0); // default
        assert_eq!(config.bots[0].waypoints[1], Vec2::new(120.0, 0.0));
        assert_eq!(config.game_config().seed, 12345);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.tick_ms, 50);
        assert_eq!(config.server.name, "Wildlands");
        assert_eq!(config.logging.level, "info");
        assert!(config.world.content_dir.is_none());
        assert!(config.world.warm_up.is_empty());
        assert!(config.bots.is_empty());
        assert_eq!(config.game_config().seed, GameConfig::default().seed);
    }

    #[test]
    fn bot_without_waypoints_is_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str(
            r#"
            [[bots]]
            id = "lost"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn repository_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../server.toml");
        let config = ServerConfig::load(path).unwrap();
        assert_eq!(config.server.tick_ms, 50);
        assert!(!config.bots.is_empty());
    }
}
