//! Admin console commands: tokenizer, registry, and typed parsing.
//!
//! This crate only turns console lines into [`AdminCommand`]s. Executing
//! them against a world is up to the host.

pub mod error;

use std::collections::HashMap;

pub use error::CommandError;

/// A parsed admin command.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Help,
    Stop,
    Status,
    /// List mobs, optionally only those of one area.
    Mobs { area: Option<String> },
    Chunks,
    SpawnMob { mob_type: String, x: f32, z: f32 },
    Despawn { mob_id: u64 },
    RespawnAll,
    Damage {
        mob_id: u64,
        amount: u32,
        player_id: String,
    },
    Load { area: String },
    Unload { area: String },
    Harvest { resource_id: String },
}

/// Result returned to the console after running a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    /// Whether the command executed successfully.
    pub success: bool,
    /// Lines to print back to the operator.
    pub messages: Vec<String>,
    /// If true, the host should shut down.
    pub should_stop: bool,
}

impl CommandResult {
    /// Create a successful result with a single message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
            should_stop: false,
        }
    }

    /// Successful result with several lines.
    pub fn lines(messages: Vec<String>) -> Self {
        Self {
            success: true,
            messages,
            should_stop: false,
        }
    }

    /// Create a failed result with a single message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            messages: vec![message.into()],
            should_stop: false,
        }
    }

    pub fn stop(message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
            should_stop: true,
        }
    }
}

/// Function pointer type for argument parsers.
pub type ParseFn = fn(&Args<'_>) -> Result<AdminCommand, CommandError>;

/// A registered command.
pub struct CommandEntry {
    pub name: String,
    pub usage: String,
    pub description: String,
    pub parse: ParseFn,
}

/// Split a console line on whitespace. A leading `/` is ignored.
pub fn tokenize(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);
    line.split_whitespace().map(str::to_string).collect()
}

/// Positional arguments of one invocation.
pub struct Args<'a> {
    command: &'a CommandEntry,
    values: &'a [String],
}

impl Args<'_> {
    fn missing(&self) -> CommandError {
        CommandError::MissingArgument {
            command: self.command.name.clone(),
            usage: self.command.usage.clone(),
        }
    }

    /// Fail if more than `n` arguments were given.
    pub fn at_most(&self, n: usize) -> Result<(), CommandError> {
        if self.values.len() > n {
            return Err(CommandError::TooManyArguments {
                command: self.command.name.clone(),
                usage: self.command.usage.clone(),
            });
        }
        Ok(())
    }

    pub fn string(&self, index: usize) -> Result<String, CommandError> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| self.missing())
    }

    pub fn optional(&self, index: usize) -> Option<String> {
        self.values.get(index).cloned()
    }

    /// Parse argument `index` as `T`, naming it `argument` in errors.
    pub fn parsed<T: std::str::FromStr>(
        &self,
        index: usize,
        argument: &'static str,
    ) -> Result<T, CommandError> {
        let raw = self.values.get(index).ok_or_else(|| self.missing())?;
        raw.parse().map_err(|_| CommandError::InvalidArgument {
            command: self.command.name.clone(),
            argument,
            value: raw.clone(),
        })
    }

    pub fn finite(&self, index: usize, argument: &'static str) -> Result<f32, CommandError> {
        let value: f32 = self.parsed(index, argument)?;
        if !value.is_finite() {
            return Err(CommandError::InvalidArgument {
                command: self.command.name.clone(),
                argument,
                value: value.to_string(),
            });
        }
        Ok(value)
    }
}

/// Registry of available console commands.
pub struct CommandRegistry {
    commands: HashMap<String, CommandEntry>,
}

impl CommandRegistry {
    /// Create a registry with every admin command.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };
        registry.register("help", "help", "List available commands", |a| {
            a.at_most(0)?;
            Ok(AdminCommand::Help)
        });
        registry.register("stop", "stop", "Stop the server", |a| {
            a.at_most(0)?;
            Ok(AdminCommand::Stop)
        });
        registry.register("status", "status", "Show world status", |a| {
            a.at_most(0)?;
            Ok(AdminCommand::Status)
        });
        registry.register("mobs", "mobs [area]", "List mobs", |a| {
            a.at_most(1)?;
            Ok(AdminCommand::Mobs {
                area: a.optional(0),
            })
        });
        registry.register("chunks", "chunks", "List chunks and their state", |a| {
            a.at_most(0)?;
            Ok(AdminCommand::Chunks)
        });
        registry.register(
            "spawnmob",
            "spawnmob <type> <x> <z>",
            "Spawn a mob at a position",
            |a| {
                a.at_most(3)?;
                Ok(AdminCommand::SpawnMob {
                    mob_type: a.string(0)?,
                    x: a.finite(1, "x")?,
                    z: a.finite(2, "z")?,
                })
            },
        );
        registry.register("despawn", "despawn <mobId>", "Remove a mob now", |a| {
            a.at_most(1)?;
            Ok(AdminCommand::Despawn {
                mob_id: a.parsed(0, "mob id")?,
            })
        });
        registry.register(
            "respawnall",
            "respawnall",
            "Revive all dead spawn-point mobs",
            |a| {
                a.at_most(0)?;
                Ok(AdminCommand::RespawnAll)
            },
        );
        registry.register(
            "damage",
            "damage <mobId> <amount> <playerId>",
            "Damage a mob on behalf of a player",
            |a| {
                a.at_most(3)?;
                Ok(AdminCommand::Damage {
                    mob_id: a.parsed(0, "mob id")?,
                    amount: a.parsed(1, "amount")?,
                    player_id: a.string(2)?,
                })
            },
        );
        registry.register("load", "load <area>", "Force-load a chunk", |a| {
            a.at_most(1)?;
            Ok(AdminCommand::Load { area: a.string(0)? })
        });
        registry.register("unload", "unload <area>", "Unload a chunk", |a| {
            a.at_most(1)?;
            Ok(AdminCommand::Unload { area: a.string(0)? })
        });
        registry.register(
            "harvest",
            "harvest <resourceId>",
            "Deplete a resource node",
            |a| {
                a.at_most(1)?;
                Ok(AdminCommand::Harvest {
                    resource_id: a.string(0)?,
                })
            },
        );
        registry
    }

    fn register(&mut self, name: &str, usage: &str, description: &str, parse: ParseFn) {
        self.commands.insert(
            name.to_string(),
            CommandEntry {
                name: name.to_string(),
                usage: usage.to_string(),
                description: description.to_string(),
                parse,
            },
        );
    }

    /// Parse a console line into a command.
    pub fn parse(&self, line: &str) -> Result<AdminCommand, CommandError> {
        let tokens = tokenize(line);
        let (name, rest) = tokens.split_first().ok_or(CommandError::Empty)?;
        let name = name.to_lowercase();
        let entry = self
            .commands
            .get(&name)
            .ok_or_else(|| CommandError::Unknown(name.clone()))?;
        (entry.parse)(&Args {
            command: entry,
            values: rest,
        })
    }

    /// One line per command, sorted by name.
    pub fn help_lines(&self) -> Vec<String> {
        let mut entries: Vec<&CommandEntry> = self.commands.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let mut lines = vec!["Available commands:".to_string()];
        lines.extend(
            entries
                .into_iter()
                .map(|e| format!("  {} - {}", e.usage, e.description)),
        );
        lines
    }

    /// Get a reference to all registered commands.
    pub fn get_commands(&self) -> &HashMap<String, CommandEntry> {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_every_admin_command() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.get_commands().len(), 12);
        for name in [
            "help", "stop", "status", "mobs", "chunks", "spawnmob", "despawn", "respawnall",
            "damage", "load", "unload", "harvest",
        ] {
            assert!(reg.get_commands().contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn tokenize_strips_slash_and_spaces() {
        assert_eq!(tokenize("  /load   river-meadow "), vec!["load", "river-meadow"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn parse_simple_commands() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.parse("status").unwrap(), AdminCommand::Status);
        assert_eq!(reg.parse("STOP").unwrap(), AdminCommand::Stop);
        assert_eq!(
            reg.parse("mobs").unwrap(),
            AdminCommand::Mobs { area: None }
        );
        assert_eq!(
            reg.parse("mobs cursed-crypt").unwrap(),
            AdminCommand::Mobs {
                area: Some("cursed-crypt".into())
            }
        );
    }

    #[test]
    fn parse_spawnmob() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.parse("spawnmob wolf 12.5 -3").unwrap(),
            AdminCommand::SpawnMob {
                mob_type: "wolf".into(),
                x: 12.5,
                z: -3.0
            }
        );
        assert_eq!(
            reg.parse("spawnmob wolf north 3").unwrap_err(),
            CommandError::InvalidArgument {
                command: "spawnmob".into(),
                argument: "x",
                value: "north".into()
            }
        );
        assert!(matches!(
            reg.parse("spawnmob wolf 1 NaN").unwrap_err(),
            CommandError::InvalidArgument { argument: "z", .. }
        ));
        assert!(matches!(
            reg.parse("spawnmob wolf").unwrap_err(),
            CommandError::MissingArgument { .. }
        ));
    }

    #[test]
    fn parse_damage() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.parse("damage 4 10 alice").unwrap(),
            AdminCommand::Damage {
                mob_id: 4,
                amount: 10,
                player_id: "alice".into()
            }
        );
        assert!(matches!(
            reg.parse("damage 4 -10 alice").unwrap_err(),
            CommandError::InvalidArgument {
                argument: "amount",
                ..
            }
        ));
        assert!(matches!(
            reg.parse("damage 4 10 alice bob").unwrap_err(),
            CommandError::TooManyArguments { .. }
        ));
    }

    #[test]
    fn unknown_and_empty() {
        let reg = CommandRegistry::new();
        let err = reg.parse("teleport 1 2").unwrap_err();
        assert_eq!(err, CommandError::Unknown("teleport".into()));
        assert!(err.to_string().contains("Unknown command"));
        assert_eq!(reg.parse("").unwrap_err(), CommandError::Empty);
    }

    #[test]
    fn missing_argument_reports_usage() {
        let reg = CommandRegistry::new();
        let err = reg.parse("harvest").unwrap_err();
        assert_eq!(err.to_string(), "Usage: harvest <resourceId>");
    }

    #[test]
    fn help_is_sorted() {
        let reg = CommandRegistry::new();
        let lines = reg.help_lines();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].contains("Available commands"));
        assert!(lines[1].trim_start().starts_with("chunks"));
        assert!(lines[12].trim_start().starts_with("unload"));
    }

    #[test]
    fn result_helpers() {
        let ok = CommandResult::ok("success");
        assert!(ok.success);
        assert_eq!(ok.messages[0], "success");

        let err = CommandResult::err("failed");
        assert!(!err.success);
        assert_eq!(err.messages[0], "failed");

        assert!(CommandResult::stop("bye").should_stop);
    }
}
