mod bots;
mod config;
mod console;
mod sinks;

use std::time::Duration;

use bots::BotFleet;
use config::ServerConfig;
use console::Console;
use sinks::{report_event, LoggedScene};
use tokio::io::AsyncBufReadExt;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use wildlands_content::load_content;
use wildlands_game::{
    Collaborators, EventQueue, GameWorld, InMemoryPlayers, MonotonicClock, SceneIndex,
};
use wildlands_world::AreaId;

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "server.toml".to_string());
    let config = match ServerConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "Wildlands server v{} starting: {}",
        env!("CARGO_PKG_VERSION"),
        config.server.name
    );

    let content = load_content(config.world.content_dir.as_deref());
    let (registry, catalog) = match content.into_parts() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Invalid world content: {e}");
            std::process::exit(1);
        }
    };

    let players = InMemoryPlayers::new();
    let scene = SceneIndex::new();
    let events = EventQueue::new();
    let io = Collaborators {
        players: Box::new(players.clone()),
        scene: Box::new(LoggedScene::new(scene.clone())),
        events: Box::new(events.clone()),
        clock: Box::new(MonotonicClock::new()),
    };
    let mut world = GameWorld::new(config.game_config(), catalog, &registry, io);

    let warm_up: Vec<AreaId> = config
        .world
        .warm_up
        .iter()
        .map(|a| AreaId::from(a.as_str()))
        .collect();
    if !warm_up.is_empty() {
        let loaded = world.warm_up(&warm_up);
        info!("Warm-up loaded {}/{} chunk(s)", loaded, warm_up.len());
    }

    let mut fleet = BotFleet::new(&config.bots, players);
    if !fleet.is_empty() {
        info!("Spawned {} scripted bot(s)", fleet.len());
    }
    let console = Console::new(scene);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    // Console REPL: read lines from stdin
    let (console_tx, mut console_rx) = tokio::sync::mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let tick_length = Duration::from_millis(config.server.tick_ms.max(1));
    let dt = tick_length.as_secs_f32();
    let status_every = config.server.status_every;
    let mut tick_interval = tokio::time::interval(tick_length);
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("Ticking every {} ms", tick_length.as_millis());

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                fleet.step(dt);
                world.tick();
                for event in events.drain() {
                    report_event(&event);
                }
                if status_every > 0 && world.current_tick() % status_every == 0 {
                    info!("{}", console.status_line(&world));
                }
            }
            Some(line) = console_rx.recv() => {
                let result = console.handle(&mut world, &line);
                for message in &result.messages {
                    if result.success {
                        info!("{message}");
                    } else {
                        warn!("{message}");
                    }
                }
                for event in events.drain() {
                    report_event(&event);
                }
                if result.should_stop {
                    break;
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("Server shut down after {} ticks.", world.current_tick());
}
