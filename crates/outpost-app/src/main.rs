//! outpost: headless runner for the Outpost simulation.
//!
//! Usage:
//!   outpost [--config game.json] [--seed 42] [--time-limit 300]
//!
//! Starts a match, logs its progress and exits when the match ends or the
//! time limit passes. Set `RUST_LOG` to change verbosity.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use outpost_app::state::AppState;
use outpost_core::commands::PlayerCommand;
use outpost_core::config::GameConfig;
use outpost_core::enums::MatchPhase;
use outpost_sim::engine::SimConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    seed: u64,
    time_limit: Duration,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Args {
            config: None,
            seed: SimConfig::default().seed,
            time_limit: Duration::from_secs(300),
        };

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--config", Some(path)) => parsed.config = Some(PathBuf::from(path)),
                ("--seed", Some(seed)) => {
                    parsed.seed = seed.parse().with_context(|| format!("invalid seed: {seed}"))?;
                }
                ("--time-limit", Some(secs)) => {
                    let secs: u64 = secs
                        .parse()
                        .with_context(|| format!("invalid time limit: {secs}"))?;
                    parsed.time_limit = Duration::from_secs(secs);
                }
                (flag @ ("--config" | "--seed" | "--time-limit"), None) => {
                    bail!("{flag} needs a value");
                }
                (other, _) => bail!("unknown argument: {other}"),
            }
            i += 2;
        }
        Ok(parsed)
    }
}

fn print_usage() {
    eprintln!(
        "outpost: headless Outpost match runner\n\
         \n\
           --config <path>      JSON game config (default: built-in tuning)\n\
           --seed <N>           RNG seed (default: 42)\n\
           --time-limit <secs>  Stop after this many seconds (default: 300)\n"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    let args = Args::parse(&raw)?;

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let state = AppState::new();
    state.start_simulation(SimConfig {
        seed: args.seed,
        game,
    })?;
    state.send_command(PlayerCommand::StartGame)?;

    let deadline = Instant::now() + args.time_limit;
    let mut last_phase = MatchPhase::NotStarted;
    let mut last_kills = None;
    let mut last_health = None;

    loop {
        std::thread::sleep(POLL_INTERVAL);

        if let Some(snapshot) = state.get_snapshot()? {
            if snapshot.phase != last_phase {
                info!(phase = ?snapshot.phase, kills_required = snapshot.kills_required, "phase changed");
                last_phase = snapshot.phase;
            }
            if last_kills != Some(snapshot.kills_remaining) {
                info!(
                    kills_remaining = snapshot.kills_remaining,
                    active_enemies = snapshot.pool.active,
                    "kills remaining"
                );
                last_kills = Some(snapshot.kills_remaining);
            }
            if last_health != Some(snapshot.player.health) {
                info!(health = snapshot.player.health, "player health");
                last_health = Some(snapshot.player.health);
            }
            if let Some(outcome) = snapshot.outcome {
                info!(
                    ?outcome,
                    seconds = snapshot.time.elapsed_secs,
                    pool_total = snapshot.pool.total,
                    "match over"
                );
                break;
            }
        }

        if Instant::now() >= deadline {
            warn!(limit_secs = args.time_limit.as_secs(), "time limit reached, stopping");
            break;
        }
    }

    state.shutdown()
}
