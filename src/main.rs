//! Missile Command entry point
//!
//! Headless host: runs the simulation at the configured cadence, lets the
//! demo player click, and prints the final status. Drawing and real input
//! belong to whatever windowed host embeds the library.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use missile_command::Settings;
use missile_command::sim::{Autopilot, GamePhase, Simulation};

#[derive(Debug, Parser)]
#[command(name = "missile-command", about = "Run a headless Missile Command game")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Pace ticks in real time
    #[arg(long)]
    realtime: bool,
    /// Nobody defends; houses fall
    #[arg(long)]
    no_autopilot: bool,
    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(max_ticks) = args.max_ticks {
        settings.max_ticks = max_ticks;
    }
    settings.realtime |= args.realtime;
    settings.autopilot &= !args.no_autopilot;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Missile Command (headless) starting with seed {seed}");

    let viewport = settings.viewport();
    let mut sim = Simulation::with_queue_capacity(
        settings.tuning.clone(),
        viewport,
        seed,
        settings.queue_capacity(),
    );
    let input = sim.input();
    let mut autopilot = settings.autopilot.then(Autopilot::default);
    let tick_len = Duration::from_millis(settings.tick_ms);

    // Same path as the restart key
    input.restart();

    for _ in 0..settings.max_ticks {
        sim.tick(viewport);
        if sim.phase() == GamePhase::GameOver {
            break;
        }

        if let Some(pilot) = autopilot.as_mut() {
            if let Some(target) = pilot.next_click(sim.state(), sim.tuning()) {
                input.click(target.x, target.y);
            }
        }

        let state = sim.state();
        if state.tick % 500 == 0 {
            log::debug!(
                "tick {}: {} missiles, {} explosions, ammo {}, score {}",
                state.tick,
                state.projectiles.len(),
                state.blasts.len(),
                state.ammo,
                state.score
            );
        }

        if settings.realtime {
            std::thread::sleep(tick_len);
        }
    }

    let snapshot = sim.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("could not encode frame")?;
        println!("{json}");
    }
    for line in snapshot.status_lines() {
        println!("{line}");
    }
    if snapshot.game_over() {
        println!("Game over after {} ticks", snapshot.tick);
    } else {
        println!("Still standing after {} ticks", snapshot.tick);
    }
    log::info!("Run finished (seed {seed})");

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
