#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Evade experience.

mod config;

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use evade_core::{HeldDirections, WindowExtent, WINDOW_TITLE};
use evade_rendering::{Color, Hud, Presentation, RenderingBackend, Scene};
use evade_rendering_macroquad::MacroquadBackend;
use evade_simulation::{Frame, Simulation};
use evade_system_respawn::SeededCorners;
use evade_world::{self as world, World};

use crate::config::GameConfig;

/// Fixed step used when running without a window.
const HEADLESS_FRAME_DELTA: Duration = Duration::from_nanos(16_666_667);

/// Keep the player square away from the chasing enemy for as long as possible.
#[derive(Debug, Parser)]
#[command(name = "evade", version, about)]
struct CliArgs {
    /// TOML file overriding the window size and entity settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the respawn corner generator. Defaults to the wall clock.
    #[arg(long, value_name = "U64")]
    seed: Option<u64>,
    /// Disables vertical sync.
    #[arg(long)]
    no_vsync: bool,
    /// Logs the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Steps the simulation for FRAMES frames without opening a window.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

/// Entry point for the Evade command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(wall_clock_seed);
    log::debug!("respawn seed {seed}");

    let mut world = World::new();
    let mut events = Vec::new();
    for command in config.entity_commands() {
        world::apply(&mut world, command, &mut events);
    }
    log::debug!("configured entities: {events:?}");

    let simulation = Simulation::new(world, SeededCorners::new(seed));

    match args.headless {
        Some(frames) => {
            run_headless(simulation, &config, frames);
            Ok(())
        }
        None => run_windowed(simulation, &config, &args),
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    let config = GameConfig::from_toml(&contents)
        .with_context(|| format!("invalid configuration at {}", path.display()))?;
    log::debug!("loaded configuration from {}: {config:?}", path.display());
    Ok(config)
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Idle frame at the fixed headless step inside the configured window.
fn headless_frame(config: &GameConfig) -> Frame {
    Frame {
        dt: HEADLESS_FRAME_DELTA,
        held: HeldDirections::none(),
        window: WindowExtent::new(config.window.width as f32, config.window.height as f32),
    }
}

fn run_headless(mut simulation: Simulation<SeededCorners>, config: &GameConfig, frames: u64) {
    let frame = headless_frame(config);
    for _ in 0..frames {
        let _ = simulation.step(&frame);
    }

    println!("{}", Hud::new(simulation.score()).text());
}

fn run_windowed(
    mut simulation: Simulation<SeededCorners>,
    config: &GameConfig,
    args: &CliArgs,
) -> Result<()> {
    let scene = Scene::new(
        &simulation.player(),
        &simulation.enemy(),
        simulation.score(),
    );
    let presentation = Presentation::new(
        WINDOW_TITLE,
        config.window.width,
        config.window.height,
        Color::BLACK,
        scene,
    )?;

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |input, scene| {
        let _ = simulation.advance(input);
        scene.refresh(&simulation.player(), &simulation.enemy(), simulation.score());
    })
}
