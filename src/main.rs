//! Cogworks demo runner.
//!
//! Runs one of the demo scenes headless for a number of frames and logs what
//! happened. Useful to exercise the engine from the command line:
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --scene rain --seed 7 --frames 300
//! cargo run -- --scene platformer --tilemap assets/maps/level01.json
//! ```
//!
//! Settings come from `config.ini` (see
//! [`EngineConfig`](cogworks::resources::gameconfig::EngineConfig)); a
//! missing file falls back to the defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use cogworks::engine::Engine;
use cogworks::error::EngineError;
use cogworks::game::scene_by_name;
use cogworks::resources::gameconfig::EngineConfig;
use cogworks::resources::tilemapstore::TilemapStore;
use cogworks::systems::render::NullRenderer;

/// Cogworks 2D engine demo
#[derive(Parser)]
#[command(version, about = "Runs a Cogworks demo scene headless")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Scene to load: platformer or rain.
    #[arg(long, default_value = "platformer")]
    scene: String,

    /// Tile map JSON for the platformer scene.
    #[arg(long, value_name = "PATH")]
    tilemap: Option<PathBuf>,

    /// Seed for the rain scene.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Start with debug drawing enabled.
    #[arg(long)]
    debug_draw: bool,
}

fn run(cli: Cli) -> Result<(), EngineError> {
    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if cli.debug_draw {
        config.debug_draw = true;
    }

    let mut store = TilemapStore::new();
    let level = match &cli.tilemap {
        Some(path) => Some(store.load_from_file("level", path)?.clone()),
        None => None,
    };
    let scene = scene_by_name(&cli.scene, level, cli.seed)?;

    let fixed_timestep = config.fixed_timestep;
    let mut engine = Engine::new(config, Box::new(NullRenderer::new()));
    engine.load_scene(scene)?;

    for _ in 0..cli.frames {
        engine.update(fixed_timestep);
    }

    info!(
        "Ran {} frames ({:.2}s simulated), {} entities, {} components left",
        engine.frame_count(),
        engine.time.elapsed,
        engine.world.entity_count(),
        engine.world.component_count()
    );
    if let Some(player) = engine.world.find_entity("player") {
        if let Some(tx) = engine.world.transform(player) {
            info!("Player at ({:.3}, {:.3})", tx.x(), tx.y());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
