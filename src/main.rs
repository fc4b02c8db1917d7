use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tileworld::entity::{InputState, SurvivalEvent};
use tileworld::world::SaveStore;
use tileworld::{Game, GameConfig};

/// Fixed frame step for the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Walk {
    Left,
    Right,
    None,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Config file (RON); defaults to ./tileworld.ron if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding named saves
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Save under this name when the run ends
    #[arg(long)]
    save: Option<String>,

    /// Load this save before running
    #[arg(long)]
    load: Option<String>,

    /// Direction to hold for the whole run
    #[arg(long, value_enum, default_value = "right")]
    walk: Walk,

    /// Press jump every N frames (0 = never)
    #[arg(long, default_value = "0")]
    jump_every: u64,

    /// Force debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from(path)?,
        None => GameConfig::load()?,
    };

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose || config.debug.verbose_logging {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    log::info!("Starting Tileworld (seed {})", config.world.seed);
    let status_every = config.debug.status_interval_ticks;
    let mut game = Game::new(config);

    let needs_store = args.load.is_some() || args.save.is_some();
    let store = if needs_store {
        Some(SaveStore::new(&args.save_dir).context("Failed to open save directory")?)
    } else {
        None
    };

    if let (Some(name), Some(store)) = (&args.load, &store) {
        game.load(store, name)
            .with_context(|| format!("Failed to load save '{}'", name))?;
    }

    let mut deaths = 0;
    for frame in 1..=args.ticks {
        let input = InputState {
            move_left: args.walk == Walk::Left,
            move_right: args.walk == Walk::Right,
            jump: args.jump_every > 0 && frame % args.jump_every == 0,
        };

        if game.update(FRAME_DT, &input) == SurvivalEvent::Respawned {
            deaths += 1;
        }

        if status_every > 0 && frame % status_every == 0 {
            let player = game.player();
            log::info!(
                "[{}] pos ({:.1}, {:.1}) vel ({:.2}, {:.2}) health {}/{} hunger {}/{} chunks {}",
                frame,
                player.position.x,
                player.position.y,
                player.velocity.x,
                player.velocity.y,
                player.health.current,
                player.health.max,
                player.hunger.current,
                player.hunger.max,
                game.world().chunk_manager().chunk_count()
            );
        }
    }

    if let (Some(name), Some(store)) = (&args.save, &store) {
        game.save(store, name)
            .with_context(|| format!("Failed to save '{}'", name))?;
    }

    let player = game.player();
    log::info!(
        "Finished {} frames at ({:.1}, {:.1}), {} respawns",
        game.tick(),
        player.position.x,
        player.position.y,
        deaths
    );
    Ok(())
}
