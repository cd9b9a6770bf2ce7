#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates Tile Maze levels and runs headless sessions.

mod config;
mod render;
mod score_store;
mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tile_maze_core::{GenerationResult, WELCOME_BANNER};
use tile_maze_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::GameConfig,
    render::{render, MapView},
    score_store::BestScoreStore,
    session::{parse_moves, Session},
};

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_SCORES_PATH: &str = "tile-maze-best-score.txt";

#[derive(Debug, Parser)]
#[command(author, version, about = "Tile Maze level generator and headless runner", long_about = None)]
struct Cli {
    /// Optional TOML file with `[generation]` and `[session]` tables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Generates a single level and prints it.
    Generate {
        /// Number of grid rows.
        #[arg(long, default_value_t = 5)]
        rows: u32,
        /// Number of grid columns.
        #[arg(long, default_value_t = 5)]
        columns: u32,
        /// Level number driving the power-up distribution.
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Plays a scripted session, one step per move letter.
    Play {
        /// Moves as a string of N, E, S and W letters.
        #[arg(long)]
        moves: String,
        /// Seed for level generation and weather.
        #[arg(long)]
        seed: Option<u64>,
        /// Best-score file updated when the session ends.
        #[arg(long, default_value = DEFAULT_SCORES_PATH)]
        scores: PathBuf,
    },
    /// Prints the persisted best score.
    BestScore {
        /// Best-score file to read.
        #[arg(long, default_value = DEFAULT_SCORES_PATH)]
        scores: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Entry point for the Tile Maze command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Mode::Generate {
            rows,
            columns,
            level,
            seed,
            format,
        } => {
            let seed = resolve_seed(seed, &config);
            let layout = config.generator().generate_seeded(rows, columns, level, seed);
            print_layout(&layout, format)
        }
        Mode::Play {
            moves,
            seed,
            scores,
        } => play(&config, &moves, resolve_seed(seed, &config), &scores),
        Mode::BestScore { scores } => {
            let best = BestScoreStore::new(scores).load()?;
            println!("{best}");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn resolve_seed(flag: Option<u64>, config: &GameConfig) -> u64 {
    flag.or(config.seed()).unwrap_or_else(rand::random)
}

fn print_layout(layout: &GenerationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let view = MapView {
                grid: &layout.grid,
                powerups: &layout.powerups,
                start: layout.start,
                end: layout.end,
                player: None,
            };
            print!("{}", render(&view));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(layout)
                .context("failed to serialize generated layout")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn play(config: &GameConfig, script: &str, seed: u64, scores: &Path) -> Result<()> {
    let moves = parse_moves(script)?;
    println!("{WELCOME_BANNER}");

    let report = Session::new(config, seed).run(&moves);
    let world = &report.world;
    let (start, end) = query::doors(world);
    let view = MapView {
        grid: query::grid(world),
        powerups: query::powerups(world),
        start,
        end,
        player: Some(query::player(world)),
    };
    print!("{}", render(&view));
    println!(
        "level {} | score {} | steps {} | coins {} | time left {:.1}s | weather {:?}",
        query::level(world),
        query::score(world),
        query::steps(world),
        query::coins(world),
        query::time_left(world).as_secs_f32(),
        query::weather(world),
    );
    println!("levels cleared: {}", report.levels_cleared);
    for achievement in query::achievements(world) {
        println!("achievement: {achievement:?}");
    }

    let best = report.best();
    let store = BestScoreStore::new(scores);
    if store.record(best)? {
        info!(best, path = %store.path().display(), "new best score recorded");
        println!("new best score: {best}");
    } else {
        println!("final score: {best}");
    }
    Ok(())
}
