//! Headless session runner that drives the world with a scripted move list.

use anyhow::{bail, Result};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_maze_core::{Command, Direction, Event, Weather};
use tile_maze_system_progression::{Config as ProgressionConfig, Progression};
use tile_maze_world::{self as world, query, Config as WorldConfig, World, FRAME};
use tracing::{debug, info, warn};

use crate::config::GameConfig;

const RANDOM_WEATHER: [Weather; 2] = [Weather::Rain, Weather::Snow];

/// Parses a move script such as `"EESSW"`. Whitespace is ignored.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace())
        .map(|symbol| match symbol.to_ascii_uppercase() {
            'N' => Ok(Direction::North),
            'E' => Ok(Direction::East),
            'S' => Ok(Direction::South),
            'W' => Ok(Direction::West),
            other => bail!("unknown move `{other}`; expected one of N, E, S, W"),
        })
        .collect()
}

/// Weather for a run: the configured value, otherwise rain or snow drawn from the seed.
pub(crate) fn pick_weather(config: &GameConfig, seed: u64) -> Weather {
    config.weather().unwrap_or_else(|| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        RANDOM_WEATHER.choose(&mut rng).copied().unwrap_or_default()
    })
}

/// Summary of a finished scripted session.
#[derive(Debug)]
pub(crate) struct SessionReport {
    /// World state after the last move.
    pub(crate) world: World,
    /// Final scores of every run that ended during the session, including the last one.
    pub(crate) final_scores: Vec<u64>,
    /// Number of levels cleared across all runs.
    pub(crate) levels_cleared: u32,
}

impl SessionReport {
    /// Highest final score earned during the session.
    pub(crate) fn best(&self) -> u64 {
        self.final_scores.iter().copied().max().unwrap_or(0)
    }
}

/// Owns the world and progression system for one headless session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    progression: Progression,
    final_scores: Vec<u64>,
    levels_cleared: u32,
}

impl Session {
    pub(crate) fn new(config: &GameConfig, seed: u64) -> Self {
        let weather = pick_weather(config, seed);
        info!(seed, ?weather, difficulty = ?config.difficulty(), "starting session");
        let mut session = Self {
            world: World::with_config(WorldConfig::new(config.difficulty(), weather)),
            progression: Progression::new(ProgressionConfig::new(config.generator(), seed)),
            final_scores: Vec::new(),
            levels_cleared: 0,
        };
        let opening = session.progression.initial_level();
        session.submit(opening);
        session
    }

    /// Applies each move, then advances frame by frame until the player may move again.
    pub(crate) fn run(mut self, moves: &[Direction]) -> SessionReport {
        for &direction in moves {
            self.submit(Command::StepPlayer { direction });
            loop {
                self.submit(Command::Tick { dt: FRAME });
                if query::move_cooldown(&self.world).is_zero() {
                    break;
                }
            }
        }

        self.final_scores.push(query::final_score(&self.world));
        SessionReport {
            world: self.world,
            final_scores: self.final_scores,
            levels_cleared: self.levels_cleared,
        }
    }

    fn submit(&mut self, command: Command) {
        let mut pending = vec![command];
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.observe(&events);
            self.progression.handle(&events, &mut pending);
        }
    }

    fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => {}
                Event::LevelLoaded {
                    level,
                    rows,
                    columns,
                    origin,
                } => info!(level, rows, columns, ?origin, "level loaded"),
                Event::MoveBlocked { from, direction } => {
                    debug!(?from, ?direction, "move blocked");
                }
                Event::PowerupCollected { powerup } => {
                    info!(kind = ?powerup.kind, cell = ?powerup.cell, "power-up collected");
                }
                Event::LevelCompleted { level, .. } => {
                    self.levels_cleared += 1;
                    info!(next_level = level, "level completed");
                }
                Event::AchievementUnlocked { achievement } => {
                    info!(?achievement, "achievement unlocked");
                }
                Event::TimeExpired { final_score } => {
                    warn!(final_score, "time expired");
                    self.final_scores.push(*final_score);
                }
                other => debug!(event = ?other, "world event"),
            }
        }
    }
}
