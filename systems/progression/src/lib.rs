#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic progression system that generates the next level on demand.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_maze_core::{Command, Event, INITIAL_COLUMNS, INITIAL_LEVEL, INITIAL_ROWS};
use tile_maze_system_map_generation::MapGenerator;
use tracing::info;

/// Configuration parameters required to construct the progression system.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    generator: MapGenerator,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided generator and seed.
    #[must_use]
    pub const fn new(generator: MapGenerator, rng_seed: u64) -> Self {
        Self {
            generator,
            rng_seed,
        }
    }
}

/// Pure system that turns level transitions into `LoadLevel` commands.
#[derive(Debug)]
pub struct Progression {
    generator: MapGenerator,
    rng: ChaCha8Rng,
}

impl Progression {
    /// Creates a new progression system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            generator: config.generator,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Generates the opening level of a fresh session.
    #[must_use]
    pub fn initial_level(&mut self) -> Command {
        self.load(INITIAL_LEVEL, INITIAL_ROWS, INITIAL_COLUMNS)
    }

    /// Consumes world events and emits a `LoadLevel` command per transition.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match *event {
                Event::LevelCompleted {
                    level,
                    rows,
                    columns,
                } => {
                    info!(level, rows, columns, "advancing to the next level");
                    out.push(self.load(level, rows, columns));
                }
                Event::SessionReset {
                    level,
                    rows,
                    columns,
                } => {
                    info!(level, "session reset; regenerating the opening level");
                    out.push(self.load(level, rows, columns));
                }
                _ => {}
            }
        }
    }

    fn load(&mut self, level: u32, rows: u32, columns: u32) -> Command {
        let layout = self.generator.generate(rows, columns, level, &mut self.rng);
        Command::LoadLevel { level, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_level_uses_opening_dimensions() {
        let mut progression = Progression::new(Config::new(MapGenerator::default(), 7));
        match progression.initial_level() {
            Command::LoadLevel { level, layout } => {
                assert_eq!(level, INITIAL_LEVEL);
                assert_eq!(layout.grid.rows(), INITIAL_ROWS);
                assert_eq!(layout.grid.columns(), INITIAL_COLUMNS);
            }
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut progression = Progression::new(Config::default());
        let mut commands = Vec::new();
        progression.handle(
            &[Event::SpeedBoostExpired, Event::TimeExpired { final_score: 300 }],
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
