#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural maze generation with reachability-guaranteed power-up placement.
//!
//! [`MapGenerator::generate`] repeatedly builds a candidate grid, scatters
//! walls, places the level's power-ups and keeps the first candidate whose
//! doors are connected. When every attempt fails it falls back to an empty,
//! trivially solvable grid so callers never receive an unsolvable level.

mod distribution;
mod grid_builder;
mod placement;
mod reachability;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_maze_core::{BackgroundSurface, CellCoord, GenerationResult, Grid, LayoutOrigin, Powerup};
use tracing::{debug, warn};

pub use distribution::PowerupDistribution;
pub use grid_builder::{build_candidate, carve_corridor, scatter_walls, Candidate, CornerPair};
pub use placement::place_one;
pub use reachability::is_reachable;

/// Probability that a free cell becomes a wall during scatter.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;
/// Candidates built before resorting to the fallback layout.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Random cells drawn per power-up before giving up on it.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 10;
/// Number of decorative wall textures variants are drawn from.
pub const DEFAULT_WALL_VARIANTS: u8 = 8;

/// Tunables controlling map generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    wall_probability: f64,
    max_attempts: u32,
    placement_attempts: u32,
    wall_variants: u8,
}

impl Config {
    /// Creates a configuration; the wall probability is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(
        wall_probability: f64,
        max_attempts: u32,
        placement_attempts: u32,
        wall_variants: u8,
    ) -> Self {
        let wall_probability = if wall_probability.is_nan() {
            DEFAULT_WALL_PROBABILITY
        } else {
            wall_probability.clamp(0.0, 1.0)
        };
        Self {
            wall_probability,
            max_attempts,
            placement_attempts,
            wall_variants: wall_variants.max(1),
        }
    }

    /// Returns a copy using the provided wall probability.
    #[must_use]
    pub fn with_wall_probability(self, wall_probability: f64) -> Self {
        Self::new(
            wall_probability,
            self.max_attempts,
            self.placement_attempts,
            self.wall_variants,
        )
    }

    /// Probability that a free cell becomes a wall.
    #[must_use]
    pub const fn wall_probability(&self) -> f64 {
        self.wall_probability
    }

    /// Candidates built before falling back.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Random draws per power-up.
    #[must_use]
    pub const fn placement_attempts(&self) -> u32 {
        self.placement_attempts
    }

    /// Decorative wall variant count.
    #[must_use]
    pub const fn wall_variants(&self) -> u8 {
        self.wall_variants
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wall_probability: DEFAULT_WALL_PROBABILITY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            wall_variants: DEFAULT_WALL_VARIANTS,
        }
    }
}

/// Pure generator producing a fresh layout per level.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapGenerator {
    config: Config,
}

impl MapGenerator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generates a solvable layout for the provided level.
    ///
    /// Dimensions of zero are treated as one.
    pub fn generate<R>(&self, rows: u32, columns: u32, level: u32, rng: &mut R) -> GenerationResult
    where
        R: Rng + ?Sized,
    {
        let rows = rows.max(1);
        let columns = columns.max(1);

        for attempt in 1..=self.config.max_attempts {
            let Candidate { grid, start, end } = build_candidate(
                rows,
                columns,
                self.config.wall_probability,
                self.config.wall_variants,
                rng,
            );

            let distribution = PowerupDistribution::for_level(level, rng);
            let powerups = self.place_powerups(&grid, start, end, distribution, rng);

            if is_reachable(&grid, start, end) {
                debug!(
                    level,
                    rows,
                    columns,
                    attempt,
                    walls = grid.wall_count(),
                    powerups = powerups.len(),
                    "generated level layout"
                );
                return GenerationResult {
                    grid,
                    powerups,
                    start,
                    end,
                    background: Some(BackgroundSurface::for_grid(rows, columns)),
                    origin: LayoutOrigin::Generated { attempt },
                };
            }

            debug!(level, attempt, "discarding candidate without a path between doors");
        }

        warn!(
            level,
            rows,
            columns,
            attempts = self.config.max_attempts,
            "map generation exhausted its attempts; using the empty fallback layout"
        );
        fallback(rows, columns)
    }

    /// Generates a layout from a deterministic seed.
    #[must_use]
    pub fn generate_seeded(
        &self,
        rows: u32,
        columns: u32,
        level: u32,
        seed: u64,
    ) -> GenerationResult {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(rows, columns, level, &mut rng)
    }

    fn place_powerups<R>(
        &self,
        grid: &Grid,
        start: CellCoord,
        end: CellCoord,
        distribution: PowerupDistribution,
        rng: &mut R,
    ) -> Vec<Powerup>
    where
        R: Rng + ?Sized,
    {
        let mut powerups = Vec::with_capacity(distribution.total() as usize);
        for (kind, count) in distribution.iter() {
            for _ in 0..count {
                if let Some(cell) =
                    place_one(grid, &powerups, start, end, self.config.placement_attempts, rng)
                {
                    powerups.push(Powerup::new(cell, kind));
                }
            }
        }
        powerups
    }
}

/// Generates a layout with the default configuration.
pub fn generate<R>(rows: u32, columns: u32, level: u32, rng: &mut R) -> GenerationResult
where
    R: Rng + ?Sized,
{
    MapGenerator::default().generate(rows, columns, level, rng)
}

/// Empty layout with doors in the top-left and bottom-right corners.
#[must_use]
pub fn fallback(rows: u32, columns: u32) -> GenerationResult {
    let rows = rows.max(1);
    let columns = columns.max(1);
    GenerationResult {
        grid: Grid::open(rows, columns),
        powerups: Vec::new(),
        start: CellCoord::new(0, 0),
        end: CellCoord::new(columns - 1, rows - 1),
        background: None,
        origin: LayoutOrigin::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_wall_probability() {
        assert_eq!(Config::new(1.7, 10, 10, 8).wall_probability(), 1.0);
        assert_eq!(Config::new(-0.2, 10, 10, 8).wall_probability(), 0.0);
        assert_eq!(
            Config::new(f64::NAN, 10, 10, 8).wall_probability(),
            DEFAULT_WALL_PROBABILITY
        );
        assert_eq!(Config::new(0.3, 10, 10, 0).wall_variants(), 1);
    }

    #[test]
    fn fallback_is_open_and_spans_the_grid() {
        let layout = fallback(4, 6);
        assert!(layout.is_fallback());
        assert_eq!(layout.grid.wall_count(), 0);
        assert_eq!(layout.start, CellCoord::new(0, 0));
        assert_eq!(layout.end, CellCoord::new(5, 3));
        assert!(layout.powerups.is_empty());
        assert!(layout.background.is_none());
    }

    #[test]
    fn zero_attempts_go_straight_to_fallback() {
        let generator = MapGenerator::new(Config::new(0.0, 0, 10, 8));
        let layout = generator.generate_seeded(5, 5, 1, 42);
        assert!(layout.is_fallback());
    }

    #[test]
    fn open_grids_succeed_on_first_attempt() {
        let generator = MapGenerator::new(Config::default().with_wall_probability(0.0));
        let layout = generator.generate_seeded(5, 7, 1, 42);
        assert_eq!(layout.origin, LayoutOrigin::Generated { attempt: 1 });
        assert_eq!(layout.background, Some(BackgroundSurface::for_grid(5, 7)));
    }
}
