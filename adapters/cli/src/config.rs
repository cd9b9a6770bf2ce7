//! Optional TOML configuration consumed by the command-line adapter.

use std::{fs, io, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tile_maze_core::{Difficulty, Weather};
use tile_maze_system_map_generation::{
    Config as GenerationConfig, MapGenerator, DEFAULT_MAX_ATTEMPTS, DEFAULT_PLACEMENT_ATTEMPTS,
    DEFAULT_WALL_PROBABILITY, DEFAULT_WALL_VARIANTS,
};

/// Failures raised while loading a configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read from disk.
    #[error("failed to read config file {path}")]
    Read {
        /// Location of the unreadable file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file contents are not valid configuration TOML.
    #[error("failed to parse config toml")]
    Parse(#[from] toml::de::Error),
    /// Wall probability must be a finite value within `[0, 1]`.
    #[error("wall_probability must lie within [0, 1], found {0}")]
    WallProbability(f64),
    /// At least one decorative wall variant is required.
    #[error("wall_variants must be at least 1")]
    WallVariants,
}

/// Settings read from the `[generation]` and `[session]` tables.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    generation: GenerationSection,
    session: SessionSection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GenerationSection {
    wall_probability: f64,
    max_attempts: u32,
    placement_attempts: u32,
    wall_variants: u8,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            wall_probability: DEFAULT_WALL_PROBABILITY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            wall_variants: DEFAULT_WALL_VARIANTS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SessionSection {
    difficulty: Difficulty,
    weather: Option<Weather>,
    seed: Option<u64>,
}

impl GameConfig {
    /// Loads the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parses configuration TOML, rejecting out-of-range generation values.
    pub(crate) fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        let probability = config.generation.wall_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::WallProbability(probability));
        }
        if config.generation.wall_variants == 0 {
            return Err(ConfigError::WallVariants);
        }
        Ok(config)
    }

    /// Map generator built from the `[generation]` table.
    #[must_use]
    pub(crate) fn generator(&self) -> MapGenerator {
        let section = &self.generation;
        MapGenerator::new(GenerationConfig::new(
            section.wall_probability,
            section.max_attempts,
            section.placement_attempts,
            section.wall_variants,
        ))
    }

    #[must_use]
    pub(crate) const fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    /// Weather pinned by the configuration, if any.
    #[must_use]
    pub(crate) const fn weather(&self) -> Option<Weather> {
        self.session.weather
    }

    #[must_use]
    pub(crate) const fn seed(&self) -> Option<u64> {
        self.session.seed
    }
}
