#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for Tile Maze.
//!
//! The world owns the active level's grid, power-ups and door positions
//! together with the run's counters and timers. Adapters and systems mutate
//! it exclusively through [`apply`] and observe it through the [`query`]
//! module.

use std::{collections::BTreeSet, time::Duration};

use tile_maze_core::{
    Achievement, AchievementProgress, CellCoord, Command, Difficulty, Direction, Event,
    GenerationResult, Grid, Powerup, PowerupKind, Weather, WELCOME_BANNER,
};

pub use tile_maze_core::{INITIAL_COLUMNS, INITIAL_LEVEL, INITIAL_ROWS};

/// Time budget of the first level before difficulty scaling.
pub const LEVEL_TIME: Duration = Duration::from_secs(15);
/// Duration of one frame of the 60 Hz presentation loop.
pub const FRAME: Duration = Duration::from_micros(16_667);

const DEFAULT_MOVE_FRAMES: u32 = 10;
const BOOSTED_MOVE_FRAMES: u32 = 5;
const SPEED_BOOST_DURATION: Duration = Duration::from_secs(5);
const EXTRA_TIME_BONUS: Duration = Duration::from_secs(5);
const LEVEL_CARRY_OVER_BONUS: Duration = Duration::from_secs(2);
const COIN_POINTS: u64 = 500;
const LEVEL_CLEAR_POINTS: u128 = 1_000;
const MINIMUM_FINAL_SCORE: i64 = 100;

/// Session-wide settings chosen before a run starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    difficulty: Difficulty,
    weather: Weather,
}

impl Config {
    /// Creates a session configuration.
    #[must_use]
    pub const fn new(difficulty: Difficulty, weather: Weather) -> Self {
        Self {
            difficulty,
            weather,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    AwaitingLayout,
    Playing,
}

/// Represents the authoritative Tile Maze session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: Config,
    phase: Phase,
    level: u32,
    rows: u32,
    columns: u32,
    grid: Grid,
    powerups: Vec<Powerup>,
    start: CellCoord,
    end: CellCoord,
    player: CellCoord,
    steps: u32,
    coins: u32,
    score: u64,
    level_time: Duration,
    elapsed: Duration,
    move_cooldown: Duration,
    speed_boost: Option<Duration>,
    achievements: BTreeSet<Achievement>,
}

impl World {
    /// Creates a session with default settings, waiting for its first layout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a session with the provided settings, waiting for its first layout.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            phase: Phase::AwaitingLayout,
            level: INITIAL_LEVEL,
            rows: INITIAL_ROWS,
            columns: INITIAL_COLUMNS,
            grid: Grid::open(INITIAL_ROWS, INITIAL_COLUMNS),
            powerups: Vec::new(),
            start: CellCoord::new(0, 0),
            end: CellCoord::new(INITIAL_COLUMNS - 1, INITIAL_ROWS - 1),
            player: CellCoord::new(0, 0),
            steps: 0,
            coins: 0,
            score: 0,
            level_time: initial_level_time(config.difficulty),
            elapsed: Duration::ZERO,
            move_cooldown: Duration::ZERO,
            speed_boost: None,
            achievements: BTreeSet::new(),
        }
    }

    fn load_level(&mut self, level: u32, layout: GenerationResult, out_events: &mut Vec<Event>) {
        let GenerationResult {
            grid,
            powerups,
            start,
            end,
            origin,
            ..
        } = layout;

        self.level = level;
        self.rows = grid.rows();
        self.columns = grid.columns();
        self.grid = grid;
        self.powerups = powerups;
        self.start = start;
        self.end = end;
        self.player = start;
        self.elapsed = Duration::ZERO;
        self.move_cooldown = Duration::ZERO;
        self.phase = Phase::Playing;

        out_events.push(Event::LevelLoaded {
            level,
            rows: self.rows,
            columns: self.columns,
            origin,
        });
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        self.move_cooldown = self.move_cooldown.saturating_sub(dt);

        if let Some(remaining) = self.speed_boost {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.speed_boost = None;
                out_events.push(Event::SpeedBoostExpired);
            } else {
                self.speed_boost = Some(remaining);
            }
        }

        if self.elapsed >= self.level_time {
            let final_score = self.final_score();
            out_events.push(Event::TimeExpired { final_score });
            self.reset(out_events);
        }
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing || !self.move_cooldown.is_zero() {
            return;
        }

        let from = self.player;
        let Some(to) = self.passable_neighbor(direction) else {
            out_events.push(Event::MoveBlocked { from, direction });
            return;
        };

        self.player = to;
        self.steps = self.steps.saturating_add(1);
        self.move_cooldown = self.movement_cooldown();
        out_events.push(Event::PlayerMoved { from, to });

        if let Some(index) = self.powerups.iter().position(|powerup| powerup.cell == to) {
            let powerup = self.powerups.remove(index);
            self.collect(powerup.kind);
            out_events.push(Event::PowerupCollected { powerup });
        }

        if to == self.end {
            self.complete_level(out_events);
        }
    }

    fn passable_neighbor(&self, direction: Direction) -> Option<CellCoord> {
        self.player
            .neighbor(direction)
            .filter(|cell| self.grid.is_open(*cell))
    }

    fn movement_cooldown(&self) -> Duration {
        let frames = if self.speed_boost.is_some() {
            BOOSTED_MOVE_FRAMES
        } else {
            DEFAULT_MOVE_FRAMES
        };
        FRAME * frames * self.config.weather.movement_percent() / 100
    }

    fn collect(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Speed => self.speed_boost = Some(SPEED_BOOST_DURATION),
            PowerupKind::ExtraTime => {
                self.level_time = self.level_time.saturating_add(EXTRA_TIME_BONUS);
            }
            PowerupKind::Bonus => {
                self.coins = self.coins.saturating_add(1);
                self.score = self.score.saturating_add(COIN_POINTS);
            }
        }
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) {
        let time_left = self.time_left();
        let elapsed_ms = self.elapsed.as_millis().max(1);
        let clear_points = u64::try_from(LEVEL_CLEAR_POINTS / elapsed_ms).unwrap_or(0);
        self.score = self.score.saturating_add(clear_points);

        let progress = AchievementProgress {
            level: self.level,
            time_left,
            steps: self.steps,
            coins_collected: self.coins,
        };
        for achievement in Achievement::ALL {
            if self.achievements.contains(&achievement) || !achievement.is_met(&progress) {
                continue;
            }
            let _ = self.achievements.insert(achievement);
            self.score = self.score.saturating_add(achievement.reward());
            out_events.push(Event::AchievementUnlocked { achievement });
        }

        self.level = self.level.saturating_add(1);
        if self.level % 2 == 0 {
            self.columns = self.columns.saturating_add(1);
        } else {
            self.rows = self.rows.saturating_add(1);
        }
        self.level_time = time_left.saturating_add(LEVEL_CARRY_OVER_BONUS);
        self.elapsed = Duration::ZERO;
        self.phase = Phase::AwaitingLayout;

        out_events.push(Event::LevelCompleted {
            level: self.level,
            rows: self.rows,
            columns: self.columns,
        });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let config = self.config;
        *self = Self::with_config(config);
        out_events.push(Event::SessionReset {
            level: self.level,
            rows: self.rows,
            columns: self.columns,
        });
    }

    fn time_left(&self) -> Duration {
        self.level_time.saturating_sub(self.elapsed)
    }

    fn final_score(&self) -> u64 {
        let raw = i64::from(self.level) * 2_000 + i64::from(self.coins) * 500
            - i64::from(self.steps) * 2;
        let base = u64::try_from(raw.max(MINIMUM_FINAL_SCORE)).unwrap_or(0);
        base * self.config.difficulty.score_percent() / 100
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn initial_level_time(difficulty: Difficulty) -> Duration {
    LEVEL_TIME * difficulty.time_percent() / 100
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level, layout } => world.load_level(level, layout, out_events),
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_clock(dt, out_events);
        }
        Command::StepPlayer { direction } => world.step_player(direction, out_events),
        Command::ResetSession => world.reset(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Phase, World};
    use tile_maze_core::{Achievement, CellCoord, Difficulty, Direction, Grid, Powerup, Weather};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Level currently being played or awaiting its layout.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Row and column counts of the current or upcoming level.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.rows, world.columns)
    }

    /// Reports whether a layout is loaded and accepting movement.
    #[must_use]
    pub fn is_playing(world: &World) -> bool {
        world.phase == Phase::Playing
    }

    /// Provides read-only access to the active grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Power-ups still waiting to be collected.
    #[must_use]
    pub fn powerups(world: &World) -> &[Powerup] {
        &world.powerups
    }

    /// Entry and exit doors of the active level.
    #[must_use]
    pub fn doors(world: &World) -> (CellCoord, CellCoord) {
        (world.start, world.end)
    }

    /// Cell the player occupies.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Reports whether a step in the provided direction would be legal right now.
    #[must_use]
    pub fn can_step(world: &World, direction: Direction) -> bool {
        is_playing(world)
            && world.move_cooldown.is_zero()
            && world.passable_neighbor(direction).is_some()
    }

    /// Time until the player may step again.
    #[must_use]
    pub fn move_cooldown(world: &World) -> Duration {
        world.move_cooldown
    }

    /// Steps taken during the current run.
    #[must_use]
    pub fn steps(world: &World) -> u32 {
        world.steps
    }

    /// Coins collected during the current run.
    #[must_use]
    pub fn coins(world: &World) -> u32 {
        world.coins
    }

    /// Running score displayed while playing.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Score the run would earn if it ended now.
    #[must_use]
    pub fn final_score(world: &World) -> u64 {
        world.final_score()
    }

    /// Time left on the level timer.
    #[must_use]
    pub fn time_left(world: &World) -> Duration {
        world.time_left()
    }

    /// Remaining duration of the active speed boost, if any.
    #[must_use]
    pub fn speed_boost(world: &World) -> Option<Duration> {
        world.speed_boost
    }

    /// Weather applied to the run.
    #[must_use]
    pub fn weather(world: &World) -> Weather {
        world.config.weather
    }

    /// Difficulty applied to the run.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.config.difficulty
    }

    /// Achievements unlocked during the current run, in declaration order.
    #[must_use]
    pub fn achievements(world: &World) -> Vec<Achievement> {
        world.achievements.iter().copied().collect()
    }
}
