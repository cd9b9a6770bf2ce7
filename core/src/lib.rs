#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Map generation produces [`GenerationResult`]
//! values that travel into the world through [`Command::LoadLevel`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tile Maze.";

/// Level every run starts on.
pub const INITIAL_LEVEL: u32 = 1;

/// Row count of the first level.
pub const INITIAL_ROWS: u32 = 5;

/// Column count of the first level.
pub const INITIAL_COLUMNS: u32 = 5;

/// Edge length of a single tile measured in presentation pixels.
pub const BLOCK_SIZE: u32 = 40;

/// Gap left between neighbouring tiles measured in presentation pixels.
pub const BLOCK_GAP: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Installs a freshly generated layout as the active level.
    LoadLevel {
        /// Level number the layout was generated for.
        level: u32,
        /// Generated grid, power-ups and door positions.
        layout: GenerationResult,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance a single cell in the specified direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Abandons the current run and returns to the first level.
    ResetSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a new layout became the active level.
    LevelLoaded {
        /// Level number now being played.
        level: u32,
        /// Number of rows in the loaded grid.
        rows: u32,
        /// Number of columns in the loaded grid.
        columns: u32,
        /// Whether the layout came out of generation or the fallback.
        origin: LayoutOrigin,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that a step was refused because the target cell is not passable.
    MoveBlocked {
        /// Cell the player occupies.
        from: CellCoord,
        /// Direction of the refused step.
        direction: Direction,
    },
    /// Confirms that the player picked up a power-up.
    PowerupCollected {
        /// Power-up that was removed from the level.
        powerup: Powerup,
    },
    /// Announces that an active speed boost ran out.
    SpeedBoostExpired,
    /// Announces that the player reached the exit door.
    LevelCompleted {
        /// Level number that should be generated next.
        level: u32,
        /// Row count the next level should use.
        rows: u32,
        /// Column count the next level should use.
        columns: u32,
    },
    /// Announces that an achievement was earned during the current run.
    AchievementUnlocked {
        /// Achievement that was earned.
        achievement: Achievement,
    },
    /// Announces that the level timer ran out and the run ended.
    TimeExpired {
        /// Score earned by the finished run.
        final_score: u64,
    },
    /// Announces that the session returned to its initial level.
    SessionReset {
        /// Level number that should be generated next.
        level: u32,
        /// Row count the next level should use.
        rows: u32,
        /// Column count the next level should use.
        columns: u32,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in the fixed expansion order used by searches.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// The column is the horizontal (x) index and the row is the vertical (y)
/// index. Every crate in the workspace addresses cells this way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell adjacent to this one in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's concern.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Passable floor.
    Open,
    /// Impassable block.
    Wall {
        /// Decorative texture index, meaningful only to renderers.
        variant: u8,
    },
    /// Exit marker used by alternate generation modes.
    Goal,
    /// Collectible marker used by alternate generation modes.
    Collectible,
}

impl Cell {
    /// Reports whether paths may pass through the cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Reports whether the cell blocks movement as a wall.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall { .. })
    }
}

/// Dense rows×columns array of cells stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell open.
    #[must_use]
    pub fn open(rows: u32, columns: u32) -> Self {
        let count = rows as usize * columns as usize;
        Self {
            rows,
            columns,
            cells: vec![Cell::Open; count],
        }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Content of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Reports whether the provided cell exists and is open.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.get(cell).is_some_and(Cell::is_open)
    }

    /// Overwrites the provided cell. Returns `false` if it lies outside the grid.
    pub fn set(&mut self, cell: CellCoord, value: Cell) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Cells of a single row, ordered by column.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let width = self.columns as usize;
        let start = row as usize * width;
        self.cells.get(start..start + width)
    }

    /// Iterator over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    /// Number of wall cells in the grid.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall()).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.row() as usize * self.columns as usize + cell.column() as usize)
    }
}

/// Kinds of collectible power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Temporarily shortens the movement cooldown.
    Speed,
    /// Adds time to the level timer.
    ExtraTime,
    /// Awards a coin and points.
    Bonus,
}

impl PowerupKind {
    /// All kinds in the order they are placed during generation.
    pub const ALL: [PowerupKind; 3] = [Self::Speed, Self::ExtraTime, Self::Bonus];
}

/// Power-up resting on a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Powerup {
    /// Cell the power-up occupies.
    pub cell: CellCoord,
    /// Effect granted on collection.
    pub kind: PowerupKind,
}

impl Powerup {
    /// Creates a new power-up at the provided cell.
    #[must_use]
    pub const fn new(cell: CellCoord, kind: PowerupKind) -> Self {
        Self { cell, kind }
    }
}

/// Blank decorative surface sized to the map in presentation pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgroundSurface {
    /// Width of the surface in pixels.
    pub width: u32,
    /// Height of the surface in pixels.
    pub height: u32,
}

impl BackgroundSurface {
    /// Sizes a surface for a grid with the provided dimensions.
    #[must_use]
    pub const fn for_grid(rows: u32, columns: u32) -> Self {
        Self {
            width: span(columns),
            height: span(rows),
        }
    }
}

const fn span(count: u32) -> u32 {
    count.saturating_mul(BLOCK_SIZE + BLOCK_GAP).saturating_sub(BLOCK_GAP)
}

/// Describes how a [`GenerationResult`] was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutOrigin {
    /// A random candidate passed the reachability gate.
    Generated {
        /// One-based attempt number that produced the layout.
        attempt: u32,
    },
    /// Every attempt failed and the empty fallback layout was used.
    Fallback,
}

/// Output of map generation consumed by the world and renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Cell contents of the level.
    pub grid: Grid,
    /// Power-ups placed on the level.
    pub powerups: Vec<Powerup>,
    /// Entry door the player starts on.
    pub start: CellCoord,
    /// Exit door that completes the level.
    pub end: CellCoord,
    /// Decorative background surface, absent for the fallback layout.
    pub background: Option<BackgroundSurface>,
    /// How the layout was produced.
    pub origin: LayoutOrigin,
}

impl GenerationResult {
    /// Reports whether the layout is the degraded fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, LayoutOrigin::Fallback)
    }

    /// Number of power-ups of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: PowerupKind) -> usize {
        self.powerups
            .iter()
            .filter(|powerup| powerup.kind == kind)
            .count()
    }
}

/// Difficulty band derived from the level number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelTier {
    /// Levels up to and including 10.
    Early,
    /// Levels 11 through 50.
    Mid,
    /// Levels beyond 50.
    Late,
}

impl LevelTier {
    /// Classifies the provided level number.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        match level {
            0..=10 => Self::Early,
            11..=50 => Self::Mid,
            _ => Self::Late,
        }
    }
}

/// Ambient weather applied to a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// No effect on movement.
    #[default]
    Clear,
    /// Shortens the movement cooldown to 80%.
    Rain,
    /// Halves the movement cooldown.
    Snow,
}

impl Weather {
    /// Movement cooldown scaling expressed in percent.
    #[must_use]
    pub const fn movement_percent(self) -> u32 {
        match self {
            Self::Clear => 100,
            Self::Rain => 80,
            Self::Snow => 50,
        }
    }
}

/// Player-selected difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Longer timer, base score.
    Easy,
    /// Standard timer, boosted score.
    #[default]
    Normal,
    /// Shorter timer, doubled score.
    Hard,
}

impl Difficulty {
    /// Scaling of the first level's time budget expressed in percent.
    #[must_use]
    pub const fn time_percent(self) -> u32 {
        match self {
            Self::Easy => 120,
            Self::Normal => 100,
            Self::Hard => 80,
        }
    }

    /// Scaling of a run's final score expressed in percent.
    #[must_use]
    pub const fn score_percent(self) -> u64 {
        match self {
            Self::Easy => 100,
            Self::Normal => 150,
            Self::Hard => 200,
        }
    }
}

/// Run statistics that achievements are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementProgress {
    /// Level being completed.
    pub level: u32,
    /// Time left on the level timer.
    pub time_left: Duration,
    /// Steps taken during the run.
    pub steps: u32,
    /// Coins collected during the run.
    pub coins_collected: u32,
}

/// Closed set of achievements a run may earn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    /// Finish a level with more than ten whole seconds left.
    QuickFinish,
    /// Finish a level having taken fewer than twenty steps.
    SpeedRunner,
    /// Collect more than five coins.
    CoinCollector,
}

impl Achievement {
    /// Every achievement in evaluation order.
    pub const ALL: [Achievement; 3] = [Self::QuickFinish, Self::SpeedRunner, Self::CoinCollector];

    /// Points awarded when the achievement unlocks.
    #[must_use]
    pub const fn reward(self) -> u64 {
        match self {
            Self::QuickFinish => 500,
            Self::SpeedRunner => 1_000,
            Self::CoinCollector => 750,
        }
    }

    /// Reports whether the provided progress satisfies the achievement.
    #[must_use]
    pub fn is_met(self, progress: &AchievementProgress) -> bool {
        match self {
            Self::QuickFinish => progress.time_left.as_secs() > 10,
            Self::SpeedRunner => progress.steps < 20,
            Self::CoinCollector => progress.coins_collected > 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Achievement, AchievementProgress, BackgroundSurface, Cell, CellCoord, Direction, Grid,
        LevelTier, Powerup, PowerupKind,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn neighbor_refuses_negative_coordinates() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.neighbor(Direction::North), None);
        assert_eq!(origin.neighbor(Direction::West), None);
        assert_eq!(origin.neighbor(Direction::East), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.neighbor(Direction::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn grid_uses_column_row_addressing() {
        let mut grid = Grid::open(2, 3);
        assert!(grid.set(CellCoord::new(2, 1), Cell::Wall { variant: 0 }));
        assert_eq!(grid.row(1), Some(&[Cell::Open, Cell::Open, Cell::Wall { variant: 0 }][..]));
        assert!(!grid.is_open(CellCoord::new(2, 1)));
        assert!(grid.is_open(CellCoord::new(1, 1)));
        assert_eq!(grid.get(CellCoord::new(3, 0)), None);
        assert_eq!(grid.get(CellCoord::new(0, 2)), None);
        assert!(!grid.set(CellCoord::new(0, 2), Cell::Open));
        assert_eq!(grid.wall_count(), 1);
        assert_eq!(grid.coords().count(), 6);
    }

    #[test]
    fn background_surface_spans_tiles_and_gaps() {
        let surface = BackgroundSurface::for_grid(5, 6);
        assert_eq!(surface.width, 6 * 45 - 5);
        assert_eq!(surface.height, 5 * 45 - 5);

        let huge = BackgroundSurface::for_grid(1, 100_000_000);
        assert_eq!(huge.width, u32::MAX - 5);
        assert_eq!(huge.height, 40);
        assert_eq!(BackgroundSurface::for_grid(0, 0).width, 0);
    }

    #[test]
    fn level_tiers_follow_thresholds() {
        assert_eq!(LevelTier::for_level(1), LevelTier::Early);
        assert_eq!(LevelTier::for_level(10), LevelTier::Early);
        assert_eq!(LevelTier::for_level(11), LevelTier::Mid);
        assert_eq!(LevelTier::for_level(50), LevelTier::Mid);
        assert_eq!(LevelTier::for_level(51), LevelTier::Late);
    }

    #[test]
    fn achievements_compare_against_progress() {
        let progress = AchievementProgress {
            level: 3,
            time_left: Duration::from_secs(11),
            steps: 25,
            coins_collected: 6,
        };
        assert!(Achievement::QuickFinish.is_met(&progress));
        assert!(!Achievement::SpeedRunner.is_met(&progress));
        assert!(Achievement::CoinCollector.is_met(&progress));

        let slow = AchievementProgress {
            time_left: Duration::from_secs(10),
            ..progress
        };
        assert!(!Achievement::QuickFinish.is_met(&slow));

        let fractional = AchievementProgress {
            time_left: Duration::from_millis(10_900),
            ..progress
        };
        assert!(!Achievement::QuickFinish.is_met(&fractional));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        let mut grid = Grid::open(3, 4);
        let _ = grid.set(CellCoord::new(1, 2), Cell::Wall { variant: 3 });
        assert_round_trip(&grid);
    }

    #[test]
    fn powerup_round_trips_through_bincode() {
        assert_round_trip(&Powerup::new(CellCoord::new(2, 1), PowerupKind::ExtraTime));
    }
}
