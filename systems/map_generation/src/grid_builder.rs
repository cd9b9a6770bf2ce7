//! Candidate grid construction: door corners, corridor carving and wall scatter.

use rand::Rng;
use tile_maze_core::{Cell, CellCoord, Grid};

/// Opposite-corner pairings the entry and exit doors may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerPair {
    /// Start top-left, exit bottom-right.
    TopLeft,
    /// Start top-right, exit bottom-left.
    TopRight,
    /// Start bottom-left, exit top-right.
    BottomLeft,
    /// Start bottom-right, exit top-left.
    BottomRight,
}

impl CornerPair {
    /// Every pairing, drawn from uniformly.
    pub const ALL: [CornerPair; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Resolves the start and end cells for a grid of the provided size.
    #[must_use]
    pub const fn resolve(self, rows: u32, columns: u32) -> (CellCoord, CellCoord) {
        let last_column = columns.saturating_sub(1);
        let last_row = rows.saturating_sub(1);
        let top_left = CellCoord::new(0, 0);
        let top_right = CellCoord::new(last_column, 0);
        let bottom_left = CellCoord::new(0, last_row);
        let bottom_right = CellCoord::new(last_column, last_row);
        match self {
            Self::TopLeft => (top_left, bottom_right),
            Self::TopRight => (top_right, bottom_left),
            Self::BottomLeft => (bottom_left, top_right),
            Self::BottomRight => (bottom_right, top_left),
        }
    }
}

/// Grid candidate awaiting power-up placement and validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Cells after wall scatter.
    pub grid: Grid,
    /// Entry door.
    pub start: CellCoord,
    /// Exit door.
    pub end: CellCoord,
}

/// Builds a candidate grid with doors in opposite corners and scattered walls.
///
/// A corridor is carved from start to end first (columns, then rows), but the
/// scatter pass that follows may wall it off again. Callers must validate the
/// candidate with [`crate::is_reachable`].
pub fn build_candidate<R>(
    rows: u32,
    columns: u32,
    wall_probability: f64,
    wall_variants: u8,
    rng: &mut R,
) -> Candidate
where
    R: Rng + ?Sized,
{
    let rows = rows.max(1);
    let columns = columns.max(1);
    let corners = CornerPair::ALL[rng.gen_range(0..CornerPair::ALL.len())];
    let (start, end) = corners.resolve(rows, columns);

    let mut grid = Grid::open(rows, columns);
    carve_corridor(&mut grid, start, end);
    scatter_walls(&mut grid, start, end, wall_probability, wall_variants, rng);

    Candidate { grid, start, end }
}

/// Opens every cell on the L-shaped walk from `start` to `end`.
pub fn carve_corridor(grid: &mut Grid, start: CellCoord, end: CellCoord) {
    let mut column = start.column();
    let mut row = start.row();
    let _ = grid.set(start, Cell::Open);

    while column != end.column() || row != end.row() {
        if column < end.column() {
            column += 1;
        } else if column > end.column() {
            column -= 1;
        } else if row < end.row() {
            row += 1;
        } else {
            row -= 1;
        }
        let _ = grid.set(CellCoord::new(column, row), Cell::Open);
    }
}

/// Turns open cells other than the doors into walls with the given probability.
///
/// A NaN probability falls back to [`crate::DEFAULT_WALL_PROBABILITY`].
pub fn scatter_walls<R>(
    grid: &mut Grid,
    start: CellCoord,
    end: CellCoord,
    wall_probability: f64,
    wall_variants: u8,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let probability = if wall_probability.is_nan() {
        crate::DEFAULT_WALL_PROBABILITY
    } else {
        wall_probability.clamp(0.0, 1.0)
    };
    let variants = wall_variants.max(1);
    let cells: Vec<CellCoord> = grid.coords().collect();

    for cell in cells {
        if cell == start || cell == end || !grid.is_open(cell) {
            continue;
        }
        if rng.gen_bool(probability) {
            let variant = rng.gen_range(0..variants);
            let _ = grid.set(cell, Cell::Wall { variant });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn corner_pairs_are_opposite() {
        for pair in CornerPair::ALL {
            let (start, end) = pair.resolve(4, 7);
            assert_eq!(start.manhattan_distance(end), 3 + 6);
        }
        assert_eq!(
            CornerPair::TopRight.resolve(4, 7),
            (CellCoord::new(6, 0), CellCoord::new(0, 3))
        );
    }

    #[test]
    fn corridor_walks_columns_before_rows() {
        let mut grid = Grid::open(3, 3);
        for cell in grid.coords().collect::<Vec<_>>() {
            assert!(grid.set(cell, Cell::Wall { variant: 0 }));
        }
        carve_corridor(&mut grid, CellCoord::new(0, 0), CellCoord::new(2, 2));

        let open: Vec<CellCoord> = grid.coords().filter(|cell| grid.is_open(*cell)).collect();
        assert_eq!(
            open,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(2, 1),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn zero_probability_leaves_grid_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let candidate = build_candidate(6, 9, 0.0, 4, &mut rng);
        assert_eq!(candidate.grid.wall_count(), 0);
        assert_eq!(candidate.grid.rows(), 6);
        assert_eq!(candidate.grid.columns(), 9);
    }

    #[test]
    fn certain_walls_spare_only_the_doors() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let candidate = build_candidate(5, 5, 1.0, 3, &mut rng);
        assert_eq!(candidate.grid.wall_count(), 25 - 2);
        assert!(candidate.grid.is_open(candidate.start));
        assert!(candidate.grid.is_open(candidate.end));
        for cell in candidate.grid.coords() {
            if let Some(Cell::Wall { variant }) = candidate.grid.get(cell) {
                assert!(variant < 3);
            }
        }
    }

    #[test]
    fn doors_stay_open_for_many_seeds() {
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let candidate = build_candidate(7, 5, 0.3, 8, &mut rng);
            assert!(candidate.grid.is_open(candidate.start));
            assert!(candidate.grid.is_open(candidate.end));
            assert_ne!(candidate.start, candidate.end);
        }
    }

    #[test]
    fn nan_probability_scatters_with_the_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let candidate = build_candidate(5, 5, f64::NAN, 8, &mut rng);
        assert!(candidate.grid.is_open(candidate.start));
        assert!(candidate.grid.is_open(candidate.end));
        assert!(candidate.grid.wall_count() <= 25 - 2);

        let mut grid = Grid::open(4, 4);
        let start = CellCoord::new(0, 0);
        let end = CellCoord::new(3, 3);
        scatter_walls(&mut grid, start, end, f64::NAN, 8, &mut rng);
        assert!(grid.is_open(start));
        assert!(grid.is_open(end));
    }

    #[test]
    fn degenerate_sizes_are_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let candidate = build_candidate(0, 0, 0.3, 8, &mut rng);
        assert_eq!(candidate.grid.rows(), 1);
        assert_eq!(candidate.grid.columns(), 1);
        assert_eq!(candidate.start, candidate.end);
    }
}
