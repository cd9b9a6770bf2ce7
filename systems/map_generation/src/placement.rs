//! Power-up placement with bounded random retries.

use rand::Rng;
use tile_maze_core::{CellCoord, Grid, Powerup};

use crate::is_reachable;

/// Draws up to `attempts` random cells and returns the first valid one.
///
/// A cell qualifies when it is open, is neither door, carries no existing
/// power-up and can be reached from `start`. `None` means the caller should
/// skip this power-up; distributions are best-effort.
pub fn place_one<R>(
    grid: &Grid,
    existing: &[Powerup],
    start: CellCoord,
    end: CellCoord,
    attempts: u32,
    rng: &mut R,
) -> Option<CellCoord>
where
    R: Rng + ?Sized,
{
    if grid.rows() == 0 || grid.columns() == 0 {
        return None;
    }

    for _ in 0..attempts {
        let cell = CellCoord::new(
            rng.gen_range(0..grid.columns()),
            rng.gen_range(0..grid.rows()),
        );

        if !grid.is_open(cell) || cell == start || cell == end {
            continue;
        }
        if existing.iter().any(|powerup| powerup.cell == cell) {
            continue;
        }
        if is_reachable(grid, start, cell) {
            return Some(cell);
        }
    }

    None
}
