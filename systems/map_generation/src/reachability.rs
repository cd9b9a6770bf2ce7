//! Breadth-first connectivity queries over open grid cells.

use std::collections::VecDeque;

use tile_maze_core::{CellCoord, Direction, Grid};

/// Reports whether `end` can be reached from `start` through open cells.
///
/// Every step has unit cost, so a breadth-first frontier visits cells in the
/// same order a uniform-cost search would. Coordinates outside the grid yield
/// `false`. The search succeeds as soon as `end` leaves the frontier, which
/// makes `start == end` reachable whatever the cell contains.
#[must_use]
pub fn is_reachable(grid: &Grid, start: CellCoord, end: CellCoord) -> bool {
    if !grid.contains(start) || !grid.contains(end) {
        return false;
    }

    let columns = grid.columns() as usize;
    let mut visited = vec![false; columns * grid.rows() as usize];
    let mut frontier = VecDeque::new();
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {
        if cell == end {
            return true;
        }

        let index = offset(columns, cell);
        if visited[index] {
            continue;
        }
        visited[index] = true;

        for direction in Direction::ALL {
            let Some(neighbor) = cell.neighbor(direction) else {
                continue;
            };
            if !grid.is_open(neighbor) || visited[offset(columns, neighbor)] {
                continue;
            }
            frontier.push_back(neighbor);
        }
    }

    false
}

fn offset(columns: usize, cell: CellCoord) -> usize {
    cell.row() as usize * columns + cell.column() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_maze_core::Cell;

    const WALL: Cell = Cell::Wall { variant: 0 };

    fn grid_with_middle_row_sealed_except_center() -> Grid {
        let mut grid = Grid::open(3, 3);
        assert!(grid.set(CellCoord::new(0, 1), WALL));
        assert!(grid.set(CellCoord::new(2, 1), WALL));
        grid
    }

    #[test]
    fn path_through_single_opening_is_found() {
        let grid = grid_with_middle_row_sealed_except_center();
        assert!(is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2)));
    }

    #[test]
    fn sealing_the_opening_disconnects_the_corners() {
        let mut grid = grid_with_middle_row_sealed_except_center();
        assert!(grid.set(CellCoord::new(1, 1), WALL));
        assert!(!is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2)));
    }

    #[test]
    fn identical_endpoints_are_reachable_even_inside_walls() {
        let mut grid = Grid::open(2, 2);
        for cell in grid.coords().collect::<Vec<_>>() {
            assert!(grid.set(cell, WALL));
        }
        for cell in grid.coords() {
            assert!(is_reachable(&grid, cell, cell));
        }
    }

    #[test]
    fn out_of_bounds_endpoints_are_unreachable() {
        let grid = Grid::open(3, 4);
        assert!(!is_reachable(&grid, CellCoord::new(4, 0), CellCoord::new(0, 0)));
        assert!(!is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(0, 3)));
        assert!(!is_reachable(&grid, CellCoord::new(9, 9), CellCoord::new(9, 9)));
    }

    #[test]
    fn non_square_grids_use_column_row_order() {
        let mut grid = Grid::open(2, 5);
        for column in 0..4 {
            assert!(grid.set(CellCoord::new(column, 1), WALL));
        }
        assert!(is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(4, 1)));
        assert!(!is_reachable(&grid, CellCoord::new(0, 0), CellCoord::new(3, 1)));
    }

    #[test]
    fn repeated_queries_agree() {
        let grid = grid_with_middle_row_sealed_except_center();
        let first = is_reachable(&grid, CellCoord::new(2, 0), CellCoord::new(0, 2));
        for _ in 0..8 {
            assert_eq!(
                is_reachable(&grid, CellCoord::new(2, 0), CellCoord::new(0, 2)),
                first
            );
        }
    }
}
