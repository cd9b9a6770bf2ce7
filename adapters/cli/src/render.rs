//! Plain-text rendering of a level for terminal output.

use tile_maze_core::{Cell, CellCoord, Grid, Powerup, PowerupKind};

const PLAYER: char = '@';
const ENTRY: char = 'S';
const EXIT: char = 'E';

/// Read-only view of everything drawn on the map.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MapView<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) powerups: &'a [Powerup],
    pub(crate) start: CellCoord,
    pub(crate) end: CellCoord,
    pub(crate) player: Option<CellCoord>,
}

/// Renders the map one line per row, top row first.
#[must_use]
pub(crate) fn render(view: &MapView<'_>) -> String {
    let grid = view.grid;
    let mut output = String::with_capacity((grid.columns() as usize + 1) * grid.rows() as usize);
    for row in 0..grid.rows() {
        let Some(cells) = grid.row(row) else {
            break;
        };
        for (column, cell) in (0..).zip(cells) {
            output.push(glyph(view, CellCoord::new(column, row), *cell));
        }
        output.push('\n');
    }
    output
}

fn glyph(view: &MapView<'_>, coord: CellCoord, cell: Cell) -> char {
    if view.player == Some(coord) {
        return PLAYER;
    }
    if coord == view.start {
        return ENTRY;
    }
    if coord == view.end {
        return EXIT;
    }
    if let Some(powerup) = view.powerups.iter().find(|powerup| powerup.cell == coord) {
        return match powerup.kind {
            PowerupKind::Speed => 's',
            PowerupKind::ExtraTime => 't',
            PowerupKind::Bonus => '$',
        };
    }
    match cell {
        Cell::Open => '.',
        Cell::Wall { .. } => '#',
        Cell::Goal => 'G',
        Cell::Collectible => 'c',
    }
}
