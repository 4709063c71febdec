//! Single-generation transition of a whole grid.
//!
//! The stepper never recounts neighbors. Cells that change state push `+1` or
//! `-1` into the counts of their neighbors, so a generation costs one pass over
//! the grid plus work proportional to the number of changed cells.

use super::rule::Rule;
use crate::grid::{Board, Grid, NeighborCounts};

/// A cell that changed state during a generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellChange {
    /// X coordinate.
    pub x: usize,
    /// Y coordinate.
    pub y: usize,
    /// New state of the cell.
    pub alive: bool,
}

/// Advances `grid` by one generation, returning the new grid, the new neighbor
/// counts, and the list of cells that changed in row-major order.
///
/// `counts` must describe `grid`; this is the invariant that [`Board`]
/// maintains.
///
/// # Panics
///
/// This function panics if `grid` and `counts` have different dimensions.
pub fn step(
    grid: &Grid,
    counts: &NeighborCounts,
    rule: &Rule,
) -> (Grid, NeighborCounts, Vec<CellChange>) {
    assert!(
        grid.width() == counts.width() && grid.height() == counts.height(),
        "Grid and neighbor counts have different dimensions",
    );

    let mut new_grid = grid.clone();
    let mut new_counts = counts.clone();
    let mut changes = vec![];
    let isolated_cells_change = rule.is_birth(0);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let alive = grid.get(x, y);
            let live_neighbors = counts.get(x, y);
            if !alive && live_neighbors == 0 && !isolated_cells_change {
                continue;
            }

            if !alive && rule.is_birth(live_neighbors) {
                new_grid.set(x, y, true);
                new_counts.increment_around(x, y);
                changes.push(CellChange { x, y, alive: true });
            } else if alive && !rule.is_survival(live_neighbors) {
                new_grid.set(x, y, false);
                new_counts.decrement_around(x, y);
                changes.push(CellChange { x, y, alive: false });
            }
        }
    }

    (new_grid, new_counts, changes)
}

/// Advances `grid` by one generation by counting every cell's neighbors from
/// scratch. This is much slower than [`step()`] and exists as a reference to
/// check it against.
pub fn step_by_recount(grid: &Grid, rule: &Rule) -> Grid {
    let mut ret = Grid::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let live_neighbors = grid.count_live_neighbors(x, y);
            ret.set(x, y, rule.transition(grid.get(x, y), live_neighbors));
        }
    }
    ret
}

impl Board {
    /// Advances the board by one generation, returning the new board and the
    /// cells that changed.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn step(&self, rule: &Rule) -> (Board, Vec<CellChange>) {
        let (grid, counts, changes) = step(self.grid(), self.counts(), rule);
        (Board::from_parts_unchecked(grid, counts), changes)
    }
}
