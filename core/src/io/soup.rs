//! Random initial patterns.

use rand::Rng;

use super::{LoadError, LoadResult};
use crate::grid::Grid;

fn check_soup_params(width: usize, height: usize, chance: f64, border: usize) -> LoadResult<()> {
    if !(0.0..=1.0).contains(&chance) {
        return Err(LoadError::InvalidSoup(format!(
            "chance {} is not between 0 and 1",
            chance
        )));
    }
    if border.saturating_mul(2) >= width.min(height) {
        return Err(LoadError::InvalidSoup(format!(
            "border {} leaves no room in {}x{} grid",
            border, width, height
        )));
    }
    Ok(())
}

/// Returns a grid where each cell at least `border` cells away from the edge
/// is alive with probability `chance`.
pub fn soup(
    width: usize,
    height: usize,
    chance: f64,
    border: usize,
    rng: &mut impl Rng,
) -> LoadResult<Grid> {
    check_soup_params(width, height, chance, border)?;
    let mut grid = Grid::new(width, height);
    for y in border..height - border {
        for x in border..width - border {
            grid.set(x, y, rng.gen::<f64>() < chance);
        }
    }
    Ok(grid)
}

/// Returns a random grid like [`soup()`], except that only the top-left
/// quadrant is random and it is mirrored into the other three, so the grid is
/// symmetric across both axes.
pub fn kaleidosoup(
    width: usize,
    height: usize,
    chance: f64,
    border: usize,
    rng: &mut impl Rng,
) -> LoadResult<Grid> {
    check_soup_params(width, height, chance, border)?;
    let mut grid = Grid::new(width, height);
    // Round up so that the middle row/column of an odd-sized grid is included.
    for y in border..(height + 1) / 2 {
        for x in border..(width + 1) / 2 {
            let state = rng.gen::<f64>() < chance;
            let mirror_x = width - 1 - x;
            let mirror_y = height - 1 - y;
            grid.set(x, y, state);
            grid.set(mirror_x, y, state);
            grid.set(x, mirror_y, state);
            grid.set(mirror_x, mirror_y, state);
        }
    }
    Ok(grid)
}
