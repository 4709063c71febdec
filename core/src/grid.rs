//! Fixed-size 2D grids of cells and their neighbor counts.
//!
//! Cells are stored in a flat array indexed by `y * width + x`, with X
//! increasing to the right and Y increasing downwards (the same orientation as
//! RLE text). Cells outside the grid do not exist; there is no wraparound.

use itertools::Itertools;
use std::fmt;

/// Offsets of the 8 cells in the Moore neighborhood.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rectangular grid of live/dead cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[bool]>,
}
impl Grid {
    /// Constructs a grid with every cell dead.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height].into_boxed_slice(),
        }
    }
    /// Constructs a grid from a list of live cell positions.
    ///
    /// # Panics
    ///
    /// This function panics if any position is outside the grid.
    pub fn with_live_cells(
        width: usize,
        height: usize,
        live_cells: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut ret = Self::new(width, height);
        for (x, y) in live_cells {
            ret.set(x, y, true);
        }
        ret
    }

    /// Returns the width of the grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the height of the grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    /// Returns whether `(x, y)` is inside the grid.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn flatten_idx(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "Position ({}, {}) is outside {}x{} grid",
            x,
            y,
            self.width,
            self.height,
        );
        y * self.width + x
    }

    /// Returns whether the cell at `(x, y)` is alive.
    ///
    /// # Panics
    ///
    /// This function panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.flatten_idx(x, y)]
    }
    /// Sets the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// This function panics if the position is outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.flatten_idx(x, y);
        self.cells[idx] = alive;
    }

    /// Returns the number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
    /// Returns whether every cell is dead.
    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
    /// Returns the positions of all live cells in row-major order.
    pub fn live_cells(&self) -> impl '_ + Iterator<Item = (usize, usize)> {
        let width = self.width;
        self.cells
            .iter()
            .positions(|&cell| cell)
            .map(move |idx| (idx % width, idx / width))
    }
    /// Returns the in-bounds Moore neighbors of `(x, y)`.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width, self.height);
        MOORE_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            if nx < width && ny < height {
                Some((nx, ny))
            } else {
                None
            }
        })
    }
    /// Counts the live Moore neighbors of `(x, y)` by looking at each of them.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y).filter(|&(nx, ny)| self.get(nx, ny)).count() as u8
    }
}
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for &cell in row {
                write!(f, "{}", if cell { 'O' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Number of live Moore neighbors of every cell in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    width: usize,
    height: usize,
    counts: Box<[u8]>,
}
impl NeighborCounts {
    /// Counts the neighbors of every cell in `grid` from scratch.
    pub fn from_grid(grid: &Grid) -> Self {
        let counts = (0..grid.height())
            .cartesian_product(0..grid.width())
            .map(|(y, x)| grid.count_live_neighbors(x, y))
            .collect_vec()
            .into_boxed_slice();
        Self {
            width: grid.width(),
            height: grid.height(),
            counts,
        }
    }

    /// Returns the width of the grid these counts describe.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the height of the grid these counts describe.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of live neighbors of `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "Position out of bounds");
        self.counts[y * self.width + x]
    }

    /// Adds 1 to the count of every in-bounds neighbor of `(x, y)`, recording
    /// that `(x, y)` was born.
    pub fn increment_around(&mut self, x: usize, y: usize) {
        self.adjust_around(x, y, |count| count + 1);
    }
    /// Subtracts 1 from the count of every in-bounds neighbor of `(x, y)`,
    /// recording that `(x, y)` died.
    pub fn decrement_around(&mut self, x: usize, y: usize) {
        self.adjust_around(x, y, |count| count - 1);
    }
    fn adjust_around(&mut self, x: usize, y: usize, f: impl Fn(u8) -> u8) {
        for &(dx, dy) in &MOORE_OFFSETS {
            if let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                if nx < self.width && ny < self.height {
                    let idx = ny * self.width + nx;
                    self.counts[idx] = f(self.counts[idx]);
                }
            }
        }
    }
}

/// A grid paired with its neighbor counts.
///
/// The two halves are only ever created and replaced together, so the counts
/// always describe the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    counts: NeighborCounts,
}
impl From<Grid> for Board {
    fn from(grid: Grid) -> Self {
        let counts = NeighborCounts::from_grid(&grid);
        Self { grid, counts }
    }
}
impl Board {
    /// Constructs an empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from(Grid::new(width, height))
    }
    pub(crate) fn from_parts_unchecked(grid: Grid, counts: NeighborCounts) -> Self {
        Self { grid, counts }
    }

    /// Returns the cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// Returns the neighbor counts.
    pub fn counts(&self) -> &NeighborCounts {
        &self.counts
    }
    /// Consumes the board and returns the cells.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
