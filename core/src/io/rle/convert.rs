use log::{debug, warn};
use std::str::FromStr;

use super::components::RleRunVec;
use super::*;
use crate::grid::Grid;
use crate::io::{LoadError, LoadResult};
use crate::sim::rule::{Rule, LIFE};

/// Pattern decoded from an RLE, ready to be placed into a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Width declared in the header.
    pub width: usize,
    /// Height declared in the header.
    pub height: usize,
    /// Rule declared in the header, or B3/S23 if there was none.
    pub rule: Rule,
    /// Runs in the order they appear.
    pub runs: Vec<RleRun>,
}
impl FromStr for Pattern {
    type Err = LoadError;

    fn from_str(s: &str) -> LoadResult<Self> {
        Ok(Self::from(s.parse::<Rle>()?))
    }
}
impl From<Rle> for Pattern {
    fn from(rle: Rle) -> Self {
        let rule = match rle.header.rule.as_deref() {
            None => {
                warn!("No rule in RLE header; defaulting to {}", LIFE);
                LIFE
            }
            Some(rule_str) => rule_str.parse().unwrap_or_else(|e| {
                warn!("{}; defaulting to {}", e, LIFE);
                LIFE
            }),
        };
        Self {
            width: rle.header.width,
            height: rle.header.height,
            rule,
            runs: rle.runs,
        }
    }
}
impl Pattern {
    /// Returns the offset that centers the pattern in a grid of the given
    /// size.
    pub fn centered_offset(&self, grid_width: usize, grid_height: usize) -> LoadResult<(usize, usize)> {
        match (
            grid_width.checked_sub(self.width),
            grid_height.checked_sub(self.height),
        ) {
            (Some(dx), Some(dy)) => Ok((dx / 2, dy / 2)),
            _ => Err(LoadError::SizeMismatch {
                pattern: (self.width, self.height),
                grid: (grid_width, grid_height),
                offset: (0, 0),
            }),
        }
    }

    /// Sets the live cells of the pattern in `grid`, with the top-left corner
    /// of the pattern at `offset`. Cells that the pattern leaves dead are not
    /// modified.
    pub fn place(&self, grid: &mut Grid, offset: (usize, usize)) -> LoadResult<()> {
        let (x_offset, y_offset) = offset;
        let fits = |offset: usize, len: usize, grid_len: usize| {
            offset.checked_add(len).map_or(false, |end| end <= grid_len)
        };
        if !fits(x_offset, self.width, grid.width()) || !fits(y_offset, self.height, grid.height())
        {
            return Err(LoadError::SizeMismatch {
                pattern: (self.width, self.height),
                grid: (grid.width(), grid.height()),
                offset,
            });
        }
        debug!(
            "Placing {}x{} pattern at ({}, {})",
            self.width, self.height, x_offset, y_offset,
        );

        let mut x = 0_usize;
        let mut y = 0_usize;
        for run in &self.runs {
            match run.item {
                RleItem::Dead => x = x.saturating_add(run.count),
                RleItem::Alive => {
                    for _ in 0..run.count {
                        if x >= self.width || y >= self.height {
                            return Err(LoadError::MalformedBody(RleError::CellOutsidePattern {
                                x,
                                y,
                                width: self.width,
                                height: self.height,
                            }));
                        }
                        grid.set(x_offset + x, y_offset + y, true);
                        x += 1;
                    }
                }
                RleItem::NextRow => {
                    x = 0;
                    y = y.saturating_add(run.count);
                }
                RleItem::End => break,
            }
        }
        Ok(())
    }

    /// Returns a new grid of the given size containing only this pattern at
    /// `offset`.
    pub fn to_grid(&self, width: usize, height: usize, offset: (usize, usize)) -> LoadResult<Grid> {
        let mut grid = Grid::new(width, height);
        self.place(&mut grid, offset)?;
        Ok(grid)
    }
}

impl Rle {
    /// Encodes an entire grid, including any dead border, as an RLE.
    pub fn from_grid(grid: &Grid, rule: &Rule) -> Self {
        let mut runs = RleRunVec::default();
        for row in grid.cells().chunks(grid.width().max(1)) {
            for &cell in row {
                runs.append(RleItem::from(cell));
            }
            runs.append(RleItem::NextRow);
        }
        runs.append(RleItem::End);

        Self {
            header: RleHeader {
                width: grid.width(),
                height: grid.height(),
                rule: Some(rule.to_string()),
            },
            runs: runs.into_vec(),
            comments: String::new(),
        }
    }
}

impl Grid {
    /// Encodes the grid as an RLE string.
    pub fn to_rle_string(&self, rule: &Rule) -> String {
        Rle::from_grid(self, rule).to_string()
    }
}
