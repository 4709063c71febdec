//! Loading initial patterns, from RLE text or from random "soup".

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod rle;
mod soup;

use crate::grid::Grid;
use crate::sim::rule::Rule;
pub use rle::{Pattern, Rle, RleError, RleResult};
pub use soup::{kaleidosoup, soup};

/// Result type returned by pattern loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error encountered while loading a pattern.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The pattern file could not be read.
    #[error("unable to read pattern file {path:?}: {source}")]
    Unreadable {
        /// Path to the pattern file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The RLE header is missing or does not declare a size.
    #[error("malformed RLE header: {0}")]
    MalformedHeader(RleError),
    /// The RLE body is invalid.
    #[error("malformed RLE body: {0}")]
    MalformedBody(RleError),
    /// The pattern does not fit in the grid.
    #[error("{}x{} pattern at ({}, {}) does not fit in {}x{} grid", .pattern.0, .pattern.1, .offset.0, .offset.1, .grid.0, .grid.1)]
    SizeMismatch {
        /// Size declared by the pattern.
        pattern: (usize, usize),
        /// Size of the grid.
        grid: (usize, usize),
        /// Position of the top-left corner of the pattern in the grid.
        offset: (usize, usize),
    },
    /// Random soup parameters are out of range.
    #[error("invalid soup parameters: {0}")]
    InvalidSoup(String),
}
impl From<RleError> for LoadError {
    fn from(e: RleError) -> Self {
        if e.is_header_error() {
            Self::MalformedHeader(e)
        } else {
            Self::MalformedBody(e)
        }
    }
}

/// Where an initial pattern comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternSource {
    /// RLE text.
    Rle {
        /// Contents of the RLE.
        text: String,
    },
    /// RLE file.
    File {
        /// Path to the RLE file.
        path: PathBuf,
    },
    /// Uniformly random cells, leaving a dead border around the edge.
    Soup {
        /// Probability that each cell is alive.
        chance: f64,
        /// Width of the dead border.
        border: usize,
    },
    /// Random cells with fourfold mirror symmetry, leaving a dead border
    /// around the edge.
    KaleidoSoup {
        /// Probability that each cell is alive.
        chance: f64,
        /// Width of the dead border.
        border: usize,
    },
}
impl Default for PatternSource {
    fn default() -> Self {
        Self::KaleidoSoup {
            chance: 0.15,
            border: 5,
        }
    }
}

/// Initial grid produced from a [`PatternSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPattern {
    /// Initial cells.
    pub grid: Grid,
    /// Rule declared by the pattern, if it declares one.
    pub rule: Option<Rule>,
}

impl PatternSource {
    /// Builds a `width` by `height` grid from this source. RLE patterns are
    /// centered in the grid.
    pub fn load(
        &self,
        width: usize,
        height: usize,
        rng: &mut impl Rng,
    ) -> LoadResult<LoadedPattern> {
        match self {
            Self::Rle { text } => load_rle(text, width, height),
            Self::File { path } => {
                debug!("Reading pattern file {:?}", path);
                let text = std::fs::read_to_string(path).map_err(|source| {
                    LoadError::Unreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                load_rle(&text, width, height)
            }
            Self::Soup { chance, border } => Ok(LoadedPattern {
                grid: soup(width, height, *chance, *border, rng)?,
                rule: None,
            }),
            Self::KaleidoSoup { chance, border } => Ok(LoadedPattern {
                grid: kaleidosoup(width, height, *chance, *border, rng)?,
                rule: None,
            }),
        }
    }
}

fn load_rle(text: &str, width: usize, height: usize) -> LoadResult<LoadedPattern> {
    let pattern: Pattern = text.parse()?;
    let offset = pattern.centered_offset(width, height)?;
    Ok(LoadedPattern {
        grid: pattern.to_grid(width, height, offset)?,
        rule: Some(pattern.rule),
    })
}
