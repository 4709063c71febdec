//! Golly's 2D ["RLE" format](http://golly.sourceforge.net/Help/formats.html#rle)
//! for two-state patterns.
//!
//! RLEs can be `parse()`d from strings and `to_string()`ed back, and convert
//! to/from [`Pattern`]s, which can be placed into a [`Grid`](crate::grid::Grid).
//!
//! Lines starting with `#` are comments. The first line starting with `x` is
//! the header, such as `x = 3, y = 3, rule = B3/S23`. Everything else is the
//! body: a sequence of runs, each an optional count followed by `b` (dead
//! cells), `o` (live cells), `$` (end of row), or `!` (end of pattern).

mod components;
mod convert;

pub use components::{Rle, RleHeader, RleItem, RleRun};
pub use convert::Pattern;

const MAX_LINE_LEN: usize = 70;

/// Result type returned by fallible RLE routines.
pub type RleResult<T> = Result<T, RleError>;

lazy_static::lazy_static! {
    /// Regex matching an optional positive integer followed by a single RLE
    /// item, anchored at the start of the string.
    static ref RLE_RUN_REGEX: regex::Regex =
        regex::Regex::new(r"^(\d*)([bo$!])").unwrap();
}

/// Error encountered during RLE import/export.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum RleError {
    #[error("missing RLE header")]
    MissingHeader,
    #[error("invalid size in RLE header: {0:?}")]
    InvalidSize(String),
    #[error("invalid run count: {0:?}")]
    InvalidCount(String),
    #[error("expected RLE item")]
    ExpectedItem,
    #[error("unknown RLE symbol: '{0}'")]
    UnknownSymbol(char),
    #[error("live cell at ({x}, {y}) is outside the {width}x{height} pattern declared in the header")]
    CellOutsidePattern {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
impl RleError {
    /// Returns whether the error came from the header line rather than the
    /// body.
    pub fn is_header_error(&self) -> bool {
        matches!(self, Self::MissingHeader | Self::InvalidSize(_))
    }
}

#[cfg(test)]
mod tests;
