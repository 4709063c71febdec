//! Everything related to the description of a cellular automaton rule,
//! primarily the transition function.

mod totalistic;

pub use totalistic::*;

/// Result type returned by fallible rule routines.
pub type RuleResult<T> = Result<T, RuleError>;

/// Error encountered while parsing a rule string.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum RuleError {
    #[error("unrecognized rule {0:?}; expected something like \"B3/S23\"")]
    Unrecognized(String),
    #[error("neighbor count {0} is out of range 0..=8")]
    CountOutOfRange(char),
}
