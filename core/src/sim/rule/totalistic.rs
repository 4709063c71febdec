use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use super::{RuleError, RuleResult};

lazy_static! {
    /// Regex matching a rule in "B/S" notation, such as `B3/S23`.
    static ref BS_RULE_REGEX: Regex = Regex::new(r"^[Bb](\d*)/?[Ss](\d*)$").unwrap();
}

/// A 2-state totalistic 2D range-1 Moore-neighborhood rule, described by the
/// neighbor counts that cause birth and the neighbor counts that allow
/// survival.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: [bool; 9],
    survival: [bool; 9],
}
impl Default for Rule {
    fn default() -> Self {
        LIFE
    }
}
impl Rule {
    /// Constructs a rule from lists of neighbor counts.
    ///
    /// # Panics
    ///
    /// This function panics if any count is greater than 8.
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        let mut ret = Self {
            birth: [false; 9],
            survival: [false; 9],
        };
        for &n in birth {
            ret.birth[n as usize] = true;
        }
        for &n in survival {
            ret.survival[n as usize] = true;
        }
        ret
    }

    /// Returns whether a dead cell with `live_neighbors` live neighbors comes
    /// alive.
    #[inline]
    pub fn is_birth(&self, live_neighbors: u8) -> bool {
        self.birth[live_neighbors as usize]
    }
    /// Returns whether a live cell with `live_neighbors` live neighbors stays
    /// alive.
    #[inline]
    pub fn is_survival(&self, live_neighbors: u8) -> bool {
        self.survival[live_neighbors as usize]
    }
    /// Returns the next state of a single cell.
    #[inline]
    pub fn transition(&self, alive: bool, live_neighbors: u8) -> bool {
        if alive {
            self.is_survival(live_neighbors)
        } else {
            self.is_birth(live_neighbors)
        }
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> RuleResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("life") {
            return Ok(LIFE);
        }
        let captures = BS_RULE_REGEX
            .captures(s)
            .ok_or_else(|| RuleError::Unrecognized(s.to_owned()))?;
        let mut conditions = [[false; 9]; 2];
        for (i, condition) in conditions.iter_mut().enumerate() {
            // Group 0 is the whole match.
            for ch in captures[i + 1].chars() {
                match ch.to_digit(10) {
                    Some(n @ 0..=8) => condition[n as usize] = true,
                    _ => return Err(RuleError::CountOutOfRange(ch)),
                }
            }
        }
        Ok(Self {
            birth: conditions[0],
            survival: conditions[1],
        })
    }
}
impl TryFrom<String> for Rule {
    type Error = RuleError;

    fn try_from(s: String) -> RuleResult<Self> {
        s.parse()
    }
}
impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for i in 0..=8 {
            if self.birth[i] {
                write!(f, "{}", i)?;
            }
        }
        write!(f, "/S")?;
        for i in 0..=8 {
            if self.survival[i] {
                write!(f, "{}", i)?;
            }
        }
        Ok(())
    }
}

/// Conway's Game of Life.
pub const LIFE: Rule = Rule {
    birth: [false, false, false, true, false, false, false, false, false],
    survival: [false, false, true, true, false, false, false, false, false],
};
