use itertools::Itertools;
use log::warn;
use std::fmt;
use std::str::FromStr;

use super::*;

/// RLE contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rle {
    /// RLE header.
    pub header: RleHeader,
    /// RLE runs.
    pub runs: Vec<RleRun>,
    /// Pattern comments, including the leading `#`.
    pub comments: String,
}
impl fmt::Display for Rle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment_line in self.comments.trim_end().lines() {
            if !comment_line.starts_with('#') {
                write!(f, "#C ")?;
            }
            writeln!(f, "{}", comment_line)?;
        }
        writeln!(f, "{}", self.header)?;

        let mut line_len = 0;
        for run in &self.runs {
            line_len += run.str_len();
            if line_len > MAX_LINE_LEN {
                writeln!(f)?;
                line_len = run.str_len();
            }
            write!(f, "{}", run)?;
        }
        writeln!(f)?;

        Ok(())
    }
}
impl FromStr for Rle {
    type Err = RleError;

    fn from_str(s: &str) -> RleResult<Self> {
        let mut header = None;
        let mut body = String::new();
        let mut comments = String::new();

        for line in s.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                comments.push_str(line);
                comments.push('\n');
            } else if line.starts_with('x') && header.is_none() {
                header = Some(line.parse()?);
            } else {
                body.extend(line.chars().filter(|ch| !ch.is_whitespace()));
            }
        }

        let header = header.ok_or(RleError::MissingHeader)?;
        let runs = parse_runs(&body)?;

        Ok(Self {
            header,
            runs,
            comments,
        })
    }
}

/// Parses runs from the start of `body` until the end of the pattern or the
/// first thing that isn't a run.
fn parse_runs(body: &str) -> RleResult<Vec<RleRun>> {
    let mut runs = vec![];
    let mut rest = body;
    while let Some(m) = RLE_RUN_REGEX.find(rest) {
        let run: RleRun = m.as_str().parse()?;
        rest = &rest[m.end()..];
        runs.push(run);
        if run.item == RleItem::End {
            return Ok(runs);
        }
    }
    if !rest.is_empty() {
        warn!(
            "Ignoring {} characters of unrecognized RLE text starting at {:?}",
            rest.len(),
            rest.chars().take(10).collect::<String>(),
        );
    }
    Ok(runs)
}

/// RLE header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleHeader {
    /// Pattern width.
    pub width: usize,
    /// Pattern height.
    pub height: usize,
    /// Automaton rule, exactly as written.
    pub rule: Option<String>,
}
impl fmt::Display for RleHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {}, y = {}", self.width, self.height)?;
        if let Some(rule) = &self.rule {
            write!(f, ", rule = {}", rule)?;
        }
        Ok(())
    }
}
impl FromStr for RleHeader {
    type Err = RleError;

    fn from_str(s: &str) -> RleResult<Self> {
        let mut width = None;
        let mut height = None;
        let mut rule = None;

        // Parse comma-separated parameters.
        for param in s.split(',') {
            // Each parameter consists of `name = value`.
            match param.split('=').map(str::trim).collect_vec().as_slice() {
                ["x", x] => width = Some(parse_rle_size(x)?),
                ["y", y] => height = Some(parse_rle_size(y)?),
                ["rule", rule_name] => rule = Some((*rule_name).to_owned()),
                _ => (), // Ignore unknown parameters.
            }
        }

        Ok(Self {
            width: width.ok_or_else(|| RleError::InvalidSize(s.to_owned()))?,
            height: height.ok_or_else(|| RleError::InvalidSize(s.to_owned()))?,
            rule,
        })
    }
}

fn parse_rle_size(s: &str) -> RleResult<usize> {
    s.parse::<usize>()
        .map_err(|_| RleError::InvalidSize(s.to_owned()))
}

#[derive(Debug, Default)]
pub struct RleRunVec(pub Vec<RleRun>);
impl RleRunVec {
    pub fn into_vec(self) -> Vec<RleRun> {
        self.0
    }
    pub fn append(&mut self, run: impl Into<RleRun>) {
        let mut run = run.into();
        while let Some(last) = self.0.last() {
            match last.try_merge(run) {
                Ok(merged) => {
                    self.0.pop();
                    run = merged;
                }
                Err(_) => break,
            }
        }
        self.0.push(run);
    }
}

/// Run of repeated items in an RLE.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RleRun {
    /// Number of times the item is repeated.
    pub count: usize,
    /// Item that is repeated.
    pub item: RleItem,
}
impl RleRun {
    /// Tries to merge two runs, returning `Ok(merged)` if successful or
    /// `Err((self, other))` if they cannot be merged.
    pub fn try_merge(mut self, other: RleRun) -> Result<RleRun, (RleRun, RleRun)> {
        match (self.item, other.item) {
            // Omit dead cells at end of row/pattern.
            (RleItem::Dead, RleItem::NextRow) => Ok(other),
            (RleItem::Dead, RleItem::End) => Ok(other),
            // Omit end of row before end of pattern.
            (RleItem::NextRow, RleItem::End) => Ok(other),
            // Merge identical items.
            (_, _) => {
                if self.item == other.item && self.item != RleItem::End {
                    self.count += other.count;
                    Ok(self)
                } else {
                    Err((self, other))
                }
            }
        }
    }
    /// Returns the number of characters in the string representation.
    pub fn str_len(self) -> usize {
        match self.count {
            0 => 0,
            1 => 1,
            n => n.to_string().len() + 1,
        }
    }
}
impl From<RleItem> for RleRun {
    fn from(item: RleItem) -> Self {
        Self { count: 1, item }
    }
}
impl FromStr for RleRun {
    type Err = RleError;

    fn from_str(s: &str) -> RleResult<Self> {
        let end_of_count = s
            .find(|ch: char| !ch.is_ascii_digit())
            .ok_or_else(|| RleError::InvalidCount(s.to_owned()))?;

        let count: usize = if end_of_count != 0 {
            match s[..end_of_count].parse() {
                Ok(0) | Err(_) => return Err(RleError::InvalidCount(s.to_owned())),
                Ok(n) => n,
            }
        } else {
            1
        };
        let item = s[end_of_count..].parse()?;

        Ok(Self { count, item })
    }
}
impl fmt::Display for RleRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{}", self.count)?;
        }
        if self.count > 0 {
            write!(f, "{}", self.item)?;
        }
        Ok(())
    }
}

/// Single "content item" that may be repeated in an RLE pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RleItem {
    /// Dead cell.
    Dead,
    /// Live cell.
    Alive,
    /// Advance to the next row.
    NextRow,
    /// End of the whole RLE.
    End,
}
impl From<bool> for RleItem {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}
impl FromStr for RleItem {
    type Err = RleError;

    fn from_str(s: &str) -> RleResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some('b'), None) => Ok(Self::Dead),
            (Some('o'), None) => Ok(Self::Alive),
            (Some('$'), None) => Ok(Self::NextRow),
            (Some('!'), None) => Ok(Self::End),
            (Some(ch), _) => Err(RleError::UnknownSymbol(ch)),
            (None, _) => Err(RleError::ExpectedItem),
        }
    }
}
impl fmt::Display for RleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => write!(f, "b"),
            Self::Alive => write!(f, "o"),
            Self::NextRow => write!(f, "$"),
            Self::End => write!(f, "!"),
        }
    }
}
