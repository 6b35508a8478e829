//! Target parsing for `--targets`.
//!
//! A target is `contig` or `contig:start-stop` with 1-based inclusive
//! coordinates. The option value is either a list of targets separated by
//! commas or whitespace, or the path of a file holding them.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("Failed to read targets file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid target '{0}': expected contig or contig:start-stop")]
    Invalid(String),

    #[error("No targets found in '{0}'")]
    Empty(String),
}

/// A contig, optionally restricted to a 1-based inclusive range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub contig: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(u64, u64)>,
}

impl Target {
    pub fn whole(contig: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            range: None,
        }
    }

    pub fn span(contig: impl Into<String>, start: u64, stop: u64) -> Self {
        Self {
            contig: contig.into(),
            range: Some((start, stop)),
        }
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TargetError::Invalid(s.to_string());

        if s.is_empty() {
            return Err(invalid());
        }

        // A suffix that is not `start-stop` belongs to the contig name
        let Some((contig, (start, stop))) = s
            .rsplit_once(':')
            .and_then(|(contig, range)| parse_range(range).map(|r| (contig, r)))
        else {
            return Ok(Self::whole(s));
        };

        if contig.is_empty() || start == 0 || stop < start {
            return Err(invalid());
        }

        Ok(Self::span(contig, start, stop))
    }
}

/// `start-stop` as two integers, or `None` if `s` does not have that shape
fn parse_range(s: &str) -> Option<(u64, u64)> {
    let (start, stop) = s.split_once('-')?;
    Some((start.trim().parse().ok()?, stop.trim().parse().ok()?))
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.range {
            Some((start, stop)) => write!(f, "{}:{start}-{stop}", self.contig),
            None => write!(f, "{}", self.contig),
        }
    }
}

/// Parse a `--targets` value, reading it as a file when it names one
///
/// # Errors
///
/// Returns `TargetError::Io` if the targets file cannot be read,
/// `TargetError::Invalid` for a malformed entry, or `TargetError::Empty`
/// if nothing was listed.
pub fn parse_targets(spec: &str) -> Result<Vec<Target>, TargetError> {
    let path = Path::new(spec);
    let text = if path.is_file() {
        std::fs::read_to_string(path)?
    } else {
        spec.to_string()
    };

    let targets = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(Target::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    if targets.is_empty() {
        return Err(TargetError::Empty(spec.to_string()));
    }
    Ok(targets)
}
