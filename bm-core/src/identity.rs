//! Hierarchical identifiers
//!
//! Every hardware node and sensor is addressed by an `Identifier`: an ordered
//! list of path segments rendered as `/seg/seg/...`. Identifiers double as the
//! key prefix for persisted settings, so they must be stable across runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardmonError, Result};

const SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    segments: Vec<String>,
}

impl Identifier {
    /// Build an identifier from raw segments. Empty segments are dropped.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .flat_map(|s| {
                s.as_ref()
                    .split(SEPARATOR)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { segments }
    }

    /// Derive a node identifier from its kind, its parent and its position.
    ///
    /// `kind` may itself contain `/` (e.g. `lpc/nct6798d`). The result is a pure
    /// function of the inputs.
    pub fn make(kind: &str, parent: Option<&Identifier>, index: Option<usize>) -> Self {
        let mut segments = parent.map(|p| p.segments.clone()).unwrap_or_default();
        segments.extend(
            kind.split(SEPARATOR)
                .filter(|part| !part.is_empty())
                .map(str::to_string),
        );
        if let Some(index) = index {
            segments.push(index.to_string());
        }
        Self { segments }
    }

    /// Append one attribute or child segment, e.g. `name`
    pub fn child(&self, segment: &str) -> Self {
        Self::make(segment, Some(self), None)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

impl FromStr for Identifier {
    type Err = BoardmonError;

    fn from_str(s: &str) -> Result<Self> {
        if !s.starts_with(SEPARATOR) {
            return Err(BoardmonError::invalid_argument(
                "identifier",
                format!("{:?} must start with '/'", s),
            ));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(BoardmonError::invalid_argument(
                "identifier",
                format!("{:?} must not contain whitespace", s),
            ));
        }
        Ok(Self::new(s.split(SEPARATOR)))
    }
}

impl TryFrom<String> for Identifier {
    type Error = BoardmonError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
