use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of weekends in every roadmap.
pub const WEEKEND_COUNT: u8 = 10;

/// Identifier of one of the fixed roadmap weekends (1..=10).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekendId(u8);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WeekendIdError {
    #[error("weekend id must be between 1 and 10, got {0}")]
    OutOfRange(i64),

    #[error("failed to parse weekend id from {0:?}")]
    Parse(String),
}

impl WeekendId {
    /// Creates a `WeekendId`.
    ///
    /// # Errors
    ///
    /// Returns `WeekendIdError::OutOfRange` unless `1 <= id <= 10`.
    pub fn new(id: u8) -> Result<Self, WeekendIdError> {
        if (1..=WEEKEND_COUNT).contains(&id) {
            Ok(Self(id))
        } else {
            Err(WeekendIdError::OutOfRange(i64::from(id)))
        }
    }

    /// The first weekend of the roadmap.
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    /// All weekend ids in roadmap order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=WEEKEND_COUNT).map(Self)
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for WeekendId {
    type Error = WeekendIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekendId> for u8 {
    fn from(id: WeekendId) -> Self {
        id.0
    }
}

impl fmt::Debug for WeekendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeekendId({})", self.0)
    }
}

impl fmt::Display for WeekendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeekendId {
    type Err = WeekendIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed
            .strip_prefix('W')
            .or_else(|| trimmed.strip_prefix('w'))
            .unwrap_or(trimmed);
        let parsed: i64 = raw
            .parse()
            .map_err(|_| WeekendIdError::Parse(s.to_string()))?;
        u8::try_from(parsed)
            .map_err(|_| WeekendIdError::OutOfRange(parsed))
            .and_then(Self::new)
    }
}

/// Opaque identifier of an assignment, unique within its weekend.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(String);

impl AssignmentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssignmentId({})", self.0)
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssignmentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
