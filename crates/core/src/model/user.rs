use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local identity label that selects a roadmap.
///
/// Trimmed and non-empty; there is no credential behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserIdentity(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserIdentityError {
    #[error("user identity cannot be empty")]
    Empty,
}

impl UserIdentity {
    /// Create a validated identity.
    ///
    /// # Errors
    ///
    /// Returns `UserIdentityError::Empty` if the value is blank after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, UserIdentityError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdentityError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserIdentity {
    type Error = UserIdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserIdentity> for String {
    fn from(value: UserIdentity) -> Self {
        value.0
    }
}
