//! Google ID Value Object
//!
//! Opaque subject identifier assigned by Google. Unique when set; never
//! interpreted beyond non-emptiness.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Google subject identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoogleId(String);

impl GoogleId {
    /// Create a new Google id with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let id = raw.into().trim().to_string();

        if id.is_empty() {
            return Err(AppError::validation("googleId", "Google id is required"));
        }

        Ok(Self(id))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoogleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for GoogleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
