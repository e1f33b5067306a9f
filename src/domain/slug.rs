//! Normalized, human-readable event identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DevEventError;

/// Slug of an event: trimmed, lowercase and non-empty.
///
/// Every lookup goes through [`Slug::parse`], so `" My-Event "` and
/// `"my-event"` resolve to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalizes `raw` into a slug.
    ///
    /// # Errors
    ///
    /// Returns [`DevEventError::Validation`] if the input is blank or
    /// contains inner whitespace.
    pub fn parse(raw: &str) -> Result<Self, DevEventError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DevEventError::Validation("slug is required".to_string()));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(DevEventError::Validation(format!(
                "slug must not contain whitespace: {normalized:?}"
            )));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
