//! Normalized identifiers for faces, actions and options.
//!
//! Names arrive from face definitions, the command line and callers that use
//! a symbol-like spelling (`:help`). All of them collapse to one canonical
//! lowercase form so lookups never depend on representation.

use crate::error::{FaceError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Normalize and validate a raw name.
    ///
    /// Leading `:` is dropped, ASCII letters are lowercased and `-` becomes
    /// `_`. The result must match `^[a-z][a-z0-9_]*$`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix(':').unwrap_or(trimmed);
        let normalized = bare.to_ascii_lowercase().replace('-', "_");

        let mut chars = normalized.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(FaceError::InvalidName {
                raw: raw.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Command-line spelling (`render_as` -> `render-as`).
    pub fn flag(&self) -> String {
        self.0.replace('_', "-")
    }
}

impl FromStr for Name {
    type Err = FaceError;

    fn from_str(raw: &str) -> Result<Self> {
        Name::parse(raw)
    }
}

impl TryFrom<&str> for Name {
    type Error = FaceError;

    fn try_from(raw: &str) -> Result<Self> {
        Name::parse(raw)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
