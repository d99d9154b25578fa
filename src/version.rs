//! Face versions and the `current` sentinel.
//!
//! `VersionToken` is parsed once at the boundary, so `current`, `:current`
//! and `CURRENT` all become `VersionToken::Current` and downstream code never
//! compares spellings.

use crate::error::{FaceError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const CURRENT: &str = "current";

/// Dotted non-negative integers, e.g. `0.0.1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FaceError::InvalidVersion {
                raw: raw.to_string(),
            });
        }
        let parts = trimmed
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| FaceError::InvalidVersion {
                raw: raw.to_string(),
            })?;
        Ok(Self { parts })
    }

    /// True when `requested` names this version exactly or is a leading
    /// prefix of its components (`1` matches `1.2.0`, `1.2` does not match
    /// `1.20`).
    pub fn satisfies(&self, requested: &Version) -> bool {
        self.parts.starts_with(&requested.parts)
    }
}

impl FromStr for Version {
    type Err = FaceError;

    fn from_str(raw: &str) -> Result<Self> {
        Version::parse(raw)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VersionToken {
    /// The most recently registered version of a face.
    #[default]
    Current,
    Exact(Version),
}

impl VersionToken {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix(':').unwrap_or(trimmed);
        if bare.eq_ignore_ascii_case(CURRENT) {
            return Ok(VersionToken::Current);
        }
        Version::parse(bare).map(VersionToken::Exact)
    }
}

impl FromStr for VersionToken {
    type Err = FaceError;

    fn from_str(raw: &str) -> Result<Self> {
        VersionToken::parse(raw)
    }
}

impl From<Version> for VersionToken {
    fn from(version: Version) -> Self {
        VersionToken::Exact(version)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Current => f.write_str(CURRENT),
            VersionToken::Exact(version) => version.fmt(f),
        }
    }
}

/// Pick the candidate a token refers to.
///
/// `candidates` is in registration order. `Current` takes the last entry; an
/// exact token prefers an exact match and otherwise takes the most recently
/// registered candidate whose version it prefixes.
pub(crate) fn select<'a, T>(
    candidates: &'a [T],
    version_of: impl Fn(&T) -> &Version,
    token: &VersionToken,
) -> Option<&'a T> {
    match token {
        VersionToken::Current => candidates.last(),
        VersionToken::Exact(requested) => candidates
            .iter()
            .find(|candidate| version_of(candidate) == requested)
            .or_else(|| {
                candidates
                    .iter()
                    .rev()
                    .find(|candidate| version_of(candidate).satisfies(requested))
            }),
    }
}
