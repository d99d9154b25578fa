//! Face registry keyed by normalized face name.
//!
//! The registry is populated during startup and read afterwards. Mutation
//! requires `&mut self`, so sharing it across threads needs an external lock
//! around registration (`RwLock<FaceRegistry>`); plain reads need nothing.

use crate::error::{FaceError, Result};
use crate::face::Face;
use crate::name::Name;
use crate::version::{self, Version, VersionToken};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct FaceRegistry {
    // Versions are kept in registration order; `current` is the last one.
    faces: BTreeMap<Name, Vec<Face>>,
}

impl FaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face version.
    ///
    /// Registering an identical definition again is a no-op; registering a
    /// different definition under an existing `(name, version)` fails.
    pub fn register(&mut self, face: Face) -> Result<()> {
        let versions = self.faces.entry(face.name().clone()).or_default();
        if let Some(existing) = versions
            .iter()
            .find(|existing| existing.version() == face.version())
        {
            if *existing == face {
                debug!(face = %face.name(), version = %face.version(), "face already registered");
                return Ok(());
            }
            return Err(FaceError::DuplicateRegistration {
                name: face.name().to_string(),
                version: face.version().to_string(),
            });
        }
        debug!(face = %face.name(), version = %face.version(), "registered face");
        versions.push(face);
        Ok(())
    }

    /// Resolve a face by name and version token.
    ///
    /// Names that fail normalization are reported as not found; callers only
    /// care that nothing answers to them.
    pub fn lookup(&self, name: &str, token: &VersionToken) -> Result<&Face> {
        let not_found = || FaceError::FaceNotFound {
            name: name.to_string(),
        };
        let key = Name::parse(name).map_err(|_| not_found())?;
        let versions = self.faces.get(&key).ok_or_else(not_found)?;
        let face = version::select(versions, Face::version, token).ok_or_else(|| {
            FaceError::FaceVersionNotFound {
                name: key.to_string(),
                version: token.to_string(),
            }
        })?;
        debug!(face = %key, requested = %token, resolved = %face.version(), "resolved face");
        Ok(face)
    }

    pub fn current(&self, name: &str) -> Option<&Face> {
        self.lookup(name, &VersionToken::Current).ok()
    }

    /// Registered face names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.faces.keys()
    }

    /// Versions of `name` in registration order.
    pub fn versions(&self, name: &str) -> Vec<&Version> {
        Name::parse(name)
            .ok()
            .and_then(|key| self.faces.get(&key))
            .map(|faces| faces.iter().map(Face::version).collect())
            .unwrap_or_default()
    }

    /// True iff the current version of `name` is runnable from the command
    /// line.
    pub fn is_face_app(&self, name: &str) -> bool {
        self.current(name).is_some_and(Face::is_cli_app)
    }

    pub fn exclude_from_docs(&self, name: &str) -> bool {
        self.current(name).is_some_and(Face::excluded_from_docs)
    }
}
