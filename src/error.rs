//! Error taxonomy shared by the registry, dispatcher, legacy bridge and help
//! face.
//!
//! Registry and arity errors are fatal to a single invocation; callers at the
//! CLI boundary print them and exit non-zero. Listing generation never
//! propagates `LegacyHelpUnavailable` for an individual entry.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FaceError>;

#[derive(Debug, Error)]
pub enum FaceError {
    #[error("Could not find face '{name}'")]
    FaceNotFound { name: String },

    #[error("Could not find version {version} of face '{name}'")]
    FaceVersionNotFound { name: String, version: String },

    #[error("Face '{name}' version {version} is already registered with a different definition")]
    DuplicateRegistration { name: String, version: String },

    /// Invocation-arity class: too many positional arguments, or an action
    /// requested on something that has none.
    #[error("{0}")]
    Argument(String),

    #[error("Face '{face}' has no default action; name one of its actions")]
    NoDefaultAction { face: String },

    #[error("Face '{face}' has no action '{action}'")]
    ActionNotFound { face: String, action: String },

    #[error("Action '{action}' does not accept option --{option}")]
    UnknownOption { action: String, option: String },

    #[error("Help for legacy subcommand '{name}' is unavailable: {reason}")]
    LegacyHelpUnavailable { name: String, reason: String },

    #[error("Failed to execute legacy subcommand '{name}'")]
    LegacyExec {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{raw}' is not a valid name; expected ^[a-z][a-z0-9_]*$")]
    InvalidName { raw: String },

    #[error("'{raw}' is not a valid version; expected dotted integers or 'current'")]
    InvalidVersion { raw: String },

    #[error("Face '{face}' declares action '{action}' more than once")]
    DuplicateAction { face: String, action: String },

    #[error("Face '{face}' declares more than one default action ({first}, {second})")]
    MultipleDefaultActions {
        face: String,
        first: String,
        second: String,
    },

    #[error("Failed to render help as JSON")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Action(#[from] anyhow::Error),
}

impl FaceError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        FaceError::Argument(message.into())
    }

    /// True for the arity class, which the CLI reports as a usage error.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, FaceError::Argument(_))
    }

    /// True when a face name or version could not be resolved.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            FaceError::FaceNotFound { .. } | FaceError::FaceVersionNotFound { .. }
        )
    }
}
