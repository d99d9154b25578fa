//! Command-facility registry.
//!
//! Program functionality is organized into named, versioned faces, each
//! exposing named actions. Standalone `<program>-<name>` executables that
//! predate faces are bridged in as legacy subcommands, and a help face
//! renders one consistent view over both.
//!
//! Initialization order: build a [`FaceRegistry`] (or use
//! [`Dispatcher::with_builtin_faces`]), register every face, then hand the
//! [`Dispatcher`] to the front end. Lookups never mutate the registry.

pub mod action;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod face;
pub mod help;
pub mod legacy;
pub mod name;
pub mod registry;
pub mod version;

pub use action::{Action, ActionCall, ActionHandler, ActionOption, Arity, Options};
pub use cli::{ParsedArgs, parse_action_args};
pub use config::Config;
pub use dispatch::{CommandTarget, Dispatcher, Outcome};
pub use error::{FaceError, Result};
pub use face::{Face, FaceBuilder};
pub use help::render::{Listing, ListingEntry};
pub use help::{HELP_FACE, HELP_FACE_VERSION, HelpRequest, RenderFormat, help, help_face};
pub use legacy::{EXCLUDED_SUBCOMMANDS, LegacyBridge, LegacyCommand, LegacyDoc, LegacyScan};
pub use name::Name;
pub use registry::FaceRegistry;
pub use version::{Version, VersionToken};
