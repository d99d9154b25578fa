//! Environment-driven configuration for the command facility.
//!
//! The legacy search path defaults to the directory of the running
//! executable followed by `PATH`, the same order helper binaries are
//! resolved in. `FACEPLATE_PATH` replaces it wholesale.

use std::env;
use std::env::VarError;
use std::path::PathBuf;

pub const DEFAULT_PROGRAM: &str = "faceplate";
pub const ENV_PROGRAM: &str = "FACEPLATE_PROGRAM";
pub const ENV_SEARCH_PATH: &str = "FACEPLATE_PATH";
pub const ENV_LOG: &str = "FACEPLATE_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Program name; legacy subcommands are `<program>-<name>`.
    pub program: String,
    pub search_path: Vec<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let program = env_non_empty(ENV_PROGRAM).unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        let search_path = match env::var_os(ENV_SEARCH_PATH) {
            Some(paths) if !paths.is_empty() => env::split_paths(&paths).collect(),
            _ => default_search_path(),
        };
        Self {
            program,
            search_path,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = search_path;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            search_path: Vec::new(),
        }
    }
}

fn default_search_path() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(current_exe) = env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            dirs.push(dir.to_path_buf());
        }
    }
    if let Some(paths) = env::var_os("PATH") {
        for dir in env::split_paths(&paths) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
    }
    dirs
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => None,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}
