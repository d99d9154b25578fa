//! Bridge to legacy subcommands: standalone `<prefix>-<name>` executables
//! found on the command search path.
//!
//! Nothing here is cached. Every call re-reads the search path so callers
//! see the filesystem as it is at call time. Documentation is read from the
//! first `#` comment block of the script (after an optional shebang).

use crate::error::{FaceError, Result};
use crate::name::Name;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Scaffolding names that are discoverable but never real subcommands.
pub const EXCLUDED_SUBCOMMANDS: &[&str] = &["face_base", "indirection_base"];

const SYNOPSIS_HEADING: &str = "SYNOPSIS";

#[derive(Clone, Debug)]
pub struct LegacyBridge {
    prefix: String,
    search_path: Vec<PathBuf>,
}

/// A legacy subcommand resolved to the executable that implements it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegacyCommand {
    pub name: String,
    pub path: PathBuf,
}

impl LegacyBridge {
    pub fn new(prefix: impl Into<String>, search_path: Vec<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            search_path,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `<prefix>-<name>`, the executable and manpage name of a subcommand.
    pub fn command_name(&self, name: &str) -> String {
        format!("{}-{name}", self.prefix)
    }

    /// Lazily scan the search path for legacy subcommand names.
    ///
    /// Names come out in discovery order, each once, with the excluded
    /// scaffolding names removed. Calling again starts a fresh scan.
    pub fn available_subcommands(&self) -> LegacyScan<'_> {
        LegacyScan {
            marker: format!("{}-", self.prefix),
            dirs: self.search_path.iter(),
            entries: None,
            seen: BTreeSet::new(),
        }
    }

    pub fn is_excluded(name: &str) -> bool {
        EXCLUDED_SUBCOMMANDS.contains(&name)
    }

    /// First executable on the search path implementing `name`.
    ///
    /// `name` is normalized like a face name (`:agent` and `AGENT` find
    /// `faceplate-agent`); only canonically named files are ever matched.
    pub fn locate(&self, name: &str) -> Option<LegacyCommand> {
        let name = Name::parse(name).ok()?.to_string();
        if Self::is_excluded(&name) {
            return None;
        }
        let file_name = self.command_name(&name);
        self.search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| is_executable(candidate))
            .map(|path| LegacyCommand { name, path })
    }

    pub fn documentation(&self, name: &str) -> Result<LegacyDoc> {
        let command = self
            .locate(name)
            .ok_or_else(|| FaceError::LegacyHelpUnavailable {
                name: name.to_string(),
                reason: format!("no {} executable on the search path", self.command_name(name)),
            })?;
        let raw = fs::read(&command.path).map_err(|err| FaceError::LegacyHelpUnavailable {
            name: command.name.clone(),
            reason: format!("reading {}: {err}", command.path.display()),
        })?;
        let text = String::from_utf8_lossy(&raw);
        Ok(LegacyDoc::from_script(&self.prefix, &command, &text))
    }

    /// One-line summary, or `None` when none can be extracted.
    pub fn summary_for(&self, name: &str) -> Option<String> {
        match self.documentation(name) {
            Ok(doc) => doc.summary,
            Err(err) => {
                debug!(subcommand = name, error = %err, "no legacy summary");
                None
            }
        }
    }

    pub fn full_help_for(&self, name: &str) -> Result<String> {
        self.documentation(name).map(|doc| doc.help)
    }

    /// Spawn the legacy executable and wait for it.
    pub fn run<I, S>(&self, name: &str, args: I) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let command = self.locate(name).ok_or_else(|| FaceError::FaceNotFound {
            name: name.to_string(),
        })?;
        debug!(subcommand = %command.name, path = %command.path.display(), "running legacy subcommand");
        Command::new(&command.path)
            .args(args)
            .status()
            .map_err(|source| FaceError::LegacyExec {
                name: command.name.clone(),
                source,
            })
    }
}

/// Iterator returned by [`LegacyBridge::available_subcommands`].
pub struct LegacyScan<'a> {
    marker: String,
    dirs: std::slice::Iter<'a, PathBuf>,
    entries: Option<fs::ReadDir>,
    seen: BTreeSet<String>,
}

impl LegacyScan<'_> {
    fn candidate(&self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        let rest = file_name.strip_prefix(&self.marker)?;
        let name = canonical_subcommand(rest)?;
        if LegacyBridge::is_excluded(&name) || !is_executable(path) {
            return None;
        }
        Some(name)
    }
}

impl Iterator for LegacyScan<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(entries) = self.entries.as_mut() {
                let next_entry = entries.next();
                match next_entry {
                    Some(Ok(entry)) => {
                        let path = entry.path();
                        if let Some(name) = self.candidate(&path) {
                            if self.seen.insert(name.clone()) {
                                return Some(name);
                            }
                        }
                        continue;
                    }
                    Some(Err(err)) => {
                        debug!(error = %err, "skipping unreadable directory entry");
                        continue;
                    }
                    None => self.entries = None,
                }
            }

            let dir = self.dirs.next()?;
            match fs::read_dir(dir) {
                Ok(entries) => self.entries = Some(entries),
                Err(err) => {
                    debug!(dir = %dir.display(), error = %err, "skipping search path entry");
                }
            }
        }
    }
}

/// Documentation extracted from a legacy script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegacyDoc {
    pub name: String,
    pub summary: Option<String>,
    pub help: String,
}

impl LegacyDoc {
    pub fn from_script(prefix: &str, command: &LegacyCommand, script: &str) -> Self {
        let block = doc_block(script);
        let command_name = format!("{prefix}-{}", command.name);
        let help = if block.trim().is_empty() {
            format!(
                "{command_name}\n\nNo documentation is embedded in {}.\n",
                command.path.display()
            )
        } else if block.contains(&command_name) {
            format!("{block}\n")
        } else {
            format!("{command_name}\n\n{block}\n")
        };
        let summary = extract_summary(&command_name, &block);
        Self {
            name: command.name.clone(),
            summary,
            help,
        }
    }
}

// Scanned file names are only recognized in their canonical spelling so that
// `faceplate-Agent` and `faceplate-agent` never both show up.
fn canonical_subcommand(raw: &str) -> Option<String> {
    let name = Name::parse(raw).ok()?;
    (name.as_str() == raw).then(|| name.to_string())
}

fn doc_block(script: &str) -> String {
    let mut lines = script.lines().peekable();
    if lines.peek().is_some_and(|line| line.starts_with("#!")) {
        lines.next();
    }
    while lines.peek().is_some_and(|line| line.trim().is_empty()) {
        lines.next();
    }

    let mut block: Vec<&str> = Vec::new();
    for line in lines {
        let Some(comment) = line.strip_prefix('#') else {
            break;
        };
        block.push(comment.strip_prefix(' ').unwrap_or(comment).trim_end());
    }

    while block.last().is_some_and(|line| line.is_empty()) {
        block.pop();
    }
    let start = block.iter().take_while(|line| line.is_empty()).count();
    block[start..].join("\n")
}

// Prefer the manpage name line (`faceplate-agent(8) -- The agent`); fall back
// to the first prose line under SYNOPSIS.
fn extract_summary(command_name: &str, block: &str) -> Option<String> {
    let pattern = format!(r"(?m)^{}\([^)]*\) -- (.+)$", regex::escape(command_name));
    if let Ok(name_line) = Regex::new(&pattern) {
        if let Some(summary) = name_line
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|summary| !summary.is_empty())
        {
            return Some(summary);
        }
    }

    let mut lines = block.lines().skip_while(|line| line.trim() != SYNOPSIS_HEADING);
    lines.next()?;
    lines
        .map(str::trim)
        .find(|line| !line.is_empty() && !is_underline(line))
        .map(str::to_string)
}

fn is_underline(line: &str) -> bool {
    line.chars().all(|c| c == '=' || c == '-')
}

fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            return metadata.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}
