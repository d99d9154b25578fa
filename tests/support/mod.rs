#![cfg(unix)]
#![allow(dead_code)]

use anyhow::{Context, Result};
use faceplate::{
    Action, ActionCall, ActionOption, Arity, Dispatcher, Face, LegacyBridge,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROGRAM: &str = "faceplate";

pub const AGENT_SCRIPT: &str = "#!/bin/sh
#
# faceplate-agent(8) -- The faceplate agent daemon
#
# SYNOPSIS
# ========
# Retrieves the client configuration from the server and applies it.
#
# USAGE
# =====
#   faceplate agent [--onetime] [--verbose]
#
# DESCRIPTION
# ===========
# This is the main client. It runs as a daemon unless told otherwise.
#
# OPTIONS
# =======
# --onetime: Run the configuration once and exit.
#
# COPYRIGHT
# =========
# Copyright (c) 2011 Faceplate contributors
echo agent ran \"$@\"
exit 0
";

pub const QUEUE_SCRIPT: &str = "#!/bin/sh
# SYNOPSIS
# --------
# Queues reports for later processing.
#
# USAGE
# -----
#   faceplate queue
exit 3
";

/// Temporary directory standing in for one entry of the legacy search path.
pub struct LegacyDir {
    dir: TempDir,
}

impl LegacyDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("creating legacy search dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<program>-<name>` and mark it executable.
    pub fn install(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.install_plain(name, contents)?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Write `<program>-<name>` without the executable bit.
    pub fn install_plain(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(format!("{PROGRAM}-{name}"));
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn bridge(&self) -> LegacyBridge {
        LegacyBridge::new(PROGRAM, vec![self.path().to_path_buf()])
    }
}

pub fn make_executable(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

pub fn huzzah_face(version: &str) -> Result<Face> {
    Ok(Face::builder("huzzah", version)?
        .summary("Celebrate loudly")
        .description("Cheers for whatever it is given.")
        .action(
            Action::new("bar", |call: &ActionCall<'_>| {
                Ok(format!("huzzah {} bar {}", call.face.version(), call.args.join(" ")))
            })?
            .summary("Shout bar")
            .arity(Arity::range(0, 1))
            .option(ActionOption::new("loud")?.summary("Shout louder."))
            .default_action(),
        )
        .action(
            Action::new("baz", |_call: &ActionCall<'_>| Ok("baz".to_string()))?
                .summary("Whisper baz"),
        )
        .build()?)
}

/// Built-in faces plus a small fixture set:
/// `huzzah` (two versions), an internal `plumbing` face and an undocumented
/// `secret` face.
pub fn dispatcher(legacy: LegacyBridge) -> Result<Dispatcher> {
    let mut dispatcher = Dispatcher::with_builtin_faces(legacy)?;
    let registry = dispatcher.registry_mut();
    registry.register(huzzah_face("1.0.0")?)?;
    registry.register(huzzah_face("2.0.1")?)?;
    registry.register(
        Face::builder("plumbing", "0.1.0")?
            .summary("Internal composition only")
            .internal()
            .build()?,
    )?;
    registry.register(
        Face::builder("secret", "0.1.0")?
            .summary("Hidden from the listing")
            .exclude_from_docs()
            .build()?,
    )?;
    Ok(dispatcher)
}

pub fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

pub fn faceplate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_faceplate"))
}
