// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for envswitch CLI integration tests

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const LOCAL: &str = "ENVIRONMENT=local\nPROJECT_NAME=\"Ski Coach\"\nPOSTGRES_DB=app_dev\n";
pub const STAGING: &str = "ENVIRONMENT=staging\nPOSTGRES_DB=app_staging\nGUNICORN_WORKERS=4\n";
pub const PRODUCTION: &str = "ENVIRONMENT=production\nSECRET_KEY=changethis\n";

/// Get a Command for the envswitch binary with a clean environment,
/// running inside `dir`
pub fn envswitch_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envswitch").expect("Failed to find envswitch binary");
    cmd.current_dir(dir)
        .env_remove("ENVSWITCH_DIR")
        .env_remove("ENVSWITCH_DENY_PATTERN")
        .env_remove("RUST_LOG");
    cmd
}

/// Temporary deployment directory with the three standard profiles
pub fn deployment() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join(".env.local"), LOCAL).expect("write local");
    fs::write(dir.path().join(".env.staging"), STAGING).expect("write staging");
    fs::write(dir.path().join(".env.production"), PRODUCTION).expect("write production");
    dir
}

/// Backup snapshot paths in `dir`, sorted by name
pub fn backups(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(".env.backup."))
        })
        .collect();
    found.sort();
    found
}

pub fn active(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join(".env")).ok()
}
