// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for envswitch

use std::path::PathBuf;

use thiserror::Error;

use crate::controller::SwitchReport;
use crate::environment::EnvironmentName;

/// Errors that terminate an environment switch
#[derive(Error, Debug)]
pub enum SwitchError {
    /// Name is not one of the configured environments
    #[error("Unknown environment '{name}'")]
    UnknownEnvironment { name: String },

    /// The profile for the environment has no file on disk
    #[error("Profile file for '{environment}' not found: {}", path.display())]
    ProfileFileMissing {
        environment: EnvironmentName,
        path: PathBuf,
    },

    /// The snapshot of the current configuration could not be written
    #[error("Failed to back up active configuration to {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot with the same name already exists
    #[error("Backup {} already exists; refusing to overwrite it", path.display())]
    BackupCollision { path: PathBuf },

    /// The activated configuration contains placeholder values.
    ///
    /// The new configuration is already active when this is returned.
    #[error(
        "Environment '{}' activated with {} unsafe placeholder value(s); edit {} before deploying",
        report.environment,
        report.violations.len(),
        report.active_file.display()
    )]
    SafetyViolationDetected { report: Box<SwitchReport> },

    /// Another invocation holds the switch lock
    #[error("Another switch is in progress (lock held on {})", path.display())]
    SwitchInProgress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the new active configuration failed
    #[error("Failed to activate configuration at {}: {source}", path.display())]
    ActivationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SwitchError {
    /// Whether the active configuration was modified before this error
    /// surfaced. Only a gate failure happens after activation.
    pub fn state_changed(&self) -> bool {
        matches!(self, Self::SafetyViolationDetected { .. })
    }

    /// The switch report, when the switch got far enough to produce one
    pub fn report(&self) -> Option<&SwitchReport> {
        match self {
            Self::SafetyViolationDetected { report } => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// Errors from parsing `KEY=VALUE` configuration text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvFileError {
    /// The same key is assigned more than once
    #[error("Duplicate key '{key}' on line {line} (first assigned on line {first_line})")]
    DuplicateKey {
        key: String,
        first_line: usize,
        line: usize,
    },
}

/// Errors from loading `envswitch.json`
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file exists but can't be read
    #[error("Failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file isn't valid JSON for the expected shape
    #[error("Failed to parse settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Profile override names an environment that doesn't exist
    #[error("Unknown environment '{0}' in profile overrides")]
    UnknownEnvironment(String),

    /// A deny pattern is not a valid regular expression
    #[error("Invalid deny pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
