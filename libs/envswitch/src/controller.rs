// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Environment switch controller
//!
//! A switch runs strictly in order:
//!
//! 1. resolve the profile file (no side effects on failure)
//! 2. snapshot the current active configuration, if any
//! 3. atomically replace the active configuration with the profile
//! 4. run the safety gate, for production only
//! 5. report
//!
//! Steps 2 and 3 run under an exclusive advisory lock. A gate failure in
//! step 4 does not undo step 3: the unsafe configuration stays active and
//! the operator is expected to fix it in place.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backup::{self, BackupArchive};
use crate::environment::{EnvironmentName, UNKNOWN_ENVIRONMENT};
use crate::envfile::{self, EnvFile};
use crate::error::SwitchError;
use crate::gate::{SafetyGate, SafetyViolation};
use crate::layout::DeploymentLayout;
use crate::profile::ProfileStore;
use crate::slot::{ActiveSlot, SwitchLock};

/// Key holding the environment name inside a configuration
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// Result of the safety gate step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Environment is not gated
    Skipped,
    Passed,
    Failed,
}

/// Summary of a completed switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchReport {
    /// Environment that was active before, `None` on first activation
    pub previous_environment: Option<String>,
    pub environment: EnvironmentName,
    pub profile_file: PathBuf,
    pub active_file: PathBuf,
    /// Snapshot of the previous configuration, if there was one
    pub backup: Option<PathBuf>,
    pub gate: GateOutcome,
    pub violations: Vec<SafetyViolation>,
}

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Selects, backs up, activates and gates configuration profiles
pub struct SwitchController {
    layout: DeploymentLayout,
    profiles: ProfileStore,
    gate: SafetyGate,
    slot: ActiveSlot,
    archive: BackupArchive,
    clock: Clock,
}

impl std::fmt::Debug for SwitchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchController")
            .field("layout", &self.layout)
            .field("profiles", &self.profiles)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl SwitchController {
    pub fn new(layout: DeploymentLayout, profiles: ProfileStore, gate: SafetyGate) -> Self {
        Self {
            slot: ActiveSlot::new(layout.active_path()),
            archive: BackupArchive::for_layout(&layout),
            layout,
            profiles,
            gate,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replace the wall clock used to name backups
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn layout(&self) -> &DeploymentLayout {
        &self.layout
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn archive(&self) -> &BackupArchive {
        &self.archive
    }

    /// Switch by operator-supplied name
    pub fn switch_named(&self, name: &str) -> Result<SwitchReport, SwitchError> {
        let environment = EnvironmentName::parse(name)?;
        self.switch(environment)
    }

    /// Activate the profile for `environment`
    pub fn switch(&self, environment: EnvironmentName) -> Result<SwitchReport, SwitchError> {
        // Resolve
        let profile_path = self.profiles.path(environment)?.to_path_buf();
        let profile = self.read_profile(environment, &profile_path)?;
        debug!(%environment, profile = %profile_path.display(), "Resolved profile");

        let (previous_environment, backup) = {
            let _lock = SwitchLock::acquire(self.layout.lock_path())?;

            // Snapshot
            let (previous_environment, backup) = match self.read_active_for_backup()? {
                Some(current) => {
                    let prior = prior_environment(&current);
                    let path = self.archive.snapshot_with_permissions(
                        &current,
                        &prior,
                        (self.clock)(),
                        self.slot.permissions(),
                    )?;
                    (Some(prior), Some(path))
                }
                None => (None, None),
            };

            // Activate
            self.slot.replace(&profile)?;
            (previous_environment, backup)
        };

        info!(
            %environment,
            previous = previous_environment.as_deref().unwrap_or("-"),
            active = %self.slot.path().display(),
            "Activated environment"
        );

        // Gate
        let (gate, violations) = if environment.requires_gate() {
            let violations = self.gate.validate(&String::from_utf8_lossy(&profile));
            if violations.is_empty() {
                (GateOutcome::Passed, violations)
            } else {
                warn!(
                    %environment,
                    count = violations.len(),
                    "Safety gate rejected the active configuration"
                );
                (GateOutcome::Failed, violations)
            }
        } else {
            (GateOutcome::Skipped, Vec::new())
        };

        let report = SwitchReport {
            previous_environment,
            environment,
            profile_file: profile_path,
            active_file: self.slot.path().to_path_buf(),
            backup,
            gate,
            violations,
        };

        if report.gate == GateOutcome::Failed {
            return Err(SwitchError::SafetyViolationDetected {
                report: Box::new(report),
            });
        }
        Ok(report)
    }

    /// Run the safety gate against a profile without activating it
    pub fn preflight(
        &self,
        environment: EnvironmentName,
    ) -> Result<Vec<SafetyViolation>, SwitchError> {
        let path = self.profiles.path(environment)?.to_path_buf();
        let profile = self.read_profile(environment, &path)?;
        Ok(self.gate.validate(&String::from_utf8_lossy(&profile)))
    }

    /// Environment recorded in the active configuration, if any
    pub fn active_environment(&self) -> Option<String> {
        let current = self.slot.read().ok().flatten()?;
        envfile::optional_field(&String::from_utf8_lossy(&current), ENVIRONMENT_KEY)
    }

    fn read_profile(
        &self,
        environment: EnvironmentName,
        path: &std::path::Path,
    ) -> Result<Vec<u8>, SwitchError> {
        if !path.is_file() {
            return Err(SwitchError::ProfileFileMissing {
                environment,
                path: path.to_path_buf(),
            });
        }
        fs::read(path).map_err(|source| SwitchError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    // A failure to read what we are about to back up is a backup failure.
    fn read_active_for_backup(&self) -> Result<Option<Vec<u8>>, SwitchError> {
        self.slot.read().map_err(|e| match e {
            SwitchError::Io { path, source } => SwitchError::BackupFailed { path, source },
            other => other,
        })
    }
}

/// `ENVIRONMENT` of the configuration being replaced, or `unknown`
fn prior_environment(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    match EnvFile::parse(&text) {
        Ok(env) => match env.display_value(ENVIRONMENT_KEY) {
            Some(value) if backup::is_file_safe(value.trim()) => value.trim().to_string(),
            Some(value) if !value.trim().is_empty() => {
                warn!(value, "Active {ENVIRONMENT_KEY} is not a usable name; backing up as '{UNKNOWN_ENVIRONMENT}'");
                UNKNOWN_ENVIRONMENT.to_string()
            }
            _ => {
                warn!("Active configuration has no {ENVIRONMENT_KEY}; backing up as '{UNKNOWN_ENVIRONMENT}'");
                UNKNOWN_ENVIRONMENT.to_string()
            }
        },
        Err(e) => {
            warn!(error = %e, "Active configuration is malformed; backing up as '{UNKNOWN_ENVIRONMENT}'");
            UNKNOWN_ENVIRONMENT.to_string()
        }
    }
}
