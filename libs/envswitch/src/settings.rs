// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-deployment settings
//!
//! Read once at start-up from `envswitch.json` in the deployment root.
//! Every field is optional; an absent file means the conventional layout:
//!
//! ```json
//! {
//!   "activeFile": ".env",
//!   "backupPrefix": ".env.backup",
//!   "profiles": { "production": "deploy/.env.prod" },
//!   "denyPatterns": ["(?i)password=admin"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::SwitchController;
use crate::environment::EnvironmentName;
use crate::error::SettingsError;
use crate::gate::SafetyGate;
use crate::layout::{DeploymentLayout, SETTINGS_FILE};
use crate::profile::ProfileStore;
use crate::status::StatusReporter;

/// Contents of `envswitch.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// Active configuration file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_file: Option<String>,

    /// Prefix for backup snapshot names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_prefix: Option<String>,

    /// Per-environment profile file, relative to the deployment root
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, String>,

    /// Extra regular expressions the safety gate rejects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_patterns: Vec<String>,
}

impl Settings {
    /// Load settings from `root`, falling back to defaults when absent
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Resolve file names against `root`
    pub fn layout(&self, root: impl Into<PathBuf>) -> DeploymentLayout {
        let mut layout = DeploymentLayout::new(root);
        if let Some(active) = &self.active_file {
            layout = layout.with_active_file(active);
        }
        if let Some(prefix) = &self.backup_prefix {
            layout = layout.with_backup_prefix(prefix);
        }
        layout
    }

    /// The conventional profile store with any overrides applied
    pub fn profile_store(&self, layout: &DeploymentLayout) -> Result<ProfileStore, SettingsError> {
        let mut entries: BTreeMap<EnvironmentName, PathBuf> = ProfileStore::conventional(layout)
            .iter()
            .map(|(env, p)| (env, p.to_path_buf()))
            .collect();

        for (name, file) in &self.profiles {
            let env: EnvironmentName = name
                .parse()
                .map_err(|_| SettingsError::UnknownEnvironment(name.clone()))?;
            entries.insert(env, layout.root().join(file));
        }

        Ok(ProfileStore::new(entries))
    }

    /// Default gate plus `deny_patterns` and any `extra` patterns
    pub fn gate<S: AsRef<str>>(&self, extra: &[S]) -> Result<SafetyGate, SettingsError> {
        SafetyGate::default()
            .with_patterns(&self.deny_patterns)?
            .with_patterns(extra)
    }

    /// Build a controller for `root` from these settings
    pub fn controller<S: AsRef<str>>(
        &self,
        root: impl Into<PathBuf>,
        extra_patterns: &[S],
    ) -> Result<SwitchController, SettingsError> {
        let layout = self.layout(root);
        let profiles = self.profile_store(&layout)?;
        let gate = self.gate(extra_patterns)?;
        Ok(SwitchController::new(layout, profiles, gate))
    }

    pub fn status_reporter(&self, root: impl Into<PathBuf>) -> StatusReporter {
        StatusReporter::for_layout(&self.layout(root))
    }
}
