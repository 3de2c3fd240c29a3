// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! File locations inside a deployment directory
//!
//! Every component gets its paths from a [`DeploymentLayout`] instead of a
//! hard-coded location, so tests can run against a temporary directory.

use std::path::{Path, PathBuf};

use crate::environment::EnvironmentName;

/// Default name of the active configuration file
pub const DEFAULT_ACTIVE_FILE: &str = ".env";

/// Default prefix for backup snapshots
pub const DEFAULT_BACKUP_PREFIX: &str = ".env.backup";

/// Lock file guarding the switch critical section
pub const LOCK_FILE: &str = ".env.lock";

/// Optional settings file read from the deployment root
pub const SETTINGS_FILE: &str = "envswitch.json";

/// Paths used by one deployment directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLayout {
    root: PathBuf,
    active_file: String,
    backup_prefix: String,
}

impl DeploymentLayout {
    /// Layout with the default file names under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active_file: DEFAULT_ACTIVE_FILE.to_string(),
            backup_prefix: DEFAULT_BACKUP_PREFIX.to_string(),
        }
    }

    pub fn with_active_file(mut self, name: impl Into<String>) -> Self {
        self.active_file = name.into();
        self
    }

    pub fn with_backup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.backup_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file the orchestrator reads at start-up
    pub fn active_path(&self) -> PathBuf {
        self.root.join(&self.active_file)
    }

    pub fn backup_prefix(&self) -> &str {
        &self.backup_prefix
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Conventional profile file name for an environment (`.env.<name>`)
    pub fn default_profile_file(environment: EnvironmentName) -> String {
        format!("{DEFAULT_ACTIVE_FILE}.{environment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let layout = DeploymentLayout::new("/srv/app");
        assert_eq!(layout.active_path(), PathBuf::from("/srv/app/.env"));
        assert_eq!(layout.lock_path(), PathBuf::from("/srv/app/.env.lock"));
        assert_eq!(layout.backup_prefix(), ".env.backup");
        assert_eq!(
            DeploymentLayout::default_profile_file(EnvironmentName::Production),
            ".env.production"
        );
    }

    #[test]
    fn test_overrides() {
        let layout = DeploymentLayout::new("/srv/app")
            .with_active_file("app.env")
            .with_backup_prefix("app.env.bak");
        assert_eq!(layout.active_path(), PathBuf::from("/srv/app/app.env"));
        assert_eq!(layout.backup_prefix(), "app.env.bak");
    }
}
