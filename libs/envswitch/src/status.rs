// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Read-only view of the active configuration

use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use crate::envfile::EnvFile;
use crate::layout::DeploymentLayout;
use crate::slot::ActiveSlot;

/// Keys surfaced by `status`
pub const STATUS_KEYS: [&str; 5] = [
    "ENVIRONMENT",
    "PROJECT_NAME",
    "POSTGRES_DB",
    "GUNICORN_WORKERS",
    "DB_POOL_SIZE",
];

/// Fields extracted from the active configuration.
///
/// Missing keys are `None`; a malformed or unreadable file leaves every
/// field `None` and sets `problem`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub active_file: PathBuf,
    pub environment: Option<String>,
    pub project_name: Option<String>,
    pub postgres_db: Option<String>,
    pub gunicorn_workers: Option<String>,
    pub db_pool_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl StatusSummary {
    /// `(key, value)` pairs in display order
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (STATUS_KEYS[0], self.environment.as_deref()),
            (STATUS_KEYS[1], self.project_name.as_deref()),
            (STATUS_KEYS[2], self.postgres_db.as_deref()),
            (STATUS_KEYS[3], self.gunicorn_workers.as_deref()),
            (STATUS_KEYS[4], self.db_pool_size.as_deref()),
        ]
    }
}

/// Outcome of describing a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Status {
    /// No active configuration yet; expected before the first switch
    #[serde(rename_all = "camelCase")]
    NotConfigured { active_file: PathBuf },
    Configured(StatusSummary),
}

/// Reads key fields from the active configuration
#[derive(Debug, Clone)]
pub struct StatusReporter {
    slot: ActiveSlot,
}

impl StatusReporter {
    pub fn new(slot: ActiveSlot) -> Self {
        Self { slot }
    }

    pub fn for_layout(layout: &DeploymentLayout) -> Self {
        Self::new(ActiveSlot::new(layout.active_path()))
    }

    /// Describe the active configuration. Never fails.
    pub fn describe(&self) -> Status {
        let active_file = self.slot.path().to_path_buf();

        let content = match self.slot.read() {
            Ok(Some(content)) => content,
            Ok(None) => return Status::NotConfigured { active_file },
            Err(e) => {
                warn!(error = %e, "Failed to read active configuration");
                return Status::Configured(StatusSummary {
                    active_file,
                    problem: Some(e.to_string()),
                    ..Default::default()
                });
            }
        };

        let env = match EnvFile::parse(&String::from_utf8_lossy(&content)) {
            Ok(env) => env,
            Err(e) => {
                warn!(error = %e, "Active configuration is malformed");
                return Status::Configured(StatusSummary {
                    active_file,
                    problem: Some(e.to_string()),
                    ..Default::default()
                });
            }
        };

        let field = |key: &str| env.display_value(key).map(str::to_string);
        Status::Configured(StatusSummary {
            active_file,
            environment: field(STATUS_KEYS[0]),
            project_name: field(STATUS_KEYS[1]),
            postgres_db: field(STATUS_KEYS[2]),
            gunicorn_workers: field(STATUS_KEYS[3]),
            db_pool_size: field(STATUS_KEYS[4]),
            problem: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_not_configured() {
        let dir = tempdir().unwrap();
        let reporter = StatusReporter::for_layout(&DeploymentLayout::new(dir.path()));
        assert_eq!(
            reporter.describe(),
            Status::NotConfigured {
                active_file: dir.path().join(".env")
            }
        );
    }

    #[test]
    fn test_extracts_known_keys_and_strips_quotes() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "ENVIRONMENT=staging\nPROJECT_NAME=\"Ski Coach\"\nPOSTGRES_DB=app\nSECRET_KEY=x\n",
        )
        .unwrap();

        let Status::Configured(summary) =
            StatusReporter::for_layout(&DeploymentLayout::new(dir.path())).describe()
        else {
            panic!("expected configured status");
        };

        assert_eq!(summary.environment.as_deref(), Some("staging"));
        assert_eq!(summary.project_name.as_deref(), Some("Ski Coach"));
        assert_eq!(summary.postgres_db.as_deref(), Some("app"));
        assert_eq!(summary.gunicorn_workers, None);
        assert_eq!(summary.db_pool_size, None);
        assert_eq!(summary.problem, None);
    }

    #[test]
    fn test_malformed_config_reports_problem() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "ENVIRONMENT=a\nENVIRONMENT=b\n").unwrap();

        let Status::Configured(summary) =
            StatusReporter::for_layout(&DeploymentLayout::new(dir.path())).describe()
        else {
            panic!("expected configured status");
        };

        assert_eq!(summary.environment, None);
        assert!(summary.problem.unwrap().contains("Duplicate key 'ENVIRONMENT'"));
    }

    #[test]
    fn test_status_json_shape() {
        let status = Status::NotConfigured {
            active_file: PathBuf::from(".env"),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "not_configured");
        assert_eq!(json["activeFile"], ".env");
    }
}
