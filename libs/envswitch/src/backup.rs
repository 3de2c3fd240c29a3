// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Backup archive of previously active configurations
//!
//! Snapshots are named `<prefix>.<prior environment>.<YYYYMMDD_HHMMSS>`,
//! written once, and never removed here.

use std::fs::{self, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};

use crate::environment::UNKNOWN_ENVIRONMENT;
use crate::error::SwitchError;
use crate::layout::DeploymentLayout;

/// Timestamp format used in snapshot names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A snapshot found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub path: PathBuf,
    /// Environment that was active when the snapshot was taken
    pub environment: String,
    pub created_at: NaiveDateTime,
}

/// Write-once snapshots stored next to the active configuration
#[derive(Debug, Clone)]
pub struct BackupArchive {
    dir: PathBuf,
    prefix: String,
}

impl BackupArchive {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn for_layout(layout: &DeploymentLayout) -> Self {
        Self::new(layout.root(), layout.backup_prefix())
    }

    /// Snapshot `content` using the current wall-clock time
    pub fn snapshot(&self, content: &[u8], prior_environment: &str) -> Result<PathBuf, SwitchError> {
        self.snapshot_at(content, prior_environment, Local::now().naive_local())
    }

    /// Snapshot `content` with an explicit timestamp.
    ///
    /// The file is created exclusively and synced before returning; an
    /// existing file of the same name is a [`SwitchError::BackupCollision`].
    /// On unix it is owner-only.
    pub fn snapshot_at(
        &self,
        content: &[u8],
        prior_environment: &str,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf, SwitchError> {
        self.snapshot_with_permissions(content, prior_environment, timestamp, None)
    }

    /// Like [`snapshot_at`](Self::snapshot_at), but the snapshot takes
    /// `permissions` (usually those of the file being backed up) before
    /// any content is written.
    pub fn snapshot_with_permissions(
        &self,
        content: &[u8],
        prior_environment: &str,
        timestamp: NaiveDateTime,
        permissions: Option<Permissions>,
    ) -> Result<PathBuf, SwitchError> {
        let path = self.path_for(prior_environment, timestamp);

        let mut opts = OpenOptions::new();
        opts.write(true).create_new(true);
        // Snapshots hold secrets; never let the umask decide.
        #[cfg(unix)]
        opts.mode(0o600);

        let mut file = match opts.open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(SwitchError::BackupCollision { path });
            }
            Err(source) => return Err(SwitchError::BackupFailed { path, source }),
        };

        let written = match permissions {
            Some(perms) => file.set_permissions(perms),
            None => Ok(()),
        }
        .and_then(|()| file.write_all(content))
        .and_then(|()| file.sync_all());

        if let Err(source) = written {
            drop(file);
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "Failed to remove partial backup");
            }
            return Err(SwitchError::BackupFailed { path, source });
        }

        info!(path = %path.display(), environment = prior_environment, "Backed up active configuration");
        Ok(path)
    }

    /// Name a snapshot would get; unsafe environment names become `unknown`
    pub fn path_for(&self, prior_environment: &str, timestamp: NaiveDateTime) -> PathBuf {
        let environment = if is_file_safe(prior_environment) {
            prior_environment
        } else {
            UNKNOWN_ENVIRONMENT
        };
        self.dir.join(format!(
            "{}.{}.{}",
            self.prefix,
            environment,
            timestamp.format(TIMESTAMP_FORMAT)
        ))
    }

    /// Existing snapshots, oldest first
    pub fn list(&self) -> Result<Vec<BackupEntry>, SwitchError> {
        let io_err = |source| SwitchError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(parsed) = self.parse_name(name, &entry.path()) {
                entries.push(parsed);
            }
        }

        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(entries)
    }

    fn parse_name(&self, name: &str, path: &Path) -> Option<BackupEntry> {
        let rest = name.strip_prefix(&self.prefix)?.strip_prefix('.')?;
        let (environment, stamp) = rest.rsplit_once('.')?;
        if environment.is_empty() {
            return None;
        }
        let created_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(BackupEntry {
            path: path.to_path_buf(),
            environment: environment.to_string(),
            created_at,
        })
    }
}

/// Whether `name` can be embedded in a snapshot file name as is
pub(crate) fn is_file_safe(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use test_case::test_case;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_snapshot_name_and_content() {
        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        let path = archive
            .snapshot_at(b"ENVIRONMENT=local\n", "local", at(9, 5, 7))
            .unwrap();

        assert_eq!(path, dir.path().join(".env.backup.local.20260314_090507"));
        assert_eq!(fs::read(&path).unwrap(), b"ENVIRONMENT=local\n");
    }

    #[test]
    fn test_collision_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        let first = archive.snapshot_at(b"first", "staging", at(1, 2, 3)).unwrap();
        let err = archive
            .snapshot_at(b"second", "staging", at(1, 2, 3))
            .unwrap_err();

        assert!(matches!(err, SwitchError::BackupCollision { ref path } if *path == first));
        assert_eq!(fs::read(&first).unwrap(), b"first");
    }

    #[test]
    fn test_same_second_different_environment_is_fine() {
        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        archive.snapshot_at(b"a", "local", at(1, 2, 3)).unwrap();
        archive.snapshot_at(b"b", "staging", at(1, 2, 3)).unwrap();
        assert_eq!(archive.list().unwrap().len(), 2);
    }

    #[test_case("local", "local" ; "plain")]
    #[test_case("prod-eu_1", "prod-eu_1" ; "hyphen_underscore")]
    #[test_case("", "unknown" ; "empty")]
    #[test_case("../etc", "unknown" ; "parent_traversal")]
    #[test_case("a/b", "unknown" ; "slash")]
    #[test_case("..", "unknown" ; "dot_dot")]
    #[test_case("with space", "unknown" ; "space")]
    fn test_environment_name_sanitized(input: &str, expected: &str) {
        let archive = BackupArchive::new("/srv", ".env.backup");
        let path = archive.path_for(input, at(0, 0, 0));
        assert_eq!(
            path,
            PathBuf::from(format!("/srv/.env.backup.{expected}.20260314_000000"))
        );
    }

    #[test]
    fn test_list_parses_and_orders() {
        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        archive.snapshot_at(b"2", "production", at(12, 0, 0)).unwrap();
        archive.snapshot_at(b"1", "local", at(11, 0, 0)).unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();
        fs::write(dir.path().join(".env.local"), "x").unwrap();
        fs::write(dir.path().join(".env.backup.local.garbage"), "x").unwrap();

        let entries = archive.list().unwrap();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.environment.as_str(), e.created_at))
            .collect();
        assert_eq!(
            summary,
            vec![("local", at(11, 0, 0)), ("production", at(12, 0, 0))]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_snapshot_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        let path = archive
            .snapshot_at(b"SECRET_KEY=s3cr3t\n", "production", at(4, 5, 6))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_snapshot_takes_given_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path(), ".env.backup");

        let path = archive
            .snapshot_with_permissions(
                b"x",
                "staging",
                at(4, 5, 6),
                Some(fs::Permissions::from_mode(0o640)),
            )
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_missing_directory_is_backup_failure() {
        let dir = tempdir().unwrap();
        let archive = BackupArchive::new(dir.path().join("missing"), ".env.backup");

        let err = archive.snapshot_at(b"x", "local", at(0, 0, 0)).unwrap_err();
        assert!(matches!(err, SwitchError::BackupFailed { .. }));
    }
}
