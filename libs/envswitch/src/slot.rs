// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The active configuration slot
//!
//! There is exactly one active file per deployment directory. It is only
//! ever replaced whole, through a temp file in the same directory followed
//! by a rename, so readers see either the old or the new content.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::SwitchError;

/// Handle to the active configuration file
#[derive(Debug, Clone)]
pub struct ActiveSlot {
    path: PathBuf,
}

impl ActiveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Current content, or `None` before the first activation
    pub fn read(&self) -> Result<Option<Vec<u8>>, SwitchError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SwitchError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Permissions of the active file, if it exists
    pub fn permissions(&self) -> Option<fs::Permissions> {
        fs::metadata(&self.path).ok().map(|meta| meta.permissions())
    }

    /// Replace the content atomically
    pub fn replace(&self, content: &[u8]) -> Result<(), SwitchError> {
        let activation_err = |source| SwitchError::ActivationFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(activation_err)?;
        temp.as_file_mut()
            .write_all(content)
            .map_err(activation_err)?;
        temp.as_file().sync_all().map_err(activation_err)?;

        // Keep the permissions of the file being replaced, since the
        // temp file is created 0600.
        if let Some(perms) = self.permissions() {
            temp.as_file()
                .set_permissions(perms)
                .map_err(activation_err)?;
        }

        temp.persist(&self.path)
            .map_err(|e| activation_err(e.error))?;

        debug!(path = %self.path.display(), bytes = content.len(), "Replaced active configuration");
        Ok(())
    }
}

/// Exclusive advisory lock held for the duration of a switch
#[derive(Debug)]
pub struct SwitchLock {
    file: File,
    path: PathBuf,
}

impl SwitchLock {
    /// Take the lock without blocking
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, SwitchError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| SwitchError::Io {
                path: path.clone(),
                source,
            })?;

        file.try_lock_exclusive()
            .map_err(|source| SwitchError::SwitchInProgress {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "Acquired switch lock");
        Ok(Self { file, path })
    }
}

impl Drop for SwitchLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(path = %self.path.display(), error = %e, "Failed to release switch lock");
        }
    }
}
