// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile store: environment name to profile file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;

use crate::environment::EnvironmentName;
use crate::error::SwitchError;
use crate::layout::DeploymentLayout;

/// Immutable mapping from environment to the file holding its profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: BTreeMap<EnvironmentName, PathBuf>,
}

impl ProfileStore {
    /// Build a store from explicit entries. Relative paths are kept as given.
    pub fn new(entries: impl IntoIterator<Item = (EnvironmentName, PathBuf)>) -> Self {
        Self {
            profiles: entries.into_iter().collect(),
        }
    }

    /// The conventional `.env.<environment>` siblings of the active file
    pub fn conventional(layout: &DeploymentLayout) -> Self {
        Self::new(EnvironmentName::iter().map(|env| {
            (
                env,
                layout
                    .root()
                    .join(DeploymentLayout::default_profile_file(env)),
            )
        }))
    }

    /// Path of the profile for `environment`
    pub fn path(&self, environment: EnvironmentName) -> Result<&Path, SwitchError> {
        self.profiles
            .get(&environment)
            .map(PathBuf::as_path)
            .ok_or_else(|| SwitchError::UnknownEnvironment {
                name: environment.to_string(),
            })
    }

    /// Look up by operator-supplied name
    pub fn resolve(&self, name: &str) -> Result<(EnvironmentName, &Path), SwitchError> {
        let environment = EnvironmentName::parse(name)?;
        Ok((environment, self.path(environment)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnvironmentName, &Path)> {
        self.profiles.iter().map(|(env, path)| (*env, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
