// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Named deployment environments

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::error::SwitchError;

/// Value written to backup names when the prior environment can't be read
pub const UNKNOWN_ENVIRONMENT: &str = "unknown";

/// One of the deployment environments a profile can be activated for
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentName {
    /// Developer machine
    Local,
    /// Pre-production
    Staging,
    /// Live deployment; the only environment gated for placeholder secrets
    Production,
}

impl EnvironmentName {
    /// Parse an operator-supplied name, rejecting anything outside the
    /// known set before any side effect can happen.
    pub fn parse(name: &str) -> Result<Self, SwitchError> {
        name.parse().map_err(|_| SwitchError::UnknownEnvironment {
            name: name.to_string(),
        })
    }

    /// Whether activating this environment must pass the safety gate
    pub fn requires_gate(self) -> bool {
        matches!(self, Self::Production)
    }
}
