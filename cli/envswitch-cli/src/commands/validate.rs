// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `envswitch validate`

use anyhow::{Result, bail};
use envswitch::{EnvironmentName, SwitchController};

use crate::output::print_json;

/// Gate a profile on request. Unlike `switch`, this applies to every
/// environment and never touches the active configuration.
pub fn run(controller: &SwitchController, environment: &str, use_json: bool) -> Result<()> {
    let environment = EnvironmentName::parse(environment)?;
    let violations = controller.preflight(environment)?;
    let profile = controller.profiles().path(environment)?;

    if use_json {
        print_json(&violations)?;
    } else if violations.is_empty() {
        println!("{}: no placeholder values found", profile.display());
    }

    if !violations.is_empty() {
        if !use_json {
            super::print_violations(
                &format!("Unsafe placeholder values in {}:", profile.display()),
                &violations,
            );
        }
        bail!(
            "Profile '{}' contains {} unsafe placeholder value(s)",
            environment,
            violations.len()
        );
    }
    Ok(())
}
