// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `envswitch switch`

use anyhow::Result;
use envswitch::{GateOutcome, SwitchController, SwitchReport};

use crate::output::{or_dash, print_json};

pub fn run(controller: &SwitchController, environment: &str, use_json: bool) -> Result<()> {
    match controller.switch_named(environment) {
        Ok(report) => {
            if use_json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            // A gate failure already activated the profile; show what happened
            // before surfacing the error.
            if let Some(report) = e.report() {
                if use_json {
                    print_json(report)?;
                } else {
                    print_report(report);
                }
                super::print_violations(
                    &format!(
                        "Unsafe placeholder values in {}:",
                        report.active_file.display()
                    ),
                    &report.violations,
                );
                eprintln!("The configuration is active. Edit it in place before starting services.");
            }
            Err(e.into())
        }
    }
}

fn print_report(report: &SwitchReport) {
    println!("Switched to {}", report.environment);
    println!(
        "  Previous: {}",
        or_dash(report.previous_environment.as_deref())
    );
    println!("  Profile:  {}", report.profile_file.display());
    println!("  Active:   {}", report.active_file.display());
    match &report.backup {
        Some(path) => println!("  Backup:   {}", path.display()),
        None => println!("  Backup:   - (no previous configuration)"),
    }
    let gate = match report.gate {
        GateOutcome::Skipped => "skipped",
        GateOutcome::Passed => "passed",
        GateOutcome::Failed => "FAILED",
    };
    println!("  Gate:     {gate}");
}
