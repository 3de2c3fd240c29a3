// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `envswitch status`

use anyhow::Result;
use envswitch::{Status, StatusReporter};

use crate::output::{or_dash, print_json};

/// Always succeeds, including before the first switch
pub fn run(reporter: &StatusReporter, use_json: bool) -> Result<()> {
    let status = reporter.describe();

    if use_json {
        return print_json(&status);
    }

    match status {
        Status::NotConfigured { active_file } => {
            println!("Not configured: {} does not exist", active_file.display());
            println!("Run 'envswitch switch <local|staging|production>' to activate a profile.");
        }
        Status::Configured(summary) => {
            println!("Active configuration: {}", summary.active_file.display());
            for (key, value) in summary.fields() {
                println!("  {:<18} {}", key, or_dash(value));
            }
            if let Some(problem) = &summary.problem {
                eprintln!("Warning: {problem}");
            }
        }
    }
    Ok(())
}
