// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Command implementations

pub mod backups;
pub mod profiles;
pub mod status;
pub mod switch;
pub mod validate;

use envswitch::SafetyViolation;

/// Print gate violations to stderr
pub(crate) fn print_violations(heading: &str, violations: &[SafetyViolation]) {
    eprintln!("{heading}");
    for v in violations {
        eprintln!("  {v}");
    }
}
