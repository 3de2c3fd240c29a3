// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `envswitch backups`

use anyhow::Result;
use envswitch::SwitchController;

use crate::output::{create_table, file_name, print_json, print_table};

/// List snapshots oldest first. Cleanup is left to the operator.
pub fn run(controller: &SwitchController, use_json: bool) -> Result<()> {
    let entries = controller.archive().list()?;

    if use_json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No backups in {}", controller.layout().root().display());
        return Ok(());
    }

    let mut tbl = create_table(&["ENVIRONMENT", "CREATED", "FILE"]);
    for entry in &entries {
        tbl.add_row(vec![
            entry.environment.clone(),
            entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            file_name(&entry.path),
        ]);
    }
    print_table(tbl);
    Ok(())
}
