// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `envswitch profiles`

use std::path::PathBuf;

use anyhow::Result;
use envswitch::{EnvironmentName, SwitchController};
use serde::Serialize;

use crate::output::{create_table, print_json, print_table};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRow {
    name: EnvironmentName,
    file: PathBuf,
    exists: bool,
    current: bool,
}

pub fn run(controller: &SwitchController, use_json: bool) -> Result<()> {
    let current = controller.active_environment();

    let rows: Vec<ProfileRow> = controller
        .profiles()
        .iter()
        .map(|(name, path)| ProfileRow {
            name,
            file: path.to_path_buf(),
            exists: path.is_file(),
            current: current.as_deref() == Some(name.to_string().as_str()),
        })
        .collect();

    if use_json {
        return print_json(&rows);
    }

    let mut tbl = create_table(&["NAME", "CURR", "EXISTS", "FILE"]);
    for row in &rows {
        tbl.add_row(vec![
            row.name.to_string(),
            if row.current { "*" } else { "" }.to_string(),
            if row.exists { "yes" } else { "no" }.to_string(),
            row.file.display().to_string(),
        ]);
    }
    print_table(tbl);
    Ok(())
}
