// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Guarded activation of per-environment deployment configuration
//!
//! A deployment directory holds one profile file per environment
//! (`.env.local`, `.env.staging`, `.env.production`) and a single active
//! file (`.env`) that the container orchestrator reads when services start.
//! This crate switches the active file between profiles:
//!
//! - the previous active file is snapshotted to a timestamped backup first
//! - the new content is swapped in with a temp file and rename
//! - production profiles are scanned for placeholder secrets afterwards
//!
//! # Example
//!
//! ```no_run
//! use envswitch::{EnvironmentName, Settings};
//!
//! let root = std::path::Path::new("/srv/app");
//! let controller = Settings::load(root)?.controller::<&str>(root, &[])?;
//! match controller.switch(EnvironmentName::Staging) {
//!     Ok(report) => println!("now on {}", report.environment),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backup;
pub mod controller;
pub mod envfile;
pub mod environment;
pub mod error;
pub mod gate;
pub mod layout;
pub mod profile;
pub mod settings;
pub mod slot;
pub mod status;

pub use backup::{BackupArchive, BackupEntry};
pub use controller::{GateOutcome, SwitchController, SwitchReport};
pub use envfile::EnvFile;
pub use environment::EnvironmentName;
pub use error::{EnvFileError, SettingsError, SwitchError};
pub use gate::{GateRule, SafetyGate, SafetyViolation};
pub use layout::DeploymentLayout;
pub use profile::ProfileStore;
pub use settings::Settings;
pub use slot::ActiveSlot;
pub use status::{Status, StatusReporter, StatusSummary};
