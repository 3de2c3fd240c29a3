// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! envswitch - switch the active deployment configuration between environments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use envswitch::{Settings, StatusReporter, SwitchController};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

const DEFAULT_LOG_FILTER: &str = "envswitch=warn,envswitch_cli=warn";
const VERBOSE_LOG_FILTER: &str = "envswitch=debug,envswitch_cli=debug";

#[derive(Parser)]
#[command(
    name = "envswitch",
    version,
    about = "Switch the active deployment configuration between environments",
    long_about = "Copies one of the environment profiles (.env.local, .env.staging, \
                  .env.production) over the active configuration (.env), backing up \
                  the previous configuration first. Production profiles are checked for \
                  placeholder secrets after activation."
)]
struct Cli {
    /// Deployment directory holding the profiles and the active configuration
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "ENVSWITCH_DIR",
        default_value = "."
    )]
    dir: PathBuf,

    /// Additional regular expression rejected by the production safety gate
    #[arg(long = "deny-pattern", global = true, env = "ENVSWITCH_DENY_PATTERN")]
    deny_patterns: Vec<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activate the profile for an environment (local, staging, production)
    Switch {
        /// Environment name
        environment: String,
    },

    /// Show key fields of the active configuration
    Status,

    /// Check a profile for placeholder secrets without activating it
    Validate {
        /// Environment name
        environment: String,
    },

    /// List environment profiles
    #[command(alias = "ls")]
    Profiles,

    /// List backups of previously active configurations
    Backups,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let settings = Settings::load(&self.dir)
            .with_context(|| format!("Failed to load settings from {}", self.dir.display()))?;
        debug!(dir = %self.dir.display(), ?settings, "Resolved settings");
        Ok(settings)
    }

    fn controller(&self) -> Result<SwitchController> {
        Ok(self
            .settings()?
            .controller(self.dir.clone(), self.deny_patterns.as_slice())?)
    }

    /// Status never fails: a broken settings file falls back to the
    /// conventional layout.
    fn status_reporter(&self) -> StatusReporter {
        let settings = self.settings().unwrap_or_else(|e| {
            warn!("{e:#}; using default layout");
            Settings::default()
        });
        settings.status_reporter(self.dir.clone())
    }
}

fn main() -> Result<()> {
    // Help and version exit 0; any other parse failure prints usage and
    // exits 1 like the rest of the command's errors.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            if let Err(err) = e.print() {
                eprintln!("{err}");
            }
            std::process::exit(code);
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Switch { environment } => {
            commands::switch::run(&cli.controller()?, environment, cli.json)
        }
        Commands::Status => commands::status::run(&cli.status_reporter(), cli.json),
        Commands::Validate { environment } => {
            commands::validate::run(&cli.controller()?, environment, cli.json)
        }
        Commands::Profiles => commands::profiles::run(&cli.controller()?, cli.json),
        Commands::Backups => commands::backups::run(&cli.controller()?, cli.json),
    }
}
