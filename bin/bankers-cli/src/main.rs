// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # bankers
//!
//! Command-line interface for the Banker's-algorithm allocation runtime.
//!
//! ## Usage
//! ```bash
//! # Play a command file against a customer table
//! bankers run --customers customers.txt --commands commands.txt 10 5 7
//!
//! # Same, reading commands from stdin and reporting JSON lines
//! bankers run --customers customers.txt --format json 10 5 7 < commands.txt
//!
//! # Check whether the initial state is safe
//! bankers check --customers customers.txt 10 5 7
//!
//! # Walk through the classic five-customer example
//! bankers demo
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bankers",
    about = "Deadlock-avoiding resource allocation with the Banker's algorithm",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override its fields).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a command stream (RQ / RL / *) against a customer table.
    Run {
        /// Customer maximum-demand table, one customer per line.
        #[arg(long)]
        customers: Option<PathBuf>,

        /// Command file. Reads stdin when omitted.
        #[arg(long)]
        commands: Option<PathBuf>,

        /// Report format: text or json.
        #[arg(short, long)]
        format: Option<String>,

        /// Print the full state after every request and release.
        #[arg(long)]
        snapshot_each: bool,

        /// Initially available units of each resource type.
        #[arg(allow_negative_numbers = true)]
        available: Vec<i64>,
    },

    /// Build the initial state and report whether it is safe.
    Check {
        /// Customer maximum-demand table, one customer per line.
        #[arg(long)]
        customers: Option<PathBuf>,

        /// Initially available units of each resource type.
        #[arg(allow_negative_numbers = true)]
        available: Vec<i64>,
    },

    /// Run the classic five-customer, three-resource example.
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            customers,
            commands: commands_file,
            format,
            snapshot_each,
            available,
        } => {
            let mut config = commands::resolve_config(cli.config, customers, available)?;
            if commands_file.is_some() {
                config.commands_file = commands_file;
            }
            if let Some(format) = format {
                config.report_format = format;
            }
            config.snapshot_after_each_command |= snapshot_each;
            commands::run::execute(config).await
        }
        Commands::Check {
            customers,
            available,
        } => {
            let config = commands::resolve_config(cli.config, customers, available)?;
            commands::check::execute(config).await
        }
        Commands::Demo => commands::demo::execute().await,
    }
}
