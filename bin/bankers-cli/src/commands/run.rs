// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `bankers run` command: play a command stream against a customer table.
//!
//! ```text
//! RuntimeConfig → load_state → AllocationEngine → CommandDispatcher → sink
//! ```

use allocation_engine::AllocationEngine;
use anyhow::Context;
use runtime::{CommandDispatcher, ReportFormat, RuntimeConfig};
use tokio::io::BufReader;

pub async fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    let format = config.parse_format()?;
    let text = format == ReportFormat::Text;

    if text {
        super::banner("bankers · Command Runner");
        println!("  Config:");
        println!("   Customers: {}", config.customers_file.display());
        match &config.commands_file {
            Some(path) => println!("   Commands:  {}", path.display()),
            None => println!("   Commands:  <stdin>"),
        }
        println!("   Available: {:?}", config.available);
        println!();
    }

    let state = config.load_state().with_context(|| {
        format!(
            "building initial state from '{}'",
            config.customers_file.display()
        )
    })?;
    let sink = config.create_sink(std::io::stdout())?;
    let mut dispatcher = CommandDispatcher::new(AllocationEngine::new(state), sink)
        .with_snapshot_each(config.snapshot_after_each_command);

    dispatcher.report_initial_state()?;

    match &config.commands_file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening command file '{}'", path.display()))?;
            dispatcher.dispatch_reader(BufReader::new(file)).await?;
        }
        None => dispatcher.dispatch_reader(BufReader::new(tokio::io::stdin())).await?,
    }

    let summary = dispatcher.finish()?;
    if text {
        println!();
        println!("  Summary:");
        println!("   {}", summary.summary());
    }
    Ok(())
}
