// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `bankers demo` command: walk through the classic five-customer example.

use allocation_engine::AllocationEngine;
use runtime::{scenario, CommandDispatcher, TextSink};

pub async fn execute() -> anyhow::Result<()> {
    super::banner("bankers · Classic Example");

    let engine = AllocationEngine::new(scenario::classic_state()?);
    println!("  Checker: {}", engine.checker_name());
    println!();

    let mut dispatcher = CommandDispatcher::new(engine, TextSink::new(std::io::stdout()));
    dispatcher.report_initial_state()?;

    for (i, line) in scenario::CLASSIC_COMMANDS.lines().enumerate() {
        let line = line.trim();
        if let Some(note) = line.strip_prefix('#') {
            println!();
            println!("  {}", note.trim());
            continue;
        }
        println!("> {line}");
        dispatcher.dispatch_line(i + 1, line)?;
    }

    let summary = dispatcher.finish()?;
    println!("  Summary:");
    println!("   {}", summary.summary());
    Ok(())
}
