// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `bankers check` command: build the initial state and report whether it
//! is safe.

use runtime::{ReportFormat, ReportSink, RuntimeConfig};
use safety_checker::{BankersAlgorithm, SafetyCheck};

pub async fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    let state = config.load_state()?;
    let verdict = BankersAlgorithm.evaluate(&state);

    let mut sink = config.create_sink(std::io::stdout())?;
    if config.parse_format()? == ReportFormat::Text {
        super::banner("bankers · Safety Check");
        println!("  State: {}", state.snapshot().summary());
        println!();
    }
    sink.snapshot(&state.snapshot())?;
    sink.verdict(&verdict)?;
    sink.flush()?;

    if !verdict.is_safe() {
        tracing::warn!(unfinished = ?verdict.unfinished, "initial state is unsafe");
    }
    Ok(())
}
