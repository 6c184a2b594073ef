// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Runs a Banker's-algorithm allocation engine against a command stream.
//!
//! The runtime takes:
//! - A [`RuntimeConfig`] naming the customer table, the available vector
//!   and the report format.
//! - A command stream (file, stdin, or any `AsyncBufRead`).
//! - A [`ReportSink`] that renders outcomes and snapshots.
//!
//! # Pipeline
//! ```text
//! RuntimeConfig ──load_state()──► SystemState ──► AllocationEngine
//!                                                      │
//!         lines ──► CommandDispatcher ◄────────────────┘
//!                          │
//!                          ▼
//!              ReportSink (text | json | memory)
//! ```
//!
//! Per-command rejections are reported and the run continues. Only
//! initialization, configuration and I/O failures end a run with a
//! [`RuntimeError`].
//!
//! # Example
//! ```
//! use allocation_engine::AllocationEngine;
//! use runtime::{scenario, CommandDispatcher, TextSink};
//!
//! let engine = AllocationEngine::new(scenario::classic_state().unwrap());
//! let mut dispatcher = CommandDispatcher::new(engine, TextSink::new(Vec::new()));
//! dispatcher.dispatch_str(scenario::CLASSIC_COMMANDS).unwrap();
//!
//! let summary = dispatcher.finish().unwrap();
//! assert_eq!(summary.engine.grants, 1);
//! assert_eq!(summary.engine.unsafe_denials, 1);
//! ```

mod config;
mod dispatcher;
mod error;
mod report;
pub mod scenario;

pub use config::{ReportFormat, RuntimeConfig};
pub use dispatcher::{CommandDispatcher, CommandOutcome, CommandRecord, RunSummary};
pub use error::RuntimeError;
pub use report::{JsonSink, MemorySink, ReportEvent, ReportSink, TextSink};
