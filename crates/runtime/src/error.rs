// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the runtime layer.
//!
//! Per-command rejections are not errors here: they are reported through the
//! sink and the run continues. A `RuntimeError` ends the run.

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The initial state could not be built.
    #[error("initialization failed: {0}")]
    State(#[from] resource_model::StateError),

    /// The customer table could not be read or tokenized.
    #[error("input error: {0}")]
    Parse(#[from] command_stream::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Reading commands or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
