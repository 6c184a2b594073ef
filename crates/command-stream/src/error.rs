// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for input parsing.

/// Errors raised while reading the customer table or a command line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The first token of a command line is not a known keyword.
    #[error("line {line}: unknown command '{keyword}' (expected RQ, RL or *)")]
    UnknownCommand { line: usize, keyword: String },

    /// A command carries the wrong number of amounts.
    #[error("line {line}: expected {expected} amounts, got {actual}")]
    WrongArity {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A token is not an integer, or a customer id is negative.
    #[error("line {line}: {detail}")]
    Malformed { line: usize, detail: String },
}

impl ParseError {
    /// The 1-based input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::UnknownCommand { line, .. }
            | Self::WrongArity { line, .. }
            | Self::Malformed { line, .. } => Some(*line),
        }
    }
}
