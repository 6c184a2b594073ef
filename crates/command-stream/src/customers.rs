// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Customer maximum-demand table loading.
//!
//! # Format
//! ```text
//! # one customer per line, one column per resource type
//! 7,5,3
//! 3,2,2
//! 9 0 2
//! ```
//!
//! Values may be separated by commas, whitespace, or both. Row `i` is
//! customer `i`. The loader only tokenizes; shape and sign are checked when
//! the table is turned into a `SystemState`.

use crate::ParseError;
use std::path::Path;

/// The per-customer maximum-demand table, in customer index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerTable {
    rows: Vec<Vec<i64>>,
}

impl CustomerTable {
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// Loads a table from a file.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            customers = table.num_customers(),
            "loaded customer table"
        );
        Ok(table)
    }

    /// Parses a table from text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut rows = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            let row = content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<i64>().map_err(|_| ParseError::Malformed {
                        line: i + 1,
                        detail: format!("invalid maximum-demand value '{t}'"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn num_customers(&self) -> usize {
        self.rows.len()
    }

    /// Column count of the first row, or `None` for an empty table.
    pub fn num_resources(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<i64>> {
        self.rows
    }
}
