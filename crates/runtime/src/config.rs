// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! customers_file = "./customers.txt"
//! commands_file = "./commands.txt"   # omit to read stdin
//! available = [10, 5, 7]
//! expected_customers = 5             # optional
//! report_format = "text"             # or "json"
//! snapshot_after_each_command = false
//! ```

use crate::report::{JsonSink, ReportSink, TextSink};
use crate::RuntimeError;
use command_stream::CustomerTable;
use resource_model::SystemState;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for ReportFormat {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(RuntimeError::ConfigError(format!(
                "unknown report format '{other}'; expected 'text' or 'json'"
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Configuration for a command-stream run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    /// Path to the customer maximum-demand table.
    pub customers_file: PathBuf,
    /// Path to the command stream. `None` reads standard input.
    #[serde(default)]
    pub commands_file: Option<PathBuf>,
    /// Initially available units of each resource type.
    pub available: Vec<i64>,
    /// If set, the customer table must have exactly this many rows.
    #[serde(default)]
    pub expected_customers: Option<usize>,
    /// Report format name: `"text"` or `"json"`.
    #[serde(default = "default_format")]
    pub report_format: String,
    /// Print the full state after every request and release.
    #[serde(default)]
    pub snapshot_after_each_command: bool,
}

fn default_format() -> String {
    ReportFormat::Text.to_string()
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Checks the fields that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.available.is_empty() {
            return Err(RuntimeError::ConfigError(
                "'available' must list at least one resource type".into(),
            ));
        }
        if self.customers_file.as_os_str().is_empty() {
            return Err(RuntimeError::ConfigError(
                "'customers_file' must not be empty".into(),
            ));
        }
        self.parse_format()?;
        Ok(())
    }

    /// Parses the report format string.
    pub fn parse_format(&self) -> Result<ReportFormat, RuntimeError> {
        self.report_format.parse()
    }

    /// Reads the customer table and builds the initial state.
    pub fn load_state(&self) -> Result<SystemState, RuntimeError> {
        self.validate()?;
        let table = CustomerTable::from_file(&self.customers_file)?;
        let state = match self.expected_customers {
            Some(n) => SystemState::initialize_for(n, &self.available, table.rows())?,
            None => SystemState::initialize(&self.available, table.rows())?,
        };
        tracing::info!(
            customers_file = %self.customers_file.display(),
            dims = %state.dimensions(),
            "initial state loaded"
        );
        Ok(state)
    }

    /// Creates the report sink specified by this config.
    pub fn create_sink<W: Write + 'static>(
        &self,
        writer: W,
    ) -> Result<Box<dyn ReportSink>, RuntimeError> {
        Ok(match self.parse_format()? {
            ReportFormat::Text => Box::new(TextSink::new(writer)),
            ReportFormat::Json => Box::new(JsonSink::new(writer)),
        })
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            customers_file: PathBuf::from("./customers.txt"),
            commands_file: None,
            available: Vec::new(),
            expected_customers: None,
            report_format: default_format(),
            snapshot_after_each_command: false,
        }
    }
}
