// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod check;
pub mod demo;
pub mod run;

use anyhow::Context;
use runtime::RuntimeConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. Logs go to stderr so reports on
/// stdout stay machine-readable. `RUST_LOG` overrides the `-v` level.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merges the optional `--config` file with command-line arguments.
/// Arguments given on the command line win.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    customers: Option<PathBuf>,
    available: Vec<i64>,
) -> anyhow::Result<RuntimeConfig> {
    let mut config = match &config_path {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => RuntimeConfig::default(),
    };

    match customers {
        Some(path) => config.customers_file = path,
        None if config_path.is_none() => {
            anyhow::bail!("--customers is required when no --config file is given")
        }
        None => {}
    }
    if !available.is_empty() {
        config.available = available;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Prints a boxed title banner.
pub fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║ {:^52} ║", title);
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_customers() {
        assert!(resolve_config(None, None, vec![1]).is_err());
    }

    #[test]
    fn test_resolve_from_args() {
        let c = resolve_config(None, Some("c.txt".into()), vec![10, 5, 7]).unwrap();
        assert_eq!(c.customers_file, PathBuf::from("c.txt"));
        assert_eq!(c.available, vec![10, 5, 7]);
    }

    #[test]
    fn test_resolve_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankers.toml");
        std::fs::write(&path, "customers_file = \"file.txt\"\navailable = [1, 2]\n").unwrap();

        let c = resolve_config(Some(path.clone()), None, vec![]).unwrap();
        assert_eq!(c.customers_file, PathBuf::from("file.txt"));
        assert_eq!(c.available, vec![1, 2]);

        let c = resolve_config(Some(path), None, vec![4, 4]).unwrap();
        assert_eq!(c.available, vec![4, 4]);
    }

    #[test]
    fn test_resolve_rejects_empty_available() {
        assert!(resolve_config(None, Some("c.txt".into()), vec![]).is_err());
    }
}
