// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # command-stream
//!
//! Text adapters in front of the allocation engine:
//!
//! - [`CustomerTable`]: the per-customer maximum-demand table, loaded from
//!   a comma- or whitespace-separated file.
//! - [`Command`] / [`CommandParser`]: the `RQ` / `RL` / `*` command stream,
//!   one command per line.
//!
//! Malformed lines are rejected here with a [`ParseError`] carrying the line
//! number, so the engine only ever sees complete, typed commands.
//!
//! # Example
//! ```
//! use command_stream::{Command, CommandParser, CustomerTable};
//!
//! let table = CustomerTable::parse("7,5,3\n3,2,2\n").unwrap();
//! let parser = CommandParser::new(table.num_resources().unwrap());
//!
//! let commands: Vec<Command> = parser
//!     .parse_str("RQ 1 1 0 2\nRL 1 1 0 0\n*\n")
//!     .map(|(_, c)| c.unwrap())
//!     .collect();
//! assert_eq!(commands.len(), 3);
//! ```

mod command;
mod customers;
mod error;

pub use command::{Command, CommandParser};
pub use customers::CustomerTable;
pub use error::ParseError;
