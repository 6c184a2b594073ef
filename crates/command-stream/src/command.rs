// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed commands and the line-oriented command parser.
//!
//! # Format
//! ```text
//! # comment
//! RQ 1 1 0 2      request {1,0,2} for customer 1
//! RL 1 1 0 0      release {1,0,0} from customer 1
//! *               print a snapshot
//! ```
//!
//! Keywords are case-insensitive. Amounts are signed integers: a negative
//! amount is well-formed here and is rejected later by the allocation
//! engine. A negative customer id is malformed.

use crate::ParseError;
use std::fmt;

/// One command from the command stream.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Ask for `amounts` on behalf of `customer`.
    Request { customer: usize, amounts: Vec<i64> },
    /// Return `amounts` held by `customer`.
    Release { customer: usize, amounts: Vec<i64> },
    /// Report the current state.
    Snapshot,
}

impl Command {
    /// The customer this command refers to, if any.
    pub fn customer(&self) -> Option<usize> {
        match self {
            Self::Request { customer, .. } | Self::Release { customer, .. } => Some(*customer),
            Self::Snapshot => None,
        }
    }

    /// The keyword used in the textual format.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Request { .. } => "RQ",
            Self::Release { .. } => "RL",
            Self::Snapshot => "*",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { customer, amounts } | Self::Release { customer, amounts } => {
                write!(f, "{} {customer}", self.keyword())?;
                for a in amounts {
                    write!(f, " {a}")?;
                }
                Ok(())
            }
            Self::Snapshot => f.write_str("*"),
        }
    }
}

/// Parses command lines for a system with a fixed number of resource types.
///
/// # Example
/// ```
/// use command_stream::{Command, CommandParser};
///
/// let parser = CommandParser::new(3);
/// assert_eq!(
///     parser.parse_line(1, "RQ 0 1 0 2").unwrap(),
///     Some(Command::Request { customer: 0, amounts: vec![1, 0, 2] }),
/// );
/// assert_eq!(parser.parse_line(2, "   # note").unwrap(), None);
/// assert!(parser.parse_line(3, "RQ 0 1").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    resources: usize,
}

impl CommandParser {
    pub fn new(resources: usize) -> Self {
        Self { resources }
    }

    /// Number of amounts each request/release must carry.
    pub fn resources(&self) -> usize {
        self.resources
    }

    /// Parses a single line. `line_no` is 1-based and used in errors.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<Command>, ParseError> {
        let content = line.split('#').next().unwrap_or("").trim();
        let mut tokens = content.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };

        let command = match keyword.to_ascii_uppercase().as_str() {
            "*" => {
                if let Some(extra) = tokens.next() {
                    return Err(ParseError::Malformed {
                        line: line_no,
                        detail: format!("unexpected argument '{extra}' after '*'"),
                    });
                }
                Command::Snapshot
            }
            "RQ" => {
                let (customer, amounts) = self.parse_args(line_no, tokens)?;
                Command::Request { customer, amounts }
            }
            "RL" => {
                let (customer, amounts) = self.parse_args(line_no, tokens)?;
                Command::Release { customer, amounts }
            }
            _ => {
                return Err(ParseError::UnknownCommand {
                    line: line_no,
                    keyword: keyword.to_string(),
                })
            }
        };
        Ok(Some(command))
    }

    /// Parses every line of `text`, pairing each result with its line number.
    /// Blank and comment lines are dropped.
    pub fn parse_str<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (usize, Result<Command, ParseError>)> + 'a {
        text.lines().enumerate().filter_map(move |(i, line)| {
            self.parse_line(i + 1, line)
                .transpose()
                .map(|result| (i + 1, result))
        })
    }

    fn parse_args<'t>(
        &self,
        line_no: usize,
        mut tokens: impl Iterator<Item = &'t str>,
    ) -> Result<(usize, Vec<i64>), ParseError> {
        let customer_token = tokens.next().ok_or_else(|| ParseError::Malformed {
            line: line_no,
            detail: "missing customer number".into(),
        })?;
        let customer = customer_token
            .parse::<usize>()
            .map_err(|_| ParseError::Malformed {
                line: line_no,
                detail: format!("invalid customer number '{customer_token}'"),
            })?;

        let amounts = tokens
            .map(|t| {
                t.parse::<i64>().map_err(|_| ParseError::Malformed {
                    line: line_no,
                    detail: format!("invalid amount '{t}'"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if amounts.len() != self.resources {
            return Err(ParseError::WrongArity {
                line: line_no,
                expected: self.resources,
                actual: amounts.len(),
            });
        }
        Ok((customer, amounts))
    }
}
