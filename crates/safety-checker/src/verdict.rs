// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The result of a safety check.

use std::fmt;

/// Outcome of simulating every customer to completion.
///
/// `completion_order` lists customers in the order the simulation let them
/// finish. When the state is safe it is a full safe sequence; otherwise it
/// is the prefix reached before the simulation stalled, and `unfinished`
/// holds the customers that could never complete.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct SafetyVerdict {
    pub completion_order: Vec<usize>,
    pub unfinished: Vec<usize>,
}

impl SafetyVerdict {
    /// `true` iff every customer can run to completion.
    pub fn is_safe(&self) -> bool {
        self.unfinished.is_empty()
    }

    /// The safe sequence, if the state is safe.
    pub fn safe_sequence(&self) -> Option<&[usize]> {
        self.is_safe().then_some(self.completion_order.as_slice())
    }
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ids: &[usize]| {
            ids.iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        if self.is_safe() {
            write!(f, "SAFE, sequence <{}>", join(&self.completion_order))
        } else {
            write!(
                f,
                "UNSAFE, customers [{}] cannot complete",
                join(&self.unfinished)
            )
        }
    }
}
