// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Dijkstra's Banker's algorithm safety check.
//!
//! ```text
//! work   := available
//! finish := [false; C]
//! loop:
//!     i := lowest unfinished customer with need[i] <= work
//!     none → stop
//!     work += allocation[i]; finish[i] := true; restart from 0
//! safe   := all(finish)
//! ```
//!
//! Each grant restarts the scan from customer 0, so the completion order is
//! always the lowest-index-first fixed point. The verdict itself does not
//! depend on scan order: `work` only grows, so a customer that fits at some
//! point still fits later.
//!
//! Worst case is `C` grants, each preceded by a scan of up to `C` customers
//! comparing `R` resources: `O(C² · R)`.

use crate::{SafetyCheck, SafetyVerdict};
use resource_model::SystemState;

/// The classic Banker's safety algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankersAlgorithm;

impl BankersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl SafetyCheck for BankersAlgorithm {
    fn name(&self) -> &str {
        "bankers"
    }

    fn evaluate(&self, state: &SystemState) -> SafetyVerdict {
        let customers = state.num_customers();
        let mut work = state.available().to_vec();
        let mut finished = vec![false; customers];
        let mut completion_order = Vec::with_capacity(customers);

        while let Some(i) =
            (0..customers).find(|&i| !finished[i] && fits_within(state.need(i), &work))
        {
            for (w, &held) in work.iter_mut().zip(state.allocation(i)) {
                *w += held;
            }
            finished[i] = true;
            completion_order.push(i);
            tracing::trace!(customer = i, ?work, "customer can run to completion");
        }

        let unfinished: Vec<usize> = (0..customers).filter(|&i| !finished[i]).collect();
        if !unfinished.is_empty() {
            tracing::trace!(?unfinished, "simulation stalled");
        }

        SafetyVerdict {
            completion_order,
            unfinished,
        }
    }
}

/// `true` if `need[j] <= work[j]` for every resource `j`.
fn fits_within(need: &[u64], work: &[u64]) -> bool {
    need.iter().zip(work).all(|(n, w)| n <= w)
}
