// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # safety-checker
//!
//! Decides whether a [`SystemState`](resource_model::SystemState) is *safe*:
//! whether some order exists in which every customer can obtain its full
//! remaining need, finish, and return everything it holds.
//!
//! # Trait-Based Extensibility
//!
//! Checkers implement [`SafetyCheck`], so the allocation engine never
//! depends on a concrete algorithm:
//!
//! ```ignore
//! struct AlwaysSafe;
//! impl SafetyCheck for AlwaysSafe {
//!     fn name(&self) -> &str { "always-safe" }
//!     fn evaluate(&self, _: &SystemState) -> SafetyVerdict { SafetyVerdict::default() }
//! }
//! ```
//!
//! # Example
//! ```
//! use resource_model::SystemState;
//! use safety_checker::{BankersAlgorithm, SafetyCheck};
//!
//! let state = SystemState::initialize(&[3], &[vec![2], vec![3]]).unwrap();
//! let verdict = BankersAlgorithm.evaluate(&state);
//! assert!(verdict.is_safe());
//! assert_eq!(verdict.completion_order, vec![0, 1]);
//! ```

mod bankers;
mod check;
mod verdict;

pub use bankers::BankersAlgorithm;
pub use check::SafetyCheck;
pub use verdict::SafetyVerdict;

/// Runs the default [`BankersAlgorithm`] check on `state`.
pub fn is_safe(state: &resource_model::SystemState) -> bool {
    BankersAlgorithm.is_safe(state)
}
