// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for building and mutating the system state.

/// Errors raised while constructing a [`SystemState`](crate::SystemState)
/// or when an internal consistency check fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// An input vector or table has the wrong shape.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    Dimension {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// A quantity supplied at initialization is negative.
    #[error("invalid value {value} in {location}: quantities must be non-negative")]
    InvalidValue { location: String, value: i64 },

    /// A restored allocation is larger than the customer's declared maximum.
    #[error(
        "customer {customer} holds {allocated} of resource {resource}, above its maximum of {maximum}"
    )]
    AllocationExceedsMaximum {
        customer: usize,
        resource: usize,
        allocated: u64,
        maximum: u64,
    },

    /// The customers together hold more of a resource than exists.
    #[error("resource {resource} over-committed: {allocated} allocated out of a total supply of {total}")]
    OverCommitted {
        resource: usize,
        allocated: u64,
        total: u64,
    },

    /// One of the state invariants does not hold.
    #[error("state invariant violated: {0}")]
    InvariantViolation(String),
}
