// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-command rejection reasons.
//!
//! Every rejection leaves the [`SystemState`](resource_model::SystemState)
//! exactly as it was before the command. None of them is fatal: the caller
//! reports it and moves on to the next command.

use resource_model::StateError;

/// Why a request or release was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The customer index is outside `[0, C)`.
    #[error("unknown customer {customer}: only {customers} customers exist")]
    UnknownCustomer { customer: usize, customers: usize },

    /// The amount vector has a negative entry or the wrong length.
    #[error("invalid request from customer {customer}: {reason}")]
    InvalidRequest { customer: usize, reason: String },

    /// The request is larger than the customer's remaining declared need.
    #[error(
        "customer {customer} requested {requested} of resource {resource}, \
         exceeding its remaining need of {need}"
    )]
    ExceedsMaximum {
        customer: usize,
        resource: usize,
        requested: u64,
        need: u64,
    },

    /// Not enough of a resource is free right now. The customer may try
    /// again later; nothing is queued.
    #[error(
        "customer {customer} requested {requested} of resource {resource}, \
         but only {available} are available"
    )]
    InsufficientResources {
        customer: usize,
        resource: usize,
        requested: u64,
        available: u64,
    },

    /// A release returns more than the customer currently holds.
    #[error(
        "customer {customer} tried to release {requested} of resource {resource} \
         but holds only {allocated}"
    )]
    ExceedsAllocation {
        customer: usize,
        resource: usize,
        requested: u64,
        allocated: u64,
    },

    /// Granting the request would leave the system unsafe; it was rolled back.
    #[error("request from customer {customer} would leave the system in an unsafe state")]
    DeniedUnsafe { customer: usize },

    /// An internal state inconsistency was detected. Never produced for a
    /// command that passed validation.
    #[error("state integrity error: {0}")]
    StateCorruption(String),
}

impl Rejection {
    /// Stable snake_case name of the rejection, for logs and JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCustomer { .. } => "unknown_customer",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::ExceedsMaximum { .. } => "exceeds_maximum",
            Self::InsufficientResources { .. } => "insufficient_resources",
            Self::ExceedsAllocation { .. } => "exceeds_allocation",
            Self::DeniedUnsafe { .. } => "denied_unsafe",
            Self::StateCorruption(_) => "state_corruption",
        }
    }
}

impl From<StateError> for Rejection {
    fn from(e: StateError) -> Self {
        Self::StateCorruption(e.to_string())
    }
}
