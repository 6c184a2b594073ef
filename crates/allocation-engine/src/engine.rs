// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Request and release state transitions.
//!
//! ```text
//! request(customer, amounts)
//!     │  customer in [0, C)?          ── no ──► UnknownCustomer
//!     │  amounts >= 0, len == R?      ── no ──► InvalidRequest
//!     │  amounts <= need[customer]?   ── no ──► ExceedsMaximum
//!     │  amounts <= available?        ── no ──► InsufficientResources
//!     ▼
//!  Transaction::begin  (checkpoint)
//!     │  tentatively allocate
//!     │  safety check
//!     ├── safe   ──► commit ──────────────────► Granted
//!     └── unsafe ──► drop (restore checkpoint) ► DeniedUnsafe
//! ```

use crate::transaction::Transaction;
use crate::{EngineStats, Outcome, Rejection};
use resource_model::{ReportView, SystemState};
use safety_checker::{BankersAlgorithm, SafetyCheck, SafetyVerdict};

/// Owns the [`SystemState`] and applies requests and releases to it.
///
/// All mutating methods take `&mut self`, so a tentative allocation can
/// never be observed from outside. For multi-threaded use, wrap the engine
/// in a [`SharedEngine`](crate::SharedEngine).
///
/// # Example
/// ```
/// use allocation_engine::{AllocationEngine, Outcome, Rejection};
/// use resource_model::SystemState;
///
/// let state = SystemState::initialize(&[10, 5, 7], &[vec![7, 5, 3], vec![3, 2, 2]]).unwrap();
/// let mut engine = AllocationEngine::new(state);
///
/// assert_eq!(engine.request(1, &[1, 0, 2]), Ok(Outcome::Granted));
/// assert!(matches!(
///     engine.request(1, &[9, 0, 0]),
///     Err(Rejection::ExceedsMaximum { .. })
/// ));
/// assert_eq!(engine.release(1, &[1, 0, 2]), Ok(Outcome::Released));
/// ```
pub struct AllocationEngine {
    state: SystemState,
    checker: Box<dyn SafetyCheck>,
    stats: EngineStats,
}

impl AllocationEngine {
    /// Creates an engine using the [`BankersAlgorithm`] safety check.
    pub fn new(state: SystemState) -> Self {
        Self::with_checker(state, Box::new(BankersAlgorithm))
    }

    /// Creates an engine with a custom safety check.
    pub fn with_checker(state: SystemState, checker: Box<dyn SafetyCheck>) -> Self {
        Self {
            state,
            checker,
            stats: EngineStats::default(),
        }
    }

    /// Read-only access to the current state.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Consumes the engine, returning the final state.
    pub fn into_state(self) -> SystemState {
        self.state
    }

    pub fn checker_name(&self) -> &str {
        self.checker.name()
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Safety verdict for the current state.
    pub fn safety_verdict(&self) -> SafetyVerdict {
        self.checker.evaluate(&self.state)
    }

    pub fn is_safe(&self) -> bool {
        self.checker.is_safe(&self.state)
    }

    /// Read-only projection of the state for reporting.
    pub fn snapshot(&self) -> ReportView {
        self.state.snapshot()
    }

    /// Tries to grant `amounts` to `customer`.
    ///
    /// On any `Err` the state is unchanged. An all-zero request passes every
    /// precondition and is granted without running the safety check.
    pub fn request(&mut self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        let result = self.try_request(customer, amounts);
        self.stats.record_request(&result);
        match &result {
            Ok(_) => tracing::debug!(customer, ?amounts, "request granted"),
            Err(r @ Rejection::DeniedUnsafe { .. }) => tracing::info!("{r}"),
            Err(r) => tracing::trace!(kind = r.kind(), "request rejected: {r}"),
        }
        debug_assert!(self.state.check_invariants().is_ok());
        result
    }

    /// Returns `amounts` from `customer` to the pool.
    ///
    /// Releasing can only enlarge the set of safe states, so no safety check
    /// runs and a release that passes validation always succeeds.
    pub fn release(&mut self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        let result = self.try_release(customer, amounts);
        self.stats.record_release(&result);
        match &result {
            Ok(_) => tracing::debug!(customer, ?amounts, "resources released"),
            Err(r) => tracing::trace!(kind = r.kind(), "release rejected: {r}"),
        }
        debug_assert!(self.state.check_invariants().is_ok());
        result
    }

    fn try_request(&mut self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        self.check_customer(customer)?;
        let amounts = self.check_amounts(customer, amounts)?;

        let need = self.state.need(customer);
        if let Some(j) = first_exceeding(&amounts, need) {
            return Err(Rejection::ExceedsMaximum {
                customer,
                resource: j,
                requested: amounts[j],
                need: need[j],
            });
        }

        let available = self.state.available();
        if let Some(j) = first_exceeding(&amounts, available) {
            return Err(Rejection::InsufficientResources {
                customer,
                resource: j,
                requested: amounts[j],
                available: available[j],
            });
        }

        if amounts.iter().all(|&a| a == 0) {
            return Ok(Outcome::Granted);
        }

        let mut tx = Transaction::begin(&mut self.state);
        tx.state_mut().apply_allocation(customer, &amounts)?;

        self.stats.record_safety_check();
        if self.checker.is_safe(tx.state()) {
            tx.commit();
            Ok(Outcome::Granted)
        } else {
            drop(tx);
            Err(Rejection::DeniedUnsafe { customer })
        }
    }

    fn try_release(&mut self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        self.check_customer(customer)?;
        let amounts = self.check_amounts(customer, amounts)?;

        let held = self.state.allocation(customer);
        if let Some(j) = first_exceeding(&amounts, held) {
            return Err(Rejection::ExceedsAllocation {
                customer,
                resource: j,
                requested: amounts[j],
                allocated: held[j],
            });
        }

        self.state.apply_release(customer, &amounts)?;
        Ok(Outcome::Released)
    }

    fn check_customer(&self, customer: usize) -> Result<(), Rejection> {
        if self.state.contains_customer(customer) {
            Ok(())
        } else {
            Err(Rejection::UnknownCustomer {
                customer,
                customers: self.state.num_customers(),
            })
        }
    }

    /// Validates length and sign, converting to unsigned quantities.
    fn check_amounts(&self, customer: usize, amounts: &[i64]) -> Result<Vec<u64>, Rejection> {
        let resources = self.state.num_resources();
        if amounts.len() != resources {
            return Err(Rejection::InvalidRequest {
                customer,
                reason: format!("expected {resources} amounts, got {}", amounts.len()),
            });
        }
        amounts
            .iter()
            .enumerate()
            .map(|(j, &a)| {
                u64::try_from(a).map_err(|_| Rejection::InvalidRequest {
                    customer,
                    reason: format!("amount {a} for resource {j} is negative"),
                })
            })
            .collect()
    }
}

/// Index of the first component where `amounts[j] > limit[j]`.
fn first_exceeding(amounts: &[u64], limit: &[u64]) -> Option<usize> {
    amounts.iter().zip(limit).position(|(a, l)| a > l)
}

impl std::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationEngine")
            .field("dimensions", &self.state.dimensions())
            .field("checker", &self.checker.name())
            .field("available", &self.state.available())
            .finish()
    }
}
