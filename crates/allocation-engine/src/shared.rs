// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Thread-safe handle around an [`AllocationEngine`].
//!
//! Every operation takes a single `Mutex` for its whole duration, so the
//! validate → tentative apply → safety check → commit/rollback sequence of a
//! request is never interleaved with another command.

use crate::{AllocationEngine, EngineStats, Outcome, Rejection};
use resource_model::ReportView;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

/// A cloneable, `Send + Sync` handle to one engine.
///
/// # Example
/// ```
/// use allocation_engine::{AllocationEngine, Outcome, SharedEngine};
/// use resource_model::SystemState;
///
/// let state = SystemState::initialize(&[4], &[vec![2], vec![2]]).unwrap();
/// let shared = SharedEngine::new(AllocationEngine::new(state));
///
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.request(0, &[1])).join().unwrap().unwrap();
/// assert_eq!(shared.request(1, &[1]), Ok(Outcome::Granted));
/// assert_eq!(shared.snapshot().available, vec![2]);
/// ```
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<AllocationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: AllocationEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn request(&self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        self.lock().request(customer, amounts)
    }

    pub fn release(&self, customer: usize, amounts: &[i64]) -> Result<Outcome, Rejection> {
        self.lock().release(customer, amounts)
    }

    pub fn snapshot(&self) -> ReportView {
        self.lock().snapshot()
    }

    pub fn stats(&self) -> EngineStats {
        self.lock().stats().clone()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut AllocationEngine) -> R) -> R {
        f(&mut self.lock())
    }

    /// A panic inside a transaction has already been rolled back by the
    /// transaction guard, so a poisoned lock still holds a consistent state.
    fn lock(&self) -> MutexGuard<'_, AllocationEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("SharedEngine");
        match self.inner.try_lock() {
            Ok(engine) => out.field("engine", &*engine),
            Err(TryLockError::Poisoned(poisoned)) => out.field("engine", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => out.field("engine", &format_args!("<locked>")),
        };
        out.finish()
    }
}
