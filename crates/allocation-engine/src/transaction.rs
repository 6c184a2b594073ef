// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII transaction guard that restores the state on drop.
//!
//! [`Transaction`] checkpoints the whole [`SystemState`] before a tentative
//! allocation. Unless [`commit`](Transaction::commit) is called, dropping the
//! guard writes the whole checkpoint back (not an arithmetic inverse), and
//! it does so while unwinding too, if the safety check panics
//! mid-transaction.

use resource_model::SystemState;

/// A scoped tentative mutation of a [`SystemState`].
///
/// The guard holds the only `&mut` to the state for its lifetime, so no
/// other code can observe the tentative state.
///
/// # Example
/// ```ignore
/// let mut tx = Transaction::begin(&mut state);
/// tx.state_mut().apply_allocation(1, &[1, 0, 2])?;
/// if checker.is_safe(tx.state()) {
///     tx.commit();            // keep the mutation
/// }                           // otherwise dropped → rolled back
/// ```
pub(crate) struct Transaction<'a> {
    state: &'a mut SystemState,
    /// `Some` until the transaction is committed.
    checkpoint: Option<SystemState>,
}

impl<'a> Transaction<'a> {
    /// Checkpoints `state` and opens the transaction.
    pub(crate) fn begin(state: &'a mut SystemState) -> Self {
        let checkpoint = Some(state.clone());
        Self { state, checkpoint }
    }

    pub(crate) fn state(&self) -> &SystemState {
        self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut SystemState {
        self.state
    }

    /// Keeps the tentative mutation.
    pub(crate) fn commit(mut self) {
        self.checkpoint = None;
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(checkpoint) = self.checkpoint.take() {
            *self.state = checkpoint;
        }
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("dimensions", &self.state.dimensions())
            .field("committed", &self.checkpoint.is_none())
            .finish()
    }
}
