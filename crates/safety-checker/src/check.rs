// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`SafetyCheck`] trait.

use crate::SafetyVerdict;
use resource_model::SystemState;

/// Decides whether a state is safe.
///
/// Implementations are pure: they read the state and never mutate it, so
/// calling one twice on the same state gives the same verdict. The
/// allocation engine holds a `Box<dyn SafetyCheck>`, which lets tests plug
/// in a checker with fixed answers to exercise the rollback path.
pub trait SafetyCheck: Send + Sync {
    /// Human-readable name of this checker.
    fn name(&self) -> &str;

    /// Simulates the state and returns the full verdict.
    fn evaluate(&self, state: &SystemState) -> SafetyVerdict;

    /// `true` iff every customer can still run to completion.
    fn is_safe(&self, state: &SystemState) -> bool {
        self.evaluate(state).is_safe()
    }
}
