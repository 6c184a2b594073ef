// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # allocation-engine
//!
//! Deadlock-avoiding request and release handling on top of
//! [`resource_model::SystemState`] and a [`safety_checker::SafetyCheck`].
//!
//! # Key Components
//!
//! - [`AllocationEngine`]: owns the state; validates each command, applies
//!   requests tentatively, and keeps them only if the state stays safe.
//! - [`Rejection`]: the named, recoverable reasons a command is refused.
//! - [`EngineStats`]: cumulative counters (grants, denials, safety checks).
//! - [`SharedEngine`]: an `Arc<Mutex<_>>` handle for multi-threaded callers.
//!
//! # Ownership Model
//!
//! ```text
//! AllocationEngine::request
//!       │
//!       ▼
//!   Transaction  ◄─── holds &mut SystemState + full checkpoint
//!       │
//!       ├── commit()  → checkpoint discarded
//!       └── drop()    → checkpoint written back
//! ```
//!
//! The transaction guard holds the only mutable borrow of the state, so the
//! tentative allocation is invisible to everything else until the safety
//! verdict is in.
//!
//! # Example
//! ```
//! use allocation_engine::{AllocationEngine, Outcome, Rejection};
//! use resource_model::SystemState;
//!
//! let state = SystemState::from_parts(
//!     &[10, 5, 7],
//!     &[vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
//!     &[vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
//! ).unwrap();
//! let mut engine = AllocationEngine::new(state);
//!
//! assert_eq!(engine.request(1, &[1, 0, 2]), Ok(Outcome::Granted));
//! assert!(matches!(engine.request(0, &[0, 2, 0]), Err(Rejection::DeniedUnsafe { .. })));
//! ```

mod engine;
mod error;
mod outcome;
mod shared;
mod stats;
mod transaction;

pub use engine::AllocationEngine;
pub use error::Rejection;
pub use outcome::Outcome;
pub use shared::SharedEngine;
pub use stats::EngineStats;
