// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-model
//!
//! The data model for Banker's-algorithm deadlock avoidance: a fixed set of
//! customers sharing a fixed set of countable resource types.
//!
//! # Key Components
//!
//! - [`SystemState`]: owns the available vector and the maximum,
//!   allocation and need matrices, and enforces their invariants.
//! - [`ResourceMatrix`]: a dense `customers × resources` matrix sized
//!   exactly once at initialization.
//! - [`Dimensions`]: the fixed index space `[0, C) × [0, R)`.
//! - [`ReportView`]: an owned, serialisable projection for reporting.
//!
//! # Invariants
//!
//! ```text
//! 0 <= allocation[i][j] <= maximum[i][j]
//! need[i][j] == maximum[i][j] - allocation[i][j]
//! available[j] + Σ_i allocation[i][j] == total_supply[j]
//! ```
//!
//! # Example
//! ```
//! use resource_model::SystemState;
//!
//! let mut state = SystemState::initialize(&[10, 5, 7], &[vec![7, 5, 3], vec![3, 2, 2]]).unwrap();
//! state.apply_allocation(1, &[1, 0, 2]).unwrap();
//! assert_eq!(state.available(), &[9, 5, 5]);
//! assert!(state.check_invariants().is_ok());
//! ```

mod dimensions;
mod error;
mod matrix;
mod snapshot;
mod state;

pub use dimensions::Dimensions;
pub use error::StateError;
pub use matrix::ResourceMatrix;
pub use snapshot::{CustomerRow, ReportView};
pub use state::SystemState;
