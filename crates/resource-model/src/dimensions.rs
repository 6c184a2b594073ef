// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fixed index space of a run: `[0, C) × [0, R)`.

use std::fmt;

/// Number of customers and resource types, captured once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Number of customers (`C`).
    pub customers: usize,
    /// Number of resource types (`R`).
    pub resources: usize,
}

impl Dimensions {
    pub fn new(customers: usize, resources: usize) -> Self {
        Self {
            customers,
            resources,
        }
    }

    /// Returns `true` if `customer` is a valid index in `[0, C)`.
    pub fn contains_customer(&self, customer: usize) -> bool {
        customer < self.customers
    }

    /// Number of cells in a `C × R` matrix.
    pub fn cells(&self) -> usize {
        self.customers * self.resources
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} customers × {} resource types",
            self.customers, self.resources
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_customer() {
        let d = Dimensions::new(5, 3);
        assert!(d.contains_customer(0));
        assert!(d.contains_customer(4));
        assert!(!d.contains_customer(5));
    }

    #[test]
    fn test_cells() {
        assert_eq!(Dimensions::new(5, 3).cells(), 15);
        assert_eq!(Dimensions::new(0, 3).cells(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Dimensions::new(5, 3).to_string(),
            "5 customers × 3 resource types"
        );
    }
}
