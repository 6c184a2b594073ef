// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Read-only report projection of a [`SystemState`](crate::SystemState).
//!
//! A [`ReportView`] is an owned copy, so reporters can hold on to it while
//! the engine keeps processing commands.

use crate::Dimensions;

/// One customer's row in a report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CustomerRow {
    /// Customer index.
    pub customer: usize,
    pub maximum: Vec<u64>,
    pub allocation: Vec<u64>,
    pub need: Vec<u64>,
}

/// Point-in-time copy of the available vector and every customer's
/// maximum, allocation and need, in customer index order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportView {
    pub dimensions: Dimensions,
    pub available: Vec<u64>,
    pub total_supply: Vec<u64>,
    pub customers: Vec<CustomerRow>,
}

impl ReportView {
    /// Total units of each resource currently held by customers.
    pub fn allocated(&self) -> Vec<u64> {
        let mut totals = vec![0; self.dimensions.resources];
        for row in &self.customers {
            for (t, &held) in totals.iter_mut().zip(&row.allocation) {
                *t += held;
            }
        }
        totals
    }

    /// Returns a one-line summary suitable for logging.
    pub fn summary(&self) -> String {
        format!(
            "{}: available {:?} of {:?}, allocated {:?}",
            self.dimensions,
            self.available,
            self.total_supply,
            self.allocated(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::SystemState;

    #[test]
    fn test_allocated_totals() {
        let s = SystemState::from_parts(
            &[10, 5],
            &[vec![4, 4], vec![5, 1]],
            &[vec![1, 2], vec![3, 1]],
        )
        .unwrap();
        assert_eq!(s.snapshot().allocated(), vec![4, 3]);
    }

    #[test]
    fn test_summary() {
        let s = SystemState::initialize(&[3, 3], &[vec![1, 1]]).unwrap();
        let summary = s.snapshot().summary();
        assert!(summary.contains("1 customers"));
        assert!(summary.contains("available [3, 3]"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let view = SystemState::initialize(&[2, 1], &[vec![1, 1], vec![2, 0]])
            .unwrap()
            .snapshot();
        let json = serde_json::to_string(&view).unwrap();
        let back: super::ReportView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
