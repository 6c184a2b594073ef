// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cumulative engine counters for diagnostics.

use crate::{Outcome, Rejection};

/// Counts of every command the engine has handled and how it ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct EngineStats {
    /// Total request commands.
    pub requests: u64,
    /// Requests granted (including all-zero requests).
    pub grants: u64,
    /// Requests rolled back because the resulting state was unsafe.
    pub unsafe_denials: u64,
    /// Requests refused by a precondition (customer, amounts, need, available).
    pub request_rejections: u64,
    /// Total release commands.
    pub releases: u64,
    /// Releases refused by a precondition.
    pub release_rejections: u64,
    /// Number of times the safety checker ran.
    pub safety_checks: u64,
}

impl EngineStats {
    /// Fraction of requests that were granted, in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` if no requests have been made.
    pub fn grant_ratio(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.grants as f64 / self.requests as f64
    }

    pub(crate) fn record_request(&mut self, result: &Result<Outcome, Rejection>) {
        self.requests += 1;
        match result {
            Ok(_) => self.grants += 1,
            Err(Rejection::DeniedUnsafe { .. }) => self.unsafe_denials += 1,
            Err(_) => self.request_rejections += 1,
        }
    }

    pub(crate) fn record_release(&mut self, result: &Result<Outcome, Rejection>) {
        self.releases += 1;
        if result.is_err() {
            self.release_rejections += 1;
        }
    }

    pub(crate) fn record_safety_check(&mut self) {
        self.safety_checks += 1;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Requests: {} total ({} granted, {} unsafe, {} rejected, {:.0}% grant rate), \
             releases: {} total ({} rejected), {} safety checks",
            self.requests,
            self.grants,
            self.unsafe_denials,
            self.request_rejections,
            self.grant_ratio() * 100.0,
            self.releases,
            self.release_rejections,
            self.safety_checks,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = EngineStats::default();
        assert_eq!(s.requests, 0);
        assert_eq!(s.grant_ratio(), 0.0);
    }

    #[test]
    fn test_record_request() {
        let mut s = EngineStats::default();
        s.record_request(&Ok(Outcome::Granted));
        s.record_request(&Err(Rejection::DeniedUnsafe { customer: 0 }));
        s.record_request(&Err(Rejection::UnknownCustomer {
            customer: 9,
            customers: 2,
        }));
        assert_eq!(s.requests, 3);
        assert_eq!(s.grants, 1);
        assert_eq!(s.unsafe_denials, 1);
        assert_eq!(s.request_rejections, 1);
        assert!((s.grant_ratio() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_release() {
        let mut s = EngineStats::default();
        s.record_release(&Ok(Outcome::Released));
        s.record_release(&Err(Rejection::ExceedsAllocation {
            customer: 0,
            resource: 0,
            requested: 2,
            allocated: 1,
        }));
        assert_eq!(s.releases, 2);
        assert_eq!(s.release_rejections, 1);
    }

    #[test]
    fn test_summary() {
        let mut s = EngineStats::default();
        s.record_request(&Ok(Outcome::Granted));
        s.record_safety_check();
        let summary = s.summary();
        assert!(summary.contains("1 total"));
        assert!(summary.contains("1 granted"));
        assert!(summary.contains("1 safety checks"));
    }
}
