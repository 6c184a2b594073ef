// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The four Banker's-algorithm structures and their invariants.
//!
//! ```text
//!  available[j] + Σ_i allocation[i][j] == total_supply[j]
//!  need[i][j]   == maximum[i][j] - allocation[i][j]
//!  0 <= allocation[i][j] <= maximum[i][j]
//! ```
//!
//! Quantities are stored unsigned, so non-negativity holds by construction.
//! Signed values only appear at the input boundary, where negatives are
//! rejected with [`StateError::InvalidValue`].

use crate::matrix::to_quantity;
use crate::{CustomerRow, Dimensions, ReportView, ResourceMatrix, StateError};

/// Available, maximum, allocation and need for a fixed set of customers.
///
/// # Example
/// ```
/// use resource_model::SystemState;
///
/// let state = SystemState::initialize(&[10, 5, 7], &[vec![7, 5, 3], vec![3, 2, 2]]).unwrap();
/// assert_eq!(state.num_customers(), 2);
/// assert_eq!(state.need(0), &[7, 5, 3]);
/// assert_eq!(state.allocation(1), &[0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SystemState {
    dims: Dimensions,
    /// Constant per-resource total, fixed at initialization.
    total_supply: Vec<u64>,
    available: Vec<u64>,
    maximum: ResourceMatrix,
    allocation: ResourceMatrix,
    need: ResourceMatrix,
}

impl SystemState {
    /// Builds the initial state from the available vector and the
    /// per-customer maximum-demand table (row `i` is customer `i`).
    ///
    /// Allocation starts at zero, so `need == maximum` and
    /// `total_supply == available`.
    pub fn initialize(available: &[i64], max_demand: &[Vec<i64>]) -> Result<Self, StateError> {
        let resources = available.len();
        let available = available
            .iter()
            .enumerate()
            .map(|(j, &v)| to_quantity(v, || format!("available[{j}]")))
            .collect::<Result<Vec<_>, _>>()?;
        let maximum = ResourceMatrix::from_signed_rows(max_demand, resources, "maximum demand")?;
        let dims = Dimensions::new(maximum.rows(), resources);

        Ok(Self {
            dims,
            total_supply: available.clone(),
            available,
            allocation: ResourceMatrix::zeros(dims.customers, resources),
            need: maximum.clone(),
            maximum,
        })
    }

    /// Like [`initialize`](Self::initialize), but also requires the table to
    /// describe exactly `customers` customers.
    pub fn initialize_for(
        customers: usize,
        available: &[i64],
        max_demand: &[Vec<i64>],
    ) -> Result<Self, StateError> {
        if max_demand.len() != customers {
            return Err(StateError::Dimension {
                what: "maximum demand rows".into(),
                expected: customers,
                actual: max_demand.len(),
            });
        }
        Self::initialize(available, max_demand)
    }

    /// Restores a state with customers already holding resources.
    ///
    /// `available` is derived as `total_supply - Σ allocation`. Fails if an
    /// allocation exceeds its maximum or a column over-commits the supply.
    pub fn from_parts(
        total_supply: &[i64],
        maximum: &[Vec<i64>],
        allocation: &[Vec<i64>],
    ) -> Result<Self, StateError> {
        let mut state = Self::initialize(total_supply, maximum)?;
        if allocation.len() != state.dims.customers {
            return Err(StateError::Dimension {
                what: "allocation rows".into(),
                expected: state.dims.customers,
                actual: allocation.len(),
            });
        }
        let allocation =
            ResourceMatrix::from_signed_rows(allocation, state.dims.resources, "allocation")?;

        for i in 0..state.dims.customers {
            for j in 0..state.dims.resources {
                let (held, max) = (allocation.get(i, j), state.maximum.get(i, j));
                if held > max {
                    return Err(StateError::AllocationExceedsMaximum {
                        customer: i,
                        resource: j,
                        allocated: held,
                        maximum: max,
                    });
                }
                state.need.row_mut(i)[j] = max - held;
            }
        }

        for j in 0..state.dims.resources {
            let total = state.total_supply[j];
            let held = allocation.column_sum(j);
            state.available[j] = held
                .and_then(|held| total.checked_sub(held))
                .ok_or(StateError::OverCommitted {
                    resource: j,
                    allocated: held.unwrap_or(u64::MAX),
                    total,
                })?;
        }

        state.allocation = allocation;
        Ok(state)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn num_customers(&self) -> usize {
        self.dims.customers
    }

    pub fn num_resources(&self) -> usize {
        self.dims.resources
    }

    pub fn contains_customer(&self, customer: usize) -> bool {
        self.dims.contains_customer(customer)
    }

    /// Resources not currently held by any customer.
    pub fn available(&self) -> &[u64] {
        &self.available
    }

    /// Constant total of each resource type.
    pub fn total_supply(&self) -> &[u64] {
        &self.total_supply
    }

    /// Declared maximum of `customer`.
    ///
    /// # Panics
    /// Panics if `customer` is out of range. The same holds for
    /// [`allocation`](Self::allocation) and [`need`](Self::need).
    pub fn maximum(&self, customer: usize) -> &[u64] {
        self.maximum.row(customer)
    }

    pub fn allocation(&self, customer: usize) -> &[u64] {
        self.allocation.row(customer)
    }

    pub fn need(&self, customer: usize) -> &[u64] {
        self.need.row(customer)
    }

    pub fn maximum_matrix(&self) -> &ResourceMatrix {
        &self.maximum
    }

    pub fn allocation_matrix(&self) -> &ResourceMatrix {
        &self.allocation
    }

    pub fn need_matrix(&self) -> &ResourceMatrix {
        &self.need
    }

    /// Moves `amounts` from the pool to `customer`:
    /// `available -= amounts`, `allocation += amounts`, `need -= amounts`.
    ///
    /// Checks every component before touching anything, so on error the
    /// state is unchanged. Callers are expected to have validated the
    /// request already; an error here indicates a caller bug.
    pub fn apply_allocation(&mut self, customer: usize, amounts: &[u64]) -> Result<(), StateError> {
        self.check_transfer_shape(customer, amounts)?;
        let need = self.need.row(customer);
        for (j, &amount) in amounts.iter().enumerate() {
            if amount > need[j] || amount > self.available[j] {
                return Err(StateError::InvariantViolation(format!(
                    "allocating {amount} of resource {j} to customer {customer} \
                     (need {}, available {})",
                    need[j], self.available[j],
                )));
            }
        }

        for (j, &amount) in amounts.iter().enumerate() {
            self.available[j] -= amount;
            self.allocation.row_mut(customer)[j] += amount;
            self.need.row_mut(customer)[j] -= amount;
        }
        Ok(())
    }

    /// Returns `amounts` from `customer` to the pool:
    /// `available += amounts`, `allocation -= amounts`, `need += amounts`.
    ///
    /// Checks every component before touching anything.
    pub fn apply_release(&mut self, customer: usize, amounts: &[u64]) -> Result<(), StateError> {
        self.check_transfer_shape(customer, amounts)?;
        let held = self.allocation.row(customer);
        for (j, &amount) in amounts.iter().enumerate() {
            if amount > held[j] {
                return Err(StateError::InvariantViolation(format!(
                    "releasing {amount} of resource {j} from customer {customer} holding {}",
                    held[j],
                )));
            }
        }

        for (j, &amount) in amounts.iter().enumerate() {
            self.available[j] += amount;
            self.allocation.row_mut(customer)[j] -= amount;
            self.need.row_mut(customer)[j] += amount;
        }
        Ok(())
    }

    fn check_transfer_shape(&self, customer: usize, amounts: &[u64]) -> Result<(), StateError> {
        if !self.contains_customer(customer) {
            return Err(StateError::Dimension {
                what: "customer index".into(),
                expected: self.dims.customers,
                actual: customer,
            });
        }
        if amounts.len() != self.dims.resources {
            return Err(StateError::Dimension {
                what: "amount vector".into(),
                expected: self.dims.resources,
                actual: amounts.len(),
            });
        }
        Ok(())
    }

    /// Verifies all state invariants.
    ///
    /// # Checks
    /// - `allocation[i][j] <= maximum[i][j]`
    /// - `need[i][j] == maximum[i][j] - allocation[i][j]`
    /// - `available[j] + Σ_i allocation[i][j] == total_supply[j]`
    pub fn check_invariants(&self) -> Result<(), StateError> {
        for i in 0..self.dims.customers {
            for j in 0..self.dims.resources {
                let (max, held, need) = (
                    self.maximum.get(i, j),
                    self.allocation.get(i, j),
                    self.need.get(i, j),
                );
                if held > max {
                    return Err(StateError::InvariantViolation(format!(
                        "allocation[{i}][{j}] = {held} exceeds maximum {max}"
                    )));
                }
                if need != max - held {
                    return Err(StateError::InvariantViolation(format!(
                        "need[{i}][{j}] = {need}, expected {}",
                        max - held
                    )));
                }
            }
        }

        for j in 0..self.dims.resources {
            let accounted = self
                .allocation
                .column_sum(j)
                .and_then(|held| held.checked_add(self.available[j]));
            if accounted != Some(self.total_supply[j]) {
                return Err(StateError::InvariantViolation(format!(
                    "resource {j}: available + allocated = {}, total supply {}",
                    accounted.map_or_else(|| "overflow".to_string(), |a| a.to_string()),
                    self.total_supply[j]
                )));
            }
        }
        Ok(())
    }

    /// Read-only projection of the state for reporting.
    pub fn snapshot(&self) -> ReportView {
        ReportView {
            dimensions: self.dims,
            available: self.available.clone(),
            total_supply: self.total_supply.clone(),
            customers: (0..self.dims.customers)
                .map(|i| CustomerRow {
                    customer: i,
                    maximum: self.maximum(i).to_vec(),
                    allocation: self.allocation(i).to_vec(),
                    need: self.need(i).to_vec(),
                })
                .collect(),
        }
    }
}
