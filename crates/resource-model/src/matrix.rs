// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A dense, row-major `customers × resources` matrix of quantities.
//!
//! Rows are customers and columns are resource types. The matrix is sized
//! exactly once and never grows, so row slices can be handed out directly
//! without bounds surprises.

use crate::StateError;

/// A fixed-size `rows × cols` matrix of non-negative quantities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceMatrix {
    rows: usize,
    cols: usize,
    /// Row-major storage, `rows * cols` entries.
    data: Vec<u64>,
}

impl ResourceMatrix {
    /// Creates a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Builds a matrix from signed input rows, rejecting negative entries
    /// and rows whose length is not `cols`.
    ///
    /// `what` names the table in error messages (e.g. `"maximum demand"`).
    pub fn from_signed_rows(rows: &[Vec<i64>], cols: usize, what: &str) -> Result<Self, StateError> {
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(StateError::Dimension {
                    what: format!("{what} row {i}"),
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                data.push(to_quantity(value, || format!("{what}[{i}][{j}]"))?);
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows (customers).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (resource types).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `i`.
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[u64] {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns row `i`, or `None` if out of range.
    pub fn get_row(&self, i: usize) -> Option<&[u64]> {
        (i < self.rows).then(|| self.row(i))
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [u64] {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns the entry at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.row(i)[j]
    }

    /// Iterates over rows in index order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Sum of column `j` across all rows, or `None` if it overflows `u64`.
    pub fn column_sum(&self, j: usize) -> Option<u64> {
        self.iter_rows().try_fold(0u64, |acc, row| acc.checked_add(row[j]))
    }

    /// Copies the matrix out as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.iter_rows().map(<[u64]>::to_vec).collect()
    }
}

/// Converts a signed input quantity, reporting negatives as
/// [`StateError::InvalidValue`].
pub(crate) fn to_quantity(
    value: i64,
    location: impl FnOnce() -> String,
) -> Result<u64, StateError> {
    u64::try_from(value).map_err(|_| StateError::InvalidValue {
        location: location(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = ResourceMatrix::zeros(2, 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert!(m.iter_rows().all(|r| r == [0, 0, 0]));
    }

    #[test]
    fn test_from_signed_rows() {
        let m = ResourceMatrix::from_signed_rows(&[vec![1, 2], vec![3, 4]], 2, "t").unwrap();
        assert_eq!(m.row(1), &[3, 4]);
        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.column_sum(0), Some(4));
        assert_eq!(m.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_from_signed_rows_ragged() {
        let err = ResourceMatrix::from_signed_rows(&[vec![1, 2], vec![3]], 2, "maximum").unwrap_err();
        assert_eq!(
            err,
            StateError::Dimension {
                what: "maximum row 1".into(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_from_signed_rows_negative() {
        let err = ResourceMatrix::from_signed_rows(&[vec![1, -2]], 2, "maximum").unwrap_err();
        assert!(matches!(err, StateError::InvalidValue { value: -2, .. }));
        assert!(err.to_string().contains("maximum[0][1]"));
    }

    #[test]
    fn test_zero_columns() {
        let m = ResourceMatrix::from_signed_rows(&[vec![], vec![]], 0, "t").unwrap();
        assert_eq!(m.rows(), 2);
        assert!(m.row(1).is_empty());
    }

    #[test]
    fn test_get_row_out_of_range() {
        let m = ResourceMatrix::zeros(2, 2);
        assert!(m.get_row(1).is_some());
        assert!(m.get_row(2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_panics_out_of_range() {
        ResourceMatrix::zeros(1, 1).row(1);
    }

    #[test]
    fn test_column_sum_overflow() {
        let rows = vec![vec![i64::MAX, 1]; 3];
        let m = ResourceMatrix::from_signed_rows(&rows, 2, "t").unwrap();
        assert_eq!(m.column_sum(0), None);
        assert_eq!(m.column_sum(1), Some(3));
    }
}
