// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal compressed-sparse-row matrix.
//!
//! Interpolation operators have one row per data point with at most 36
//! occupied columns out of potentially millions, and in realistic datasets
//! the row count exceeds the occupied column count, so CSR is the right
//! compressed layout.

use ndarray::Array1;

#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    num_cols: usize,
    /// `row_ptr[r]..row_ptr[r + 1]` spans row `r` in `col_indices` and
    /// `values`.
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Finalise a matrix from per-row (column, value) lists. Columns must be
    /// in range; values may appear in any order within a row.
    pub(crate) fn from_rows(num_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> CsrMatrix {
        let num_non_zero = rows.iter().map(Vec::len).sum();
        let mut row_ptr = Vec::with_capacity(rows.len() + 1);
        let mut col_indices = Vec::with_capacity(num_non_zero);
        let mut values = Vec::with_capacity(num_non_zero);
        row_ptr.push(0);
        for row in rows {
            for (col, value) in row {
                debug_assert!(col < num_cols);
                col_indices.push(col);
                values.push(value);
            }
            row_ptr.push(col_indices.len());
        }

        CsrMatrix {
            num_cols,
            row_ptr,
            col_indices,
            values,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn num_non_zero(&self) -> usize {
        self.values.len()
    }

    /// The (column, value) pairs of row `r`.
    pub fn row(&self, r: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[r]..self.row_ptr[r + 1];
        self.col_indices[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    /// Sparse matrix-vector product against a dense vector of length
    /// [`CsrMatrix::num_cols`].
    pub fn dot(&self, x: &[f64]) -> Array1<f64> {
        assert_eq!(x.len(), self.num_cols);
        Array1::from_iter(
            (0..self.num_rows()).map(|r| self.row(r).map(|(col, value)| value * x[col]).sum()),
        )
    }
}
