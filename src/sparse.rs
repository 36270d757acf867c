// src/sparse.rs
//! Compressed Sparse Row Matrix Storage
//!
//! Generators of large chains are overwhelmingly sparse (the diffusion
//! discretization produces a tridiagonal matrix regardless of grid size), so
//! the crate stores every generator in CSR form and never densifies it.
//!
//! # Layout
//!
//! ```text
//! row_ptr:  [0, 2, 5, ...]        row i occupies entries row_ptr[i]..row_ptr[i+1]
//! col_idx:  [0, 1, 0, 1, 2, ...]  column index per stored entry, sorted per row
//! values:   [q00, q01, ...]       entry value per stored entry
//! ```
//!
//! Exact zeros are structural and never stored; non-finite values (NaN, ±inf)
//! are stored so that downstream validation can reject them.

/// Square-or-rectangular sparse matrix in CSR format
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Build from dense row data. Every row must have the same length.
    pub fn from_dense(rows: &[Vec<f64>]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        for row in rows {
            assert!(
                row.len() == n_cols,
                "dense rows must all have the same length"
            );
        }

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    col_idx.push(j);
                    values.push(v);
                }
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrix {
            rows: n_rows,
            cols: n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Build from (row, col, value) triplets. Duplicate positions accumulate.
    pub fn from_triplets(rows: usize, cols: usize, entries: &[(usize, usize, f64)]) -> Self {
        let mut per_row: Vec<Vec<(usize, f64)>> = vec![Vec::new(); rows];
        for &(i, j, v) in entries {
            assert!(i < rows && j < cols, "triplet index out of bounds");
            per_row[i].push((j, v));
        }

        let mut row_ptr = Vec::with_capacity(rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);
        for row in &mut per_row {
            row.sort_by_key(|&(j, _)| j);
            let mut last: Option<usize> = None;
            for &(j, v) in row.iter() {
                if last == Some(j) {
                    // Accumulate duplicates in place.
                    let k = values.len() - 1;
                    values[k] += v;
                } else {
                    col_idx.push(j);
                    values.push(v);
                    last = Some(j);
                }
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrix {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Build a square tridiagonal matrix from its three bands.
    ///
    /// `sub` and `sup` must have length `diag.len() - 1`.
    pub fn tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64]) -> Self {
        let n = diag.len();
        assert!(n >= 1, "tridiagonal matrix needs at least one row");
        assert!(
            sub.len() == n - 1 && sup.len() == n - 1,
            "band lengths must be n-1, n, n-1"
        );

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::with_capacity(3 * n);
        let mut values = Vec::with_capacity(3 * n);
        row_ptr.push(0);
        for i in 0..n {
            if i > 0 && sub[i - 1] != 0.0 {
                col_idx.push(i - 1);
                values.push(sub[i - 1]);
            }
            if diag[i] != 0.0 {
                col_idx.push(i);
                values.push(diag[i]);
            }
            if i + 1 < n && sup[i] != 0.0 {
                col_idx.push(i + 1);
                values.push(sup[i]);
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrix {
            rows: n,
            cols: n,
            row_ptr,
            col_idx,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of stored (non-structural-zero) entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored entries of row `i` as (column, value) pairs
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    /// Entry at (i, j); structural zeros read as 0.0
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.row(i)
            .find(|&(col, _)| col == j)
            .map_or(0.0, |(_, v)| v)
    }

    /// Number of stored entries in row `i`
    pub fn row_nnz(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Sum of the stored entries in row `i`
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).map(|(_, v)| v).sum()
    }

    /// Diagonal as a dense vector
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// True when every stored entry lies within one of the main diagonal
    pub fn is_tridiagonal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.rows).all(|i| {
            self.row(i)
                .all(|(j, _)| i.abs_diff(j) <= 1)
        })
    }

    /// Extract the three bands of a tridiagonal matrix, or `None` when any
    /// stored entry falls outside the band.
    pub fn bands(&self) -> Option<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        if !self.is_tridiagonal() {
            return None;
        }
        let n = self.rows;
        let mut sub = vec![0.0; n.saturating_sub(1)];
        let mut diag = vec![0.0; n];
        let mut sup = vec![0.0; n.saturating_sub(1)];
        for i in 0..n {
            for (j, v) in self.row(i) {
                if j + 1 == i {
                    sub[j] = v;
                } else if j == i {
                    diag[i] = v;
                } else {
                    sup[i] = v;
                }
            }
        }
        Some((sub, diag, sup))
    }

    /// y = Aᵗ·x, computed by scattering rows (no explicit transpose is formed)
    pub fn transpose_apply(&self, x: &[f64], y: &mut [f64]) {
        assert!(x.len() == self.rows && y.len() == self.cols);
        y.fill(0.0);
        for i in 0..self.rows {
            let xi = x[i];
            if xi == 0.0 {
                continue;
            }
            for (j, v) in self.row(i) {
                y[j] += v * xi;
            }
        }
    }
}
