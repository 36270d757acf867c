// src/chain.rs
//! Validated Continuous-Time Markov Chain Model
//!
//! [`ChainModel`] pairs an infinitesimal generator with an ordered sequence of
//! state labels and enforces the generator invariants exactly once, at
//! construction. Every solver in the crate consumes a `ChainModel` and can
//! therefore assume:
//!
//! - the generator is square with one label per row;
//! - every row sums to zero within a machine-precision tolerance scaled to
//!   the diagonal magnitude;
//! - every diagonal entry is non-positive (off-diagonal entries are the
//!   outgoing transition rates).
//!
//! A `ChainModel` is immutable after construction and `Sync`, so independent
//! solver invocations may read it concurrently.

use std::fmt;

use crate::error::{CtmcError, CtmcResult};
use crate::generator::build_generator;
use crate::process::DiffusionProcess;
use crate::sparse::SparseMatrix;

/// How many states/rows the `Display` impl prints before truncating.
const DISPLAY_LIMIT: usize = 10;

/// A continuous-time Markov chain: generator matrix plus state labels
///
/// Generic over the label type `T`; the solvers never inspect labels, they
/// exist for the caller (grid points for discretized diffusions, indices or
/// domain names otherwise).
#[derive(Debug, Clone)]
pub struct ChainModel<T = usize> {
    generator: SparseMatrix,
    states: Vec<T>,
}

impl<T> ChainModel<T> {
    /// Construct from an explicit generator and label sequence.
    ///
    /// # Errors
    ///
    /// - [`CtmcError::NotSquare`] when the generator is rectangular;
    /// - [`CtmcError::SizeMismatch`] when `states.len()` differs from the
    ///   generator dimension;
    /// - [`CtmcError::RowSumNonzero`] when a row sum exceeds
    ///   `nnz(row) · ε · max(|diag|, 1)` — rows with integer-valued entries
    ///   sum exactly in doubles, so they are effectively checked exactly;
    /// - [`CtmcError::PositiveDiagonal`] when a diagonal entry is positive or
    ///   NaN.
    pub fn new(generator: SparseMatrix, states: Vec<T>) -> CtmcResult<Self> {
        if !generator.is_square() {
            return Err(CtmcError::NotSquare {
                rows: generator.rows(),
                cols: generator.cols(),
            });
        }
        let n = generator.rows();
        if states.len() != n {
            return Err(CtmcError::SizeMismatch {
                states: states.len(),
                dimension: n,
            });
        }

        for i in 0..n {
            let diag = generator.get(i, i);
            let sum = generator.row_sum(i);
            let tolerance = generator.row_nnz(i).max(1) as f64 * f64::EPSILON * diag.abs().max(1.0);
            // Written with a negated comparison so NaN sums fail too.
            if !(sum.abs() <= tolerance) {
                return Err(CtmcError::RowSumNonzero {
                    row: i,
                    sum,
                    tolerance,
                });
            }
            if !(diag <= 0.0) {
                return Err(CtmcError::PositiveDiagonal { row: i, value: diag });
            }
        }

        Ok(ChainModel { generator, states })
    }

    /// Number of states
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// The validated generator matrix
    pub fn generator(&self) -> &SparseMatrix {
        &self.generator
    }

    /// The state labels, one per generator row
    pub fn states(&self) -> &[T] {
        &self.states
    }
}

impl ChainModel<usize> {
    /// Construct from a generator alone, labeling states by index `0..n`.
    pub fn from_generator(generator: SparseMatrix) -> CtmcResult<Self> {
        let n = generator.rows();
        ChainModel::new(generator, (0..n).collect())
    }
}

impl ChainModel<f64> {
    /// Construct by discretizing a diffusion on a strictly increasing grid.
    ///
    /// The grid points become the state labels. Grid shape problems are
    /// reported as [`CtmcError::InvalidGrid`]; non-finite drift or volatility
    /// values surface through the generator invariant checks.
    pub fn from_diffusion<P: DiffusionProcess + ?Sized>(
        process: &P,
        grid: &[f64],
    ) -> CtmcResult<Self> {
        if grid.len() < 2 {
            return Err(CtmcError::InvalidGrid {
                reason: format!("need at least 2 grid points, got {}", grid.len()),
            });
        }
        for w in grid.windows(2) {
            if !(w[0] < w[1]) {
                return Err(CtmcError::InvalidGrid {
                    reason: format!("grid must be strictly increasing, found {} then {}", w[0], w[1]),
                });
            }
        }

        let generator = build_generator(process, grid);
        ChainModel::new(generator, grid.to_vec())
    }
}

impl<T: fmt::Display> fmt::Display for ChainModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n_states();
        writeln!(f, "Continuous-time Markov chain with {} states", n)?;

        let shown = n.min(DISPLAY_LIMIT);
        write!(f, "states: [")?;
        for (i, s) in self.states.iter().take(shown).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        if n > shown {
            write!(f, ", ... {} more", n - shown)?;
        }
        writeln!(f, "]")?;

        writeln!(f, "generator (showing {} of {} rows):", shown, n)?;
        for i in 0..shown {
            write!(f, "  row {}:", i)?;
            for (k, (j, v)) in self.generator.row(i).enumerate() {
                if k == DISPLAY_LIMIT {
                    write!(f, " ...")?;
                    break;
                }
                write!(f, " ({}, {:.6})", j, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
