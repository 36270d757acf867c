// src/error.rs
use std::fmt;

/// Custom error types for the ctmc library
#[derive(Debug, Clone)]
pub enum CtmcError {
    /// Generator matrix is not square
    NotSquare { rows: usize, cols: usize },

    /// A generator row sums away from zero beyond tolerance
    RowSumNonzero { row: usize, sum: f64, tolerance: f64 },

    /// A diagonal entry of the generator is positive (or NaN)
    PositiveDiagonal { row: usize, value: f64 },

    /// State-label count does not match the generator dimension
    SizeMismatch { states: usize, dimension: usize },

    /// Discretization grid is too short or not strictly increasing
    InvalidGrid { reason: String },

    /// Implicit fixed-point iteration exhausted its iteration cap
    NonConvergence {
        iterations: usize,
        residual: f64,
        tolerance: f64,
    },

    /// Inner sparse linear solve failed to reach its tolerance
    LinearSolveFailure { iterations: usize, residual: f64 },

    /// Trajectory starting index outside the state space
    StartIndexOutOfRange { index: usize, states: usize },

    /// Invalid solver or sampler parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },
}

impl fmt::Display for CtmcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtmcError::NotSquare { rows, cols } => {
                write!(f, "Generator matrix is not square: {}x{}", rows, cols)
            }
            CtmcError::RowSumNonzero {
                row,
                sum,
                tolerance,
            } => {
                write!(
                    f,
                    "Generator row {} sums to {:e} (tolerance {:e}); rows of an infinitesimal generator must sum to zero",
                    row, sum, tolerance
                )
            }
            CtmcError::PositiveDiagonal { row, value } => {
                write!(
                    f,
                    "Generator diagonal entry at row {} is {} but must be non-positive",
                    row, value
                )
            }
            CtmcError::SizeMismatch { states, dimension } => {
                write!(
                    f,
                    "State label count ({}) does not match generator dimension ({})",
                    states, dimension
                )
            }
            CtmcError::InvalidGrid { reason } => {
                write!(f, "Invalid discretization grid: {}", reason)
            }
            CtmcError::NonConvergence {
                iterations,
                residual,
                tolerance,
            } => {
                write!(
                    f,
                    "Stationary solver did not converge after {} iterations: residual {:e} > tolerance {:e}",
                    iterations, residual, tolerance
                )
            }
            CtmcError::LinearSolveFailure {
                iterations,
                residual,
            } => {
                write!(
                    f,
                    "Sparse linear solve failed after {} iterations (residual {:e})",
                    iterations, residual
                )
            }
            CtmcError::StartIndexOutOfRange { index, states } => {
                write!(
                    f,
                    "Starting state index {} is out of range for a chain with {} states",
                    index, states
                )
            }
            CtmcError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
        }
    }
}

impl std::error::Error for CtmcError {}

/// Result type alias for ctmc operations
pub type CtmcResult<T> = Result<T, CtmcError>;

/// Validation utilities
pub mod validation {
    use super::{CtmcError, CtmcResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> CtmcResult<()> {
        if value <= 0.0 {
            Err(CtmcError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> CtmcResult<()> {
        if !value.is_finite() {
            Err(CtmcError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
