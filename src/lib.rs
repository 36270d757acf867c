//! # ctmc: Continuous-Time Markov Chains
//!
//! A Rust library for modeling and analyzing continuous-time Markov chains
//! (CTMC) defined by an infinitesimal generator matrix, with a convenience
//! path that discretizes a scalar Itô diffusion onto a (possibly non-uniform)
//! grid.
//!
//! ## Key Features
//!
//! - **Validated models**: generator invariants (square, zero row sums,
//!   non-positive diagonal) are checked once at construction; an invalid
//!   chain never exists
//! - **Upwind discretization**: drift/volatility pairs become valid sparse
//!   tridiagonal generators on arbitrary strictly increasing grids
//! - **Robust stationary solve**: damped implicit-Euler fixed point with
//!   sparse linear solves, no dense null-space extraction
//! - **Trajectory sampling**: embedded jump chain via competing exponential
//!   clocks, with graceful handling of absorbing states
//! - **Parallel runs**: independent seeded RNG streams per sampling run
//!
//! ## Quick Start
//!
//! ```rust
//! use ctmc::{sample_trajectory_seeded, stationary_distribution, StationaryConfig};
//! use ctmc::{ChainModel, SparseMatrix};
//!
//! // Two-state chain flipping at rate 1 in each direction.
//! let generator = SparseMatrix::from_dense(&[
//!     vec![-1.0, 1.0],
//!     vec![1.0, -1.0],
//! ]);
//! let chain = ChainModel::from_generator(generator).expect("valid generator");
//!
//! let pi = stationary_distribution(&chain, &StationaryConfig::default()).unwrap();
//! assert!((pi[0] - 0.5).abs() < 1e-6);
//!
//! let trajectory = sample_trajectory_seeded(&chain, 0, 100, 42).unwrap();
//! assert_eq!(trajectory.times.len(), 101);
//! ```
//!
//! ## Mathematical Foundation
//!
//! The generator `Q` encodes instantaneous transition rates: `q[i][j]` for
//! `i ≠ j` is the rate from state i to j, each row sums to zero. The
//! stationary distribution solves `π·Q = 0`; trajectories alternate
//! exponential holding times with jumps of the embedded chain.

// Module declarations
pub mod chain;
pub mod error;
pub mod generator;
pub mod linalg;
pub mod output;
pub mod process;
pub mod rng;
pub mod sparse;
pub mod stationary;
pub mod trajectory;

// Re-export commonly used types for convenience
pub use chain::ChainModel;
pub use error::{CtmcError, CtmcResult};
pub use generator::build_generator;
pub use process::DiffusionProcess;
pub use sparse::SparseMatrix;
pub use stationary::{stationary_distribution, StationaryConfig};
pub use trajectory::{
    sample_trajectories, sample_trajectory, sample_trajectory_seeded, Trajectory,
};
