// src/process/mod.rs
//! Continuous-State Diffusion Processes
//!
//! A one-dimensional Itô diffusion `dX_t = μ(X_t) dt + σ(X_t) dW_t` is the
//! input to the generator builder: its drift and volatility are evaluated at
//! every grid point to form the upwind discretization.
//!
//! Any `(drift, volatility)` closure pair implements [`DiffusionProcess`]
//! directly, so ad-hoc processes need no named type:
//!
//! ```rust
//! use ctmc::process::DiffusionProcess;
//!
//! let process = (|x: f64| -0.5 * x, |_x: f64| 0.2);
//! assert_eq!(process.drift(2.0), -1.0);
//! assert_eq!(process.volatility(2.0), 0.2);
//! ```

pub mod gbm;
pub mod ou;

pub use gbm::GeometricBrownianMotion;
pub use ou::OrnsteinUhlenbeck;

/// Capability interface of a time-homogeneous scalar diffusion
pub trait DiffusionProcess {
    /// Drift coefficient μ(x)
    fn drift(&self, x: f64) -> f64;

    /// Volatility coefficient σ(x)
    fn volatility(&self, x: f64) -> f64;
}

impl<F, G> DiffusionProcess for (F, G)
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    fn drift(&self, x: f64) -> f64 {
        (self.0)(x)
    }

    fn volatility(&self, x: f64) -> f64 {
        (self.1)(x)
    }
}
