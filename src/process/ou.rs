// src/process/ou.rs
use super::DiffusionProcess;

/// Ornstein-Uhlenbeck process: `dX = θ(μ - X) dt + σ dW`
///
/// Mean-reverting with Gaussian stationary law N(μ, σ²/2θ), which makes it a
/// convenient reference model for validating stationary distributions of
/// discretized chains.
pub struct OrnsteinUhlenbeck {
    pub theta: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl OrnsteinUhlenbeck {
    pub fn new(theta: f64, mu: f64, sigma: f64) -> Self {
        OrnsteinUhlenbeck { theta, mu, sigma }
    }

    /// Variance of the stationary Gaussian law, σ²/2θ
    pub fn stationary_variance(&self) -> f64 {
        self.sigma * self.sigma / (2.0 * self.theta)
    }
}

impl DiffusionProcess for OrnsteinUhlenbeck {
    fn drift(&self, x: f64) -> f64 {
        self.theta * (self.mu - x)
    }

    fn volatility(&self, _x: f64) -> f64 {
        self.sigma
    }
}
