// src/process/gbm.rs
use super::DiffusionProcess;

/// Geometric Brownian motion: `dX = μX dt + σX dW`
pub struct GeometricBrownianMotion {
    pub mu: f64,
    pub sigma: f64,
}

impl GeometricBrownianMotion {
    pub fn new(mu: f64, sigma: f64) -> Self {
        GeometricBrownianMotion { mu, sigma }
    }
}

impl DiffusionProcess for GeometricBrownianMotion {
    fn drift(&self, x: f64) -> f64 {
        self.mu * x
    }

    fn volatility(&self, x: f64) -> f64 {
        self.sigma * x
    }
}
