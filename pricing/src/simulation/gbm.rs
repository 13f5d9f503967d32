use rand_distr::StandardNormal;

/// Model params for the SDE
/// '''math
/// dS_t / S_t = mu dt + sigma dW_t
/// ''', where $dW_t ~ N(0, sqrt(dt))$
/// https://en.wikipedia.org/wiki/Geometric_Brownian_motion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricBrownianMotion {
    initial_value: f64,
    /// drift term
    mu: f64,
    /// volatility
    sigma: f64,
    /// change in time
    dt: f64,
}

impl GeometricBrownianMotion {
    pub fn new(initial_value: f64, drift: f64, vola: f64, dt: f64) -> Self {
        Self {
            initial_value,
            mu: drift,
            dt,
            sigma: vola,
        }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn base_distribution(&self) -> StandardNormal {
        StandardNormal
    }

    /// Exact solution over one step of length `dt`, driven by the standard normal `z`.
    #[inline]
    pub fn step_analytic(&self, st: f64, z: f64) -> f64 {
        let ret = self.dt * (self.mu - self.sigma.powi(2) / 2.0) + self.dt.sqrt() * self.sigma * z;
        st * ret.exp()
    }

    /// Value after a single step from the initial value.
    #[inline]
    pub fn terminal_value(&self, z: f64) -> f64 {
        self.step_analytic(self.initial_value, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn zero_shock_follows_the_drift() {
        let gbm = GeometricBrownianMotion::new(100.0, 0.05, 0.2, 1.0);
        // exp((mu - sigma^2 / 2) * T)
        assert_approx_eq!(gbm.terminal_value(0.0), 100.0 * 0.03_f64.exp(), 1e-12);
    }

    #[test]
    fn split_steps_compose() {
        let whole = GeometricBrownianMotion::new(50.0, 0.02, 0.25, 1.0);
        let half = GeometricBrownianMotion::new(50.0, 0.02, 0.25, 0.5);
        // two half steps with z / sqrt(2) each add up to one full step with z
        let z = 0.8;
        let mid = half.terminal_value(z / 2.0_f64.sqrt());
        let end = half.step_analytic(mid, z / 2.0_f64.sqrt());
        assert_approx_eq!(end, whole.terminal_value(z), 1e-10);
    }
}
