use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use rand_hc::Hc128Rng;

/// Streaming mean and variance (Welford), so no sample has to be stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.mean)
    }

    /// Unbiased sample variance; needs at least two samples.
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some(self.m2 / (self.count - 1) as f64)
    }

    pub fn std_error(&self) -> Option<f64> {
        self.variance()
            .map(|variance| (variance / self.count as f64).sqrt())
    }
}

pub struct MonteCarloSimulator {
    pub nr_paths: usize,
}

impl MonteCarloSimulator {
    pub fn new(nr_paths: usize) -> Self {
        Self { nr_paths }
    }

    /// A fresh generator per call; the same seed always replays the same stream.
    pub fn generator(seed_nr: u64) -> Hc128Rng {
        rand_hc::Hc128Rng::seed_from_u64(seed_nr)
    }

    /// Draws `nr_paths` samples of `distr` and accumulates `sample_fn` of each.
    pub fn simulate_with<D>(
        &self,
        seed_nr: u64,
        distr: D,
        sample_fn: impl Fn(f64) -> f64,
    ) -> RunningStats
    where
        D: Distribution<f64>,
    {
        let generator = Self::generator(seed_nr);
        let mut stats = RunningStats::default();

        for z in generator.sample_iter(distr).take(self.nr_paths) {
            stats.push(sample_fn(z));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::gbm::GeometricBrownianMotion;
    use assert_approx_eq::assert_approx_eq;
    use rand_distr::{Normal, StandardNormal};

    /// NOTE: the tolerance will depend on the number of samples paths and the volatility
    const TOLERANCE: f64 = 1e-1;

    #[test]
    fn running_stats() {
        let mut stats = RunningStats::default();
        assert_eq!(stats.average(), None);
        assert_eq!(stats.std_error(), None);

        for value in [1.0, 2.0, 3.0, 4.0] {
            stats.push(value);
        }
        assert_eq!(stats.count(), 4);
        assert_approx_eq!(stats.average().unwrap(), 2.5, 1e-15);
        assert_approx_eq!(stats.variance().unwrap(), 5.0 / 3.0, 1e-15);
        assert_approx_eq!(stats.std_error().unwrap(), (5.0 / 12.0_f64).sqrt(), 1e-15);
    }

    #[test]
    fn normal_average() {
        let mc_simulator = MonteCarloSimulator::new(50_000);
        let stats = mc_simulator.simulate_with(41, Normal::new(0.5, 0.3).unwrap(), |z| z);
        assert_eq!(stats.count(), 50_000);
        assert_approx_eq!(stats.average().unwrap(), 0.5, 1e-2);
        assert_approx_eq!(stats.variance().unwrap(), 0.09, 1e-2);
    }

    #[test]
    fn same_seed_same_stream() {
        let mc_simulator = MonteCarloSimulator::new(1_000);
        let first = mc_simulator.simulate_with(7, StandardNormal, |z| z * z);
        let second = mc_simulator.simulate_with(7, StandardNormal, |z| z * z);
        let other = mc_simulator.simulate_with(8, StandardNormal, |z| z * z);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn stock_price_simulation() {
        let drift = -0.2;
        let vola = 0.4;
        let s0 = 100.0;
        let tte = 5.0;

        let stock_gbm = GeometricBrownianMotion::new(s0, drift, vola, tte);
        let mc_simulator = MonteCarloSimulator::new(100_000);
        let stats = mc_simulator.simulate_with(13241113, stock_gbm.base_distribution(), |z| {
            (stock_gbm.terminal_value(z) / s0).ln()
        });

        // expected value should equal analytic solution
        let exp_delta = tte * (drift - vola.powi(2) / 2.0);
        assert_approx_eq!(stats.average().unwrap(), exp_delta, TOLERANCE);
    }
}
