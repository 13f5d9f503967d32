use ndarray::Array1;

use crate::analytic::ApproxStochasticVol;
use crate::error::{ensure_count, ensure_finite, ensure_positive, PricingResult};
use crate::pricer::Model;
use crate::simulation::MonteCarloEuropean;
use crate::sweep::SeedPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evenly spaced grid `start..=end` with `points` samples.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpec {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl GridSpec {
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.end, self.points)
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("grid.start", self.start)?;
        ensure_positive("grid.end", self.end)?;
        ensure_count("grid.points", self.points)
    }
}

/// The grids of the per-model views.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepGrid {
    /// the time grid runs from here up to the contract's own maturity
    pub time_start: f64,
    pub time_points: usize,
    pub vola: GridSpec,
    pub vol_of_vol: GridSpec,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            time_start: 0.01,
            time_points: 100,
            vola: GridSpec::new(0.01, 1.0, 50),
            vol_of_vol: GridSpec::new(0.01, 1.0, 50),
        }
    }
}

impl SweepGrid {
    pub fn time_grid(&self, time_to_expiration: f64) -> Array1<f64> {
        Array1::linspace(self.time_start, time_to_expiration, self.time_points)
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("grid.time_start", self.time_start)?;
        ensure_count("grid.time_points", self.time_points)?;
        self.vola.validate()?;
        self.vol_of_vol.validate()
    }
}

/// Model settings and grid of the cross-model comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComparisonConfig {
    pub binomial_steps: usize,
    pub mc_paths: usize,
    pub mc_seed: u64,
    pub mc_antithetic: bool,
    /// speed of mean reversion handed to the stochastic-volatility model
    pub sv_kappa: f64,
    /// long-run variance; the only stochastic-volatility input that moves its price
    pub sv_theta: f64,
    pub sv_rho: f64,
    pub seed_policy: SeedPolicy,
    pub vola_grid: GridSpec,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            binomial_steps: 100,
            mc_paths: 10_000,
            mc_seed: 42,
            mc_antithetic: false,
            sv_kappa: 2.0,
            sv_theta: 0.04,
            sv_rho: -0.7,
            seed_policy: SeedPolicy::Fixed,
            vola_grid: GridSpec::new(0.01, 1.0, 50),
        }
    }
}

impl ComparisonConfig {
    pub fn validate(&self) -> PricingResult<()> {
        ensure_count("binomial_steps", self.binomial_steps)?;
        ensure_count("mc_paths", self.mc_paths)?;
        ensure_finite("sv_kappa", self.sv_kappa)?;
        ensure_positive("sv_theta", self.sv_theta)?;
        self.vola_grid.validate()
    }

    /// The five models in table order. The stochastic-volatility model takes its
    /// vol-of-vol and initial variance from the market volatility.
    pub fn models(&self) -> [Model; 5] {
        let mut mc = MonteCarloEuropean::new(self.mc_paths, self.mc_seed);
        if self.mc_antithetic {
            mc = mc.with_antithetic();
        }
        [
            Model::black_scholes(),
            Model::binomial(self.binomial_steps),
            mc.into(),
            ApproxStochasticVol::coupled(self.sv_kappa, self.sv_theta, self.sv_rho).into(),
            Model::bachelier(),
        ]
    }
}
