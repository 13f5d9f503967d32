use ndarray::Array1;
use tracing::{debug, instrument};

use crate::common::models::{MarketParameters, ModelId, OptionContract};
use crate::error::PricingResult;
use crate::pricer::{Model, OptionPricer};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SweepDimension {
    TimeToMaturity,
    Volatility,
    /// only the stochastic-volatility model reads it; the others see constant inputs
    VolOfVol,
}

/// How Monte Carlo seeds are assigned across the samples of one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeedPolicy {
    /// every sample replays the model's own seed, so all samples share their normal draws
    #[default]
    Fixed,
    /// sample `i` uses `seed + i`
    PerSample,
}

impl SeedPolicy {
    fn seed_for(&self, base_seed: u64, index: usize) -> u64 {
        match self {
            SeedPolicy::Fixed => base_seed,
            SeedPolicy::PerSample => base_seed.wrapping_add(index as u64),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepSpec {
    pub dimension: SweepDimension,
    pub samples: Array1<f64>,
    pub seed_policy: SeedPolicy,
}

impl SweepSpec {
    pub fn new(dimension: SweepDimension, samples: Array1<f64>) -> Self {
        Self {
            dimension,
            samples,
            seed_policy: SeedPolicy::Fixed,
        }
    }

    pub fn with_seed_policy(self, seed_policy: SeedPolicy) -> Self {
        Self {
            seed_policy,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepSeries {
    pub model: ModelId,
    /// aligned index-for-index with [`SweepResult::samples`]
    pub prices: Array1<f64>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepResult {
    pub dimension: SweepDimension,
    pub samples: Array1<f64>,
    /// one series per model, in the order the models were given
    pub series: Vec<SweepSeries>,
}

impl SweepResult {
    /// First series produced by `model`.
    pub fn prices(&self, model: ModelId) -> Option<&Array1<f64>> {
        self.series
            .iter()
            .find(|series| series.model == model)
            .map(|series| &series.prices)
    }
}

/// Prices a fixed contract and market over a grid of one input, for any set of models.
///
/// Every sample is an independent pricer call on the base inputs with the swept input
/// replaced; nothing is cached between samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepEngine {
    pub contract: OptionContract,
    pub market: MarketParameters,
}

impl SweepEngine {
    /// Fails if the base contract or the rate is invalid. The volatility is checked per sample
    /// by the pricers that read it.
    pub fn new(contract: OptionContract, market: MarketParameters) -> PricingResult<Self> {
        contract.validate()?;
        market.validate_rate()?;
        Ok(Self { contract, market })
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(dimension = ?spec.dimension, samples = spec.samples.len(), models = models.len())
    )]
    pub fn sweep(&self, spec: &SweepSpec, models: &[Model]) -> PricingResult<SweepResult> {
        let series = models
            .iter()
            .map(|model| {
                Ok(SweepSeries {
                    model: model.model(),
                    prices: self.sweep_model(spec, model)?,
                })
            })
            .collect::<PricingResult<Vec<_>>>()?;

        debug!(kind = ?self.contract.kind, "sweep finished");
        Ok(SweepResult {
            dimension: spec.dimension,
            samples: spec.samples.clone(),
            series,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn sweep_model(&self, spec: &SweepSpec, model: &Model) -> PricingResult<Array1<f64>> {
        let prices = spec
            .samples
            .iter()
            .enumerate()
            .map(|(index, value)| self.price_sample(spec, model, index, *value))
            .collect::<PricingResult<Vec<f64>>>()?;
        Ok(Array1::from(prices))
    }

    #[cfg(feature = "parallel")]
    fn sweep_model(&self, spec: &SweepSpec, model: &Model) -> PricingResult<Array1<f64>> {
        let samples = spec.samples.to_vec();
        let prices = samples
            .into_par_iter()
            .enumerate()
            .map(|(index, value)| self.price_sample(spec, model, index, value))
            .collect::<PricingResult<Vec<f64>>>()?;
        Ok(Array1::from(prices))
    }

    fn price_sample(
        &self,
        spec: &SweepSpec,
        model: &Model,
        index: usize,
        value: f64,
    ) -> PricingResult<f64> {
        let mut contract = self.contract;
        let mut market = self.market;
        let mut model = *model;

        match spec.dimension {
            SweepDimension::TimeToMaturity => contract = contract.with_time_to_expiration(value),
            SweepDimension::Volatility => market = market.with_vola(value),
            SweepDimension::VolOfVol => model = model.with_vol_of_vol(value),
        }
        if let Some(seed_nr) = model.seed_nr() {
            model = model.with_seed(spec.seed_policy.seed_for(seed_nr, index));
        }

        model.price(&contract, &market).map(|result| result.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::{ApproxStochasticVol, BlackScholesMerton};
    use crate::common::models::StochasticVolParameters;
    use crate::error::PricingError;
    use assert_approx_eq::assert_approx_eq;

    fn engine() -> SweepEngine {
        SweepEngine::new(
            OptionContract::call(100.0, 100.0, 1.0),
            MarketParameters::new(0.05, 0.2),
        )
        .unwrap()
    }

    #[test]
    fn series_align_with_samples() {
        let spec = SweepSpec::new(SweepDimension::Volatility, Array1::linspace(0.1, 0.5, 5));
        let models = [Model::black_scholes(), Model::binomial(50), Model::bachelier()];
        let result = engine().sweep(&spec, &models).unwrap();

        assert_eq!(result.series.len(), 3);
        for series in &result.series {
            assert_eq!(series.prices.len(), 5);
        }
        for (index, vola) in result.samples.iter().enumerate() {
            let direct = BlackScholesMerton
                .call(&engine().contract, &MarketParameters::new(0.05, *vola))
                .unwrap();
            assert_eq!(result.prices(ModelId::BlackScholes).unwrap()[index], direct);
        }
    }

    #[test]
    fn time_sweep_holds_other_inputs() {
        let spec = SweepSpec::new(
            SweepDimension::TimeToMaturity,
            Array1::linspace(0.01, 1.0, 100),
        );
        let result = engine().sweep(&spec, &[Model::black_scholes()]).unwrap();
        let prices = result.prices(ModelId::BlackScholes).unwrap();

        assert_eq!(prices.len(), 100);
        assert_approx_eq!(prices[99], 10.4506, 1e-4);
        assert!(prices.to_vec().windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn empty_grid_gives_empty_series() {
        let spec = SweepSpec::new(SweepDimension::Volatility, Array1::zeros(0));
        let result = engine().sweep(&spec, &[Model::bachelier()]).unwrap();
        assert!(result.prices(ModelId::Bachelier).unwrap().is_empty());
    }

    #[test]
    fn invalid_sample_fails_the_sweep() {
        let spec = SweepSpec::new(SweepDimension::Volatility, Array1::from(vec![0.2, 0.0]));
        let err = engine().sweep(&spec, &[Model::black_scholes()]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter { name: "vola", .. }));
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(SweepEngine::new(
            OptionContract::call(100.0, 100.0, -1.0),
            MarketParameters::new(0.05, 0.2)
        )
        .is_err());
    }

    #[test]
    fn fixed_seed_replays_draws_per_sample() {
        let mc = Model::monte_carlo(2_000, 42);
        let samples = Array1::from(vec![0.2, 0.2, 0.2]);

        let fixed = SweepSpec::new(SweepDimension::Volatility, samples.clone());
        let result = engine().sweep(&fixed, &[mc]).unwrap();
        let prices = result.prices(ModelId::MonteCarlo).unwrap();
        assert_eq!(prices[0], prices[1]);
        assert_eq!(prices[1], prices[2]);
        assert_eq!(prices[0], mc.call(&engine().contract, &engine().market).unwrap());

        let varying = fixed.with_seed_policy(SeedPolicy::PerSample);
        let result = engine().sweep(&varying, &[mc]).unwrap();
        let prices = result.prices(ModelId::MonteCarlo).unwrap();
        assert_ne!(prices[0], prices[1]);
        assert_eq!(
            prices[2],
            mc.with_seed(44).call(&engine().contract, &engine().market).unwrap()
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_per_sample_seeds_follow_sample_order() {
        let mc = Model::monte_carlo(2_000, 42);
        let spec = SweepSpec::new(SweepDimension::Volatility, Array1::linspace(0.1, 0.5, 9))
            .with_seed_policy(SeedPolicy::PerSample);
        let result = engine().sweep(&spec, &[mc]).unwrap();
        let prices = result.prices(ModelId::MonteCarlo).unwrap();

        for (index, vola) in spec.samples.iter().enumerate() {
            let direct = mc
                .with_seed(42 + index as u64)
                .call(&engine().contract, &MarketParameters::new(0.05, *vola))
                .unwrap();
            assert_eq!(prices[index], direct);
        }
    }

    #[test]
    fn vol_of_vol_sweep_is_flat() {
        let sv: Model =
            ApproxStochasticVol::new(StochasticVolParameters::new(2.0, 0.04, 0.3, -0.7, 0.04)).into();
        let spec = SweepSpec::new(SweepDimension::VolOfVol, Array1::linspace(0.01, 1.0, 50));
        let result = engine().sweep(&spec, &[sv, Model::black_scholes()]).unwrap();

        let sv_prices = result.prices(ModelId::ApproxStochasticVol).unwrap();
        assert!(sv_prices.iter().all(|p| *p == sv_prices[0]));
        let bs_prices = result.prices(ModelId::BlackScholes).unwrap();
        assert!(bs_prices.iter().all(|p| *p == bs_prices[0]));
    }
}
