use tracing::debug;

use crate::common::models::{MarketParameters, ModelId, OptionContract, OptionKind};
use crate::config::{ComparisonConfig, SweepGrid};
use crate::error::PricingResult;
use crate::pricer::{Model, OptionPricer};
use crate::sweep::{SweepDimension, SweepEngine, SweepResult, SweepSpec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonRow {
    pub model: ModelId,
    pub model_name: String,
    pub call_price: f64,
    pub put_price: f64,
}

/// Model table plus call and put prices of every model against volatility.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub call_vs_vola: SweepResult,
    pub put_vs_vola: SweepResult,
}

impl Comparison {
    pub fn row(&self, model: ModelId) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.model == model)
    }
}

/// Call and put price of one model, same inputs otherwise.
pub fn price_pair(
    model: &Model,
    contract: &OptionContract,
    market: &MarketParameters,
) -> PricingResult<(f64, f64)> {
    Ok((model.call(contract, market)?, model.put(contract, market)?))
}

/// Prices all five models at the given inputs and sweeps each of them over the
/// configured volatility grid.
pub fn compare(
    asset_price: f64,
    strike: f64,
    time_to_expiration: f64,
    market: &MarketParameters,
    config: &ComparisonConfig,
) -> PricingResult<Comparison> {
    config.validate()?;
    let contract = OptionContract::call(asset_price, strike, time_to_expiration);
    let models = config.models();

    let rows = models
        .iter()
        .map(|model| {
            let (call_price, put_price) = price_pair(model, &contract, market)?;
            Ok(ComparisonRow {
                model: model.model(),
                model_name: model.model().name().to_string(),
                call_price,
                put_price,
            })
        })
        .collect::<PricingResult<Vec<_>>>()?;

    let spec = SweepSpec::new(SweepDimension::Volatility, config.vola_grid.to_array())
        .with_seed_policy(config.seed_policy);
    let call_vs_vola = SweepEngine::new(contract, *market)?.sweep(&spec, &models)?;
    let put_vs_vola =
        SweepEngine::new(contract.with_kind(OptionKind::Put), *market)?.sweep(&spec, &models)?;

    debug!(models = rows.len(), samples = spec.samples.len(), "comparison finished");
    Ok(Comparison {
        rows,
        call_vs_vola,
        put_vs_vola,
    })
}

/// Call and put series of a single model against maturity and against its volatility input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelPage {
    pub model: ModelId,
    pub call_price: f64,
    pub put_price: f64,
    pub call_vs_time: SweepResult,
    pub put_vs_time: SweepResult,
    /// volatility, or vol-of-vol for the stochastic-volatility model
    pub call_vs_vola: SweepResult,
    pub put_vs_vola: SweepResult,
}

/// The market volatility is only required where the model reads it: an independent
/// stochastic-volatility model prices with any `vola`, the other models need `vola > 0`.
pub fn model_page(
    model: &Model,
    contract: &OptionContract,
    market: &MarketParameters,
    grid: &SweepGrid,
) -> PricingResult<ModelPage> {
    grid.validate()?;
    let (call_price, put_price) = price_pair(model, contract, market)?;

    let (vola_dimension, vola_grid) = match model {
        Model::ApproxStochasticVol(_) => (SweepDimension::VolOfVol, grid.vol_of_vol),
        _ => (SweepDimension::Volatility, grid.vola),
    };
    let time_spec = SweepSpec::new(
        SweepDimension::TimeToMaturity,
        grid.time_grid(contract.time_to_expiration),
    );
    let vola_spec = SweepSpec::new(vola_dimension, vola_grid.to_array());

    let calls = SweepEngine::new(contract.with_kind(OptionKind::Call), *market)?;
    let puts = SweepEngine::new(contract.with_kind(OptionKind::Put), *market)?;
    let models = [*model];

    Ok(ModelPage {
        model: model.model(),
        call_price,
        put_price,
        call_vs_time: calls.sweep(&time_spec, &models)?,
        put_vs_time: puts.sweep(&time_spec, &models)?,
        call_vs_vola: calls.sweep(&vola_spec, &models)?,
        put_vs_vola: puts.sweep(&vola_spec, &models)?,
    })
}
