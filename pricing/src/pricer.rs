use tracing::trace;

use crate::analytic::{ApproxStochasticVol, Bachelier, BlackScholesMerton};
use crate::common::models::{
    MarketParameters, ModelId, OptionContract, OptionKind, PriceResult, StochasticVolParameters,
};
use crate::error::PricingResult;
use crate::lattice::BinomialTree;
use crate::simulation::MonteCarloEuropean;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prices a European option; implementations are stateless and side-effect free.
pub trait OptionPricer {
    fn model(&self) -> ModelId;

    /// Validates the inputs and prices the contract as given (its `kind` decides call or put).
    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult>;

    fn call(&self, contract: &OptionContract, market: &MarketParameters) -> PricingResult<f64> {
        self.price(&contract.with_kind(OptionKind::Call), market)
            .map(|result| result.price)
    }

    fn put(&self, contract: &OptionContract, market: &MarketParameters) -> PricingResult<f64> {
        self.price(&contract.with_kind(OptionKind::Put), market)
            .map(|result| result.price)
    }
}

/// The five supported models behind one value type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Model {
    BlackScholes(BlackScholesMerton),
    Binomial(BinomialTree),
    MonteCarlo(MonteCarloEuropean),
    ApproxStochasticVol(ApproxStochasticVol),
    Bachelier(Bachelier),
}

impl Model {
    pub fn black_scholes() -> Self {
        Model::BlackScholes(BlackScholesMerton)
    }

    pub fn binomial(steps: usize) -> Self {
        Model::Binomial(BinomialTree::new(steps))
    }

    pub fn monte_carlo(nr_paths: usize, seed_nr: u64) -> Self {
        Model::MonteCarlo(MonteCarloEuropean::new(nr_paths, seed_nr))
    }

    pub fn approx_stochastic_vol(params: StochasticVolParameters) -> Self {
        Model::ApproxStochasticVol(ApproxStochasticVol::new(params))
    }

    pub fn bachelier() -> Self {
        Model::Bachelier(Bachelier)
    }

    /// Same model with another seed; models without randomness are returned unchanged.
    pub fn with_seed(&self, seed_nr: u64) -> Self {
        match self {
            Model::MonteCarlo(mc) => Model::MonteCarlo(mc.with_seed(seed_nr)),
            other => *other,
        }
    }

    /// Same model with another vol-of-vol; only the stochastic-volatility model has one.
    pub fn with_vol_of_vol(&self, vol_of_vol: f64) -> Self {
        match self {
            Model::ApproxStochasticVol(sv) => Model::ApproxStochasticVol(ApproxStochasticVol {
                params: sv.params.with_vol_of_vol(vol_of_vol),
                ..*sv
            }),
            other => *other,
        }
    }

    pub fn seed_nr(&self) -> Option<u64> {
        match self {
            Model::MonteCarlo(mc) => Some(mc.seed_nr),
            _ => None,
        }
    }

    fn as_pricer(&self) -> &dyn OptionPricer {
        match self {
            Model::BlackScholes(pricer) => pricer,
            Model::Binomial(pricer) => pricer,
            Model::MonteCarlo(pricer) => pricer,
            Model::ApproxStochasticVol(pricer) => pricer,
            Model::Bachelier(pricer) => pricer,
        }
    }
}

impl OptionPricer for Model {
    fn model(&self) -> ModelId {
        self.as_pricer().model()
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        let result = self.as_pricer().price(contract, market)?;
        trace!(model = %result.model, kind = ?contract.kind, price = result.price, "priced");
        Ok(result)
    }
}

impl From<BlackScholesMerton> for Model {
    fn from(pricer: BlackScholesMerton) -> Self {
        Model::BlackScholes(pricer)
    }
}

impl From<BinomialTree> for Model {
    fn from(pricer: BinomialTree) -> Self {
        Model::Binomial(pricer)
    }
}

impl From<MonteCarloEuropean> for Model {
    fn from(pricer: MonteCarloEuropean) -> Self {
        Model::MonteCarlo(pricer)
    }
}

impl From<ApproxStochasticVol> for Model {
    fn from(pricer: ApproxStochasticVol) -> Self {
        Model::ApproxStochasticVol(pricer)
    }
}

impl From<Bachelier> for Model {
    fn from(pricer: Bachelier) -> Self {
        Model::Bachelier(pricer)
    }
}
