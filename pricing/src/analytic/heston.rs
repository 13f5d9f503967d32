use crate::analytic::black_scholes::BlackScholesMerton;
use crate::common::models::{
    MarketParameters, ModelId, OptionContract, PriceResult, StochasticVolParameters,
};
use crate::error::PricingResult;
use crate::pricer::OptionPricer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the vol-of-vol and initial variance come from at pricing time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VolCoupling {
    /// use the stored parameters as they are
    #[default]
    Independent,
    /// take `vol_of_vol = vola` and `v0 = vola^2` from the market parameters
    MarketVolatility,
}

/// Reduced stochastic-volatility (Heston-style) pricer.
///
/// This is NOT a Heston solver. The variance dynamics collapse to the constant effective
/// volatility `sqrt(theta)` which is handed to [`BlackScholesMerton`]; `kappa`, `rho`, `v0`
/// and the vol-of-vol are validated but never reach the price, and neither does the market
/// volatility. There is no characteristic-function integration and no Feller check.
///
/// With [`VolCoupling::Independent`] the market volatility is not validated either, so any
/// `vola` (including zero) is accepted; [`VolCoupling::MarketVolatility`] requires `vola > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApproxStochasticVol {
    pub params: StochasticVolParameters,
    pub coupling: VolCoupling,
}

impl ApproxStochasticVol {
    pub fn new(params: StochasticVolParameters) -> Self {
        Self {
            params,
            coupling: VolCoupling::Independent,
        }
    }

    pub fn coupled(kappa: f64, theta: f64, rho: f64) -> Self {
        Self {
            params: StochasticVolParameters::new(kappa, theta, 0.0, rho, 0.0),
            coupling: VolCoupling::MarketVolatility,
        }
    }

    /// The parameters as seen for a given market.
    pub fn effective_params(&self, market: &MarketParameters) -> StochasticVolParameters {
        match self.coupling {
            VolCoupling::Independent => self.params,
            VolCoupling::MarketVolatility => StochasticVolParameters {
                vol_of_vol: market.vola,
                v0: market.vola.powi(2),
                ..self.params
            },
        }
    }

    pub fn effective_vola(&self) -> f64 {
        self.params.theta.sqrt()
    }
}

impl OptionPricer for ApproxStochasticVol {
    fn model(&self) -> ModelId {
        ModelId::ApproxStochasticVol
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        match self.coupling {
            VolCoupling::Independent => market.validate_rate()?,
            VolCoupling::MarketVolatility => market.validate()?,
        }
        self.effective_params(market).validate()?;

        let bs = BlackScholesMerton.price(contract, &market.with_vola(self.effective_vola()))?;
        Ok(PriceResult::exact(ModelId::ApproxStochasticVol, bs.price))
    }
}
