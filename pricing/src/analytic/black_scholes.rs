use tracing::warn;

use crate::analytic::normal::{cdf, MIN_STD_DEV};
use crate::common::models::{MarketParameters, ModelId, OptionContract, OptionKind, PriceResult};
use crate::error::{finite_price, PricingResult};
use crate::pricer::OptionPricer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// European Put and Call option prices for stocks.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
///
/// When `vola * sqrt(T)` is below [`MIN_STD_DEV`] the terminal price is a point mass at the
/// forward, and the forward-intrinsic value `max(0, S - X exp(-rT))` (resp. put) is returned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlackScholesMerton;

impl OptionPricer for BlackScholesMerton {
    fn model(&self) -> ModelId {
        ModelId::BlackScholes
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        contract.validate()?;
        market.validate()?;

        let tte = contract.time_to_expiration;
        let sigma_exp = market.vola * tte.sqrt();
        let disc_factor = market.discount_factor(tte);

        let price = if sigma_exp < MIN_STD_DEV {
            warn!(sigma_exp, "black-scholes: degenerate deviation, using forward intrinsic value");
            contract
                .kind
                .payoff(contract.asset_price, contract.strike * disc_factor)
        } else {
            let d1 = ((contract.asset_price / contract.strike).ln()
                + (market.rfr + market.vola.powi(2) / 2.0) * tte)
                / sigma_exp;
            let d2 = d1 - sigma_exp;
            match contract.kind {
                OptionKind::Call => {
                    cdf(d1) * contract.asset_price - cdf(d2) * contract.strike * disc_factor
                }
                OptionKind::Put => {
                    cdf(-d2) * contract.strike * disc_factor - cdf(-d1) * contract.asset_price
                }
            }
        };

        Ok(PriceResult::exact(
            ModelId::BlackScholes,
            finite_price("Black-Scholes", price)?,
        ))
    }
}
