use tracing::warn;

use crate::analytic::normal::{cdf, pdf, MIN_STD_DEV};
use crate::common::models::{MarketParameters, ModelId, OptionContract, OptionKind, PriceResult};
use crate::error::{finite_price, PricingResult};
use crate::pricer::OptionPricer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// European Put and Call option prices under arithmetic (normal) price dynamics.
/// https://en.wikipedia.org/wiki/Bachelier_model
///
/// The absolute volatility is `vola * S`. The risk-free rate is validated but does not enter
/// the price: there is neither drift nor discounting, so `call - put = S - X`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bachelier;

impl OptionPricer for Bachelier {
    fn model(&self) -> ModelId {
        ModelId::Bachelier
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        contract.validate()?;
        market.validate()?;

        let sigma_abs = market.vola * contract.asset_price;
        let sigma_exp = sigma_abs * contract.time_to_expiration.sqrt();
        let moneyness = contract.asset_price - contract.strike;

        let price = if sigma_exp < MIN_STD_DEV {
            warn!(sigma_exp, "bachelier: degenerate deviation, using intrinsic value");
            contract.intrinsic_value()
        } else {
            let d1 = moneyness / sigma_exp;
            match contract.kind {
                OptionKind::Call => moneyness * cdf(d1) + sigma_exp * pdf(d1),
                OptionKind::Put => -moneyness * cdf(-d1) + sigma_exp * pdf(-d1),
            }
        };

        Ok(PriceResult::exact(
            ModelId::Bachelier,
            finite_price("Bachelier", price)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn price(contract: OptionContract, r: f64, vola: f64) -> f64 {
        Bachelier
            .price(&contract, &MarketParameters::new(r, vola))
            .unwrap()
            .price
    }

    #[test]
    fn at_the_money() {
        // sigma_abs * sqrt(T) * phi(0) = 20 * 0.398942...
        let call = price(OptionContract::call(100.0, 100.0, 1.0), 0.05, 0.2);
        let put = price(OptionContract::put(100.0, 100.0, 1.0), 0.05, 0.2);
        assert_approx_eq!(call, 7.978_845_608, 1e-8);
        assert_approx_eq!(put, call, 1e-12);
    }

    #[test]
    fn rate_has_no_effect() {
        let contract = OptionContract::call(105.0, 100.0, 2.0);
        assert_eq!(price(contract, 0.0, 0.3), price(contract, 0.15, 0.3));
    }

    #[test]
    fn put_call_parity() {
        let cases = [
            (100.0, 90.0, 1.0, 0.2),
            (50.0, 70.0, 0.5, 0.6),
            (10.0, 10.0, 3.0, 0.05),
        ];
        for (s, x, t, vola) in cases {
            let call = price(OptionContract::call(s, x, t), 0.05, vola);
            let put = price(OptionContract::put(s, x, t), 0.05, vola);
            assert_approx_eq!(call - put, s - x, 1e-10);
        }
    }

    #[test]
    fn degenerate_deviation_gives_intrinsic() {
        assert_eq!(price(OptionContract::call(110.0, 100.0, 1.0), 0.05, 1e-16), 10.0);
        assert_eq!(price(OptionContract::put(110.0, 100.0, 1.0), 0.05, 1e-16), 0.0);
        assert_approx_eq!(price(OptionContract::put(90.0, 100.0, 1e-12), 0.05, 0.2), 10.0, 1e-9);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let market = MarketParameters::new(0.05, 0.2);
        assert!(Bachelier.price(&OptionContract::call(100.0, 100.0, 0.0), &market).is_err());
        assert!(Bachelier.price(&OptionContract::call(-1.0, 100.0, 1.0), &market).is_err());
        assert!(Bachelier
            .price(&OptionContract::call(100.0, 100.0, 1.0), &market.with_vola(0.0))
            .is_err());
    }
}
