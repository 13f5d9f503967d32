use tracing::warn;

use crate::common::models::{MarketParameters, ModelId, OptionContract, PriceResult};
use crate::error::{ensure_count, finite_price, PricingResult};
use crate::pricer::OptionPricer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cox-Ross-Rubinstein recombining tree for European exercise.
/// https://en.wikipedia.org/wiki/Binomial_options_pricing_model
///
/// O(steps^2) time, O(steps) space: the terminal layer is collapsed in place.
///
/// When the risk-neutral up-probability leaves [0, 1] (the drift per step `r dt` outgrows the
/// spread `vola sqrt(dt)`, or `u == d` after underflow) there is no usable tree, and the
/// small-volatility limit `max(0, S - X exp(-rT))` (resp. put) is returned instead, the same
/// value [`crate::analytic::BlackScholesMerton`] falls back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinomialTree {
    pub steps: usize,
}

impl BinomialTree {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Up factor, down factor and risk-neutral up-probability for one step of length `dt`,
    /// or `None` if the probability is not in [0, 1].
    fn step_factors(&self, market: &MarketParameters, dt: f64) -> Option<(f64, f64, f64)> {
        let up = (market.vola * dt.sqrt()).exp();
        let down = 1.0 / up;
        let prob_up = ((market.rfr * dt).exp() - down) / (up - down);

        if !prob_up.is_finite() || !(0.0..=1.0).contains(&prob_up) {
            warn!(prob_up, up, down, "binomial: degenerate tree, using forward intrinsic value");
            return None;
        }
        Some((up, down, prob_up))
    }
}

impl OptionPricer for BinomialTree {
    fn model(&self) -> ModelId {
        ModelId::Binomial
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        contract.validate()?;
        market.validate()?;
        ensure_count("steps", self.steps)?;

        let n = self.steps;
        let dt = contract.time_to_expiration / n as f64;
        let Some((up, down, prob_up)) = self.step_factors(market, dt) else {
            let forward_strike =
                contract.strike * market.discount_factor(contract.time_to_expiration);
            let limit = contract.kind.payoff(contract.asset_price, forward_strike);
            return Ok(PriceResult::exact(
                ModelId::Binomial,
                finite_price("Binomial", limit)?,
            ));
        };
        let disc_factor = market.discount_factor(dt);

        // node i of the terminal layer holds S * u^(n - i) * d^i
        let mut values: Vec<f64> = (0..=n)
            .map(|i| {
                let st = contract.asset_price * up.powi((n - i) as i32) * down.powi(i as i32);
                contract.kind.payoff(st, contract.strike)
            })
            .collect();

        for layer in (0..n).rev() {
            for i in 0..=layer {
                values[i] = disc_factor * (prob_up * values[i] + (1.0 - prob_up) * values[i + 1]);
            }
        }

        Ok(PriceResult::exact(
            ModelId::Binomial,
            finite_price("Binomial", values[0])?,
        ))
    }
}
