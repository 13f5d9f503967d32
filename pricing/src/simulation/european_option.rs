use crate::common::models::{MarketParameters, ModelId, OptionContract, PriceResult};
use crate::error::{ensure_count, finite_price, PricingResult};
use crate::pricer::OptionPricer;
use crate::simulation::gbm::GeometricBrownianMotion;
use crate::simulation::monte_carlo::MonteCarloSimulator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Monte Carlo price of a European option from `nr_paths` exact terminal draws.
///
/// The generator is seeded from `seed_nr` on every call, so identical inputs give
/// bit-identical prices. With `antithetic` each draw `z` is paired with `-z` and the
/// two payoffs are averaged into one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloEuropean {
    pub nr_paths: usize,
    pub seed_nr: u64,
    pub antithetic: bool,
}

impl MonteCarloEuropean {
    pub fn new(nr_paths: usize, seed_nr: u64) -> Self {
        Self {
            nr_paths,
            seed_nr,
            antithetic: false,
        }
    }

    pub fn with_antithetic(self) -> Self {
        Self {
            antithetic: true,
            ..self
        }
    }

    pub fn with_seed(self, seed_nr: u64) -> Self {
        Self { seed_nr, ..self }
    }
}

impl OptionPricer for MonteCarloEuropean {
    fn model(&self) -> ModelId {
        ModelId::MonteCarlo
    }

    fn price(
        &self,
        contract: &OptionContract,
        market: &MarketParameters,
    ) -> PricingResult<PriceResult> {
        contract.validate()?;
        market.validate()?;
        ensure_count("nr_paths", self.nr_paths)?;

        // under the risk neutral measure we have mu = r, one exact step to expiry
        let stock_gbm = GeometricBrownianMotion::new(
            contract.asset_price,
            market.rfr,
            market.vola,
            contract.time_to_expiration,
        );
        let payoff = |z: f64| contract.kind.payoff(stock_gbm.terminal_value(z), contract.strike);

        let mc_simulator = MonteCarloSimulator::new(self.nr_paths);
        let stats = if self.antithetic {
            mc_simulator.simulate_with(self.seed_nr, stock_gbm.base_distribution(), |z| {
                0.5 * (payoff(z) + payoff(-z))
            })
        } else {
            mc_simulator.simulate_with(self.seed_nr, stock_gbm.base_distribution(), payoff)
        };

        let disc_factor = market.discount_factor(contract.time_to_expiration);
        let average = stats.average().unwrap_or(0.0);

        Ok(PriceResult {
            model: ModelId::MonteCarlo,
            price: finite_price("Monte Carlo", disc_factor * average)?,
            std_error: stats.std_error().map(|se| disc_factor * se),
        })
    }
}
