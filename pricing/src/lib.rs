//! European option pricing under five models, and sweeps of those models over one input.
//!
//! Models: closed-form Black-Scholes, a Cox-Ross-Rubinstein binomial tree, seeded Monte Carlo,
//! a reduced stochastic-volatility approximation (Black-Scholes at `sqrt(theta)`) and the
//! Bachelier normal model. All pricers are pure; Monte Carlo is reproducible from its seed.
//!
//! ```
//! use pricing::{MarketParameters, Model, OptionContract, OptionPricer};
//!
//! let contract = OptionContract::call(100.0, 100.0, 1.0);
//! let market = MarketParameters::new(0.05, 0.2);
//! let price = Model::black_scholes().price(&contract, &market).unwrap();
//! assert!((price.price - 10.4506).abs() < 1e-4);
//! ```

pub mod analytic;
pub mod common;
pub mod comparison;
pub mod config;
pub mod error;
pub mod lattice;
pub mod pricer;
pub mod simulation;
pub mod sweep;

pub use analytic::{ApproxStochasticVol, Bachelier, BlackScholesMerton, VolCoupling};
pub use common::{
    MarketParameters, ModelId, OptionContract, OptionKind, PriceResult, StochasticVolParameters,
};
pub use comparison::{compare, model_page, price_pair, Comparison, ComparisonRow, ModelPage};
pub use config::{ComparisonConfig, GridSpec, SweepGrid};
pub use error::{PricingError, PricingResult};
pub use lattice::BinomialTree;
pub use pricer::{Model, OptionPricer};
pub use simulation::MonteCarloEuropean;
pub use sweep::{SeedPolicy, SweepDimension, SweepEngine, SweepResult, SweepSeries, SweepSpec};
