pub mod models;

pub use models::{
    MarketParameters, ModelId, OptionContract, OptionKind, PriceResult, StochasticVolParameters,
};
