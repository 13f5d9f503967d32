mod european_option;
mod gbm;
pub mod monte_carlo;

pub use european_option::MonteCarloEuropean;
pub use gbm::GeometricBrownianMotion;
pub use monte_carlo::{MonteCarloSimulator, RunningStats};
