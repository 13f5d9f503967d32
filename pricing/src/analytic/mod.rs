pub mod bachelier;
pub mod black_scholes;
pub mod heston;
pub mod normal;

pub use bachelier::Bachelier;
pub use black_scholes::BlackScholesMerton;
pub use heston::{ApproxStochasticVol, VolCoupling};
