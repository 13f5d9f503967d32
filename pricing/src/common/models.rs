use crate::error::{
    ensure_finite, ensure_non_negative, ensure_positive, PricingError, PricingResult,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Payoff if exercised against `price` right now.
    #[inline]
    pub fn payoff(&self, price: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (price - strike).max(0.0),
            OptionKind::Put => (strike - price).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionContract {
    /// the asset's price at time t
    pub asset_price: f64,
    /// the strike or exercise price of the asset
    pub strike: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    pub time_to_expiration: f64,
    pub kind: OptionKind,
}

impl OptionContract {
    pub fn new(asset_price: f64, strike: f64, time_to_expiration: f64, kind: OptionKind) -> Self {
        Self {
            asset_price,
            strike,
            time_to_expiration,
            kind,
        }
    }

    pub fn call(asset_price: f64, strike: f64, time_to_expiration: f64) -> Self {
        Self::new(asset_price, strike, time_to_expiration, OptionKind::Call)
    }

    pub fn put(asset_price: f64, strike: f64, time_to_expiration: f64) -> Self {
        Self::new(asset_price, strike, time_to_expiration, OptionKind::Put)
    }

    pub fn with_kind(&self, kind: OptionKind) -> Self {
        Self { kind, ..*self }
    }

    pub fn with_time_to_expiration(&self, time_to_expiration: f64) -> Self {
        Self {
            time_to_expiration,
            ..*self
        }
    }

    pub fn intrinsic_value(&self) -> f64 {
        self.kind.payoff(self.asset_price, self.strike)
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("asset_price", self.asset_price)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("time_to_expiration", self.time_to_expiration)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketParameters {
    /// the annualized risk-free interest rate
    pub rfr: f64,
    /// the annualized standard deviation of the stock's returns
    pub vola: f64,
}

impl MarketParameters {
    pub fn new(rfr: f64, vola: f64) -> Self {
        Self { rfr, vola }
    }

    pub fn with_vola(&self, vola: f64) -> Self {
        Self { vola, ..*self }
    }

    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.rfr * t).exp()
    }

    pub fn validate(&self) -> PricingResult<()> {
        self.validate_rate()?;
        ensure_positive("vola", self.vola)
    }

    /// Checks the rate only, for consumers that never read `vola`.
    pub fn validate_rate(&self) -> PricingResult<()> {
        ensure_finite("rfr", self.rfr)
    }
}

/// Inputs of the stochastic-variance dynamics
/// '''math
/// dv_t = kappa (theta - v_t) dt + nu sqrt(v_t) dW_t
/// '''
/// Only `theta` reaches a price: see [`crate::analytic::ApproxStochasticVol`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochasticVolParameters {
    /// speed of mean reversion of the variance
    pub kappa: f64,
    /// long-run variance
    pub theta: f64,
    /// volatility of the variance
    pub vol_of_vol: f64,
    /// correlation between asset and variance shocks
    pub rho: f64,
    /// initial variance
    pub v0: f64,
}

impl StochasticVolParameters {
    pub fn new(kappa: f64, theta: f64, vol_of_vol: f64, rho: f64, v0: f64) -> Self {
        Self {
            kappa,
            theta,
            vol_of_vol,
            rho,
            v0,
        }
    }

    pub fn with_vol_of_vol(&self, vol_of_vol: f64) -> Self {
        Self {
            vol_of_vol,
            ..*self
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_finite("kappa", self.kappa)?;
        ensure_positive("theta", self.theta)?;
        ensure_non_negative("vol_of_vol", self.vol_of_vol)?;
        ensure_non_negative("v0", self.v0)?;
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(PricingError::InvalidParameter {
                name: "rho",
                value: self.rho,
                reason: "must lie in [-1, 1]",
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelId {
    BlackScholes,
    Binomial,
    MonteCarlo,
    ApproxStochasticVol,
    Bachelier,
}

impl ModelId {
    pub const ALL: [ModelId; 5] = [
        ModelId::BlackScholes,
        ModelId::Binomial,
        ModelId::MonteCarlo,
        ModelId::ApproxStochasticVol,
        ModelId::Bachelier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelId::BlackScholes => "Black-Scholes",
            ModelId::Binomial => "Binomial",
            ModelId::MonteCarlo => "Monte Carlo",
            ModelId::ApproxStochasticVol => "Heston (approx.)",
            ModelId::Bachelier => "Bachelier",
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceResult {
    pub model: ModelId,
    pub price: f64,
    /// standard error of a sampled estimate, `None` for deterministic models
    pub std_error: Option<f64>,
}

impl PriceResult {
    pub fn exact(model: ModelId, price: f64) -> Self {
        Self {
            model,
            price,
            std_error: None,
        }
    }
}
