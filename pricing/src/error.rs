use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be finite and > 0",
        })
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        })
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

pub(crate) fn ensure_count(name: &'static str, count: usize) -> PricingResult<()> {
    if count >= 1 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value: count as f64,
            reason: "must be >= 1",
        })
    }
}

/// Turns a non-finite model output into an error instead of leaking NaN.
pub(crate) fn finite_price(model: &str, price: f64) -> PricingResult<f64> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(PricingError::NumericalDegeneracy(format!(
            "{model} produced a non-finite price ({price})"
        )))
    }
}
