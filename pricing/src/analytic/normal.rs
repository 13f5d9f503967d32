use probability::distribution::{Continuous, Distribution, Gaussian};

/// Standard deviations (sigma * sqrt(T)) below this are treated as a point mass.
pub const MIN_STD_DEV: f64 = 1e-12;

fn standard_normal() -> Gaussian {
    Gaussian::new(0.0, 1.0)
}

/// Standard normal CDF. Saturates to 0 / 1 for infinite arguments.
pub fn cdf(d: f64) -> f64 {
    if d == f64::INFINITY {
        return 1.0;
    }
    if d == f64::NEG_INFINITY {
        return 0.0;
    }
    standard_normal().distribution(d)
}

/// Standard normal PDF.
pub fn pdf(d: f64) -> f64 {
    if d.is_infinite() {
        return 0.0;
    }
    standard_normal().density(d)
}
