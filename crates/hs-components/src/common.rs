//! Common parameter checks for equipment factories.

use hs_core::numeric::ensure_finite;

use crate::error::{ComponentError, ComponentResult};

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Efficiencies and effectiveness ratios live in (0, 1].
pub fn check_efficiency(value: f64, what: &'static str) -> ComponentResult<f64> {
    let v = check_finite(value, what)?;
    if v <= 0.0 || v > 1.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(v)
}

/// Ratios that may be zero, e.g. a disabled latent effectiveness.
pub fn check_fraction(value: f64, what: &'static str) -> ComponentResult<f64> {
    let v = check_finite(value, what)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(v)
}

pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    let v = check_finite(value, what)?;
    if v <= 0.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_bounds() {
        assert!(check_efficiency(1.0, "eta").is_ok());
        assert!(check_efficiency(0.0, "eta").is_err());
        assert!(check_efficiency(f64::NAN, "eta").is_err());
        assert!(check_fraction(0.0, "latent").is_ok());
        assert!(check_fraction(1.2, "latent").is_err());
        assert!(check_positive(-3.0, "cop").is_err());
    }
}
