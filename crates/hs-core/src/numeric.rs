//! Argument checks shared by every builder that accepts user numbers.

use crate::{HsError, HsResult};

pub fn ensure_finite(v: f64, what: &'static str) -> HsResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HsError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`: flows, areas, capacities.
pub fn ensure_non_negative(v: f64, what: &'static str) -> HsResult<f64> {
    match ensure_finite(v, what)? {
        v if v >= 0.0 => Ok(v),
        _ => Err(HsError::InvalidArg { what }),
    }
}

/// Within the closed unit interval: schedule values, effectiveness, minimum
/// flow fractions.
pub fn ensure_fraction(v: f64, what: &'static str) -> HsResult<f64> {
    match ensure_finite(v, what)? {
        v if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(HsError::InvalidArg { what }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_reported_with_its_label() {
        let err = ensure_finite(f64::NAN, "zone outdoor air").unwrap_err();
        assert!(matches!(err, HsError::NonFinite { what: "zone outdoor air", .. }));
    }

    #[test]
    fn negative_flow_is_rejected() {
        assert_eq!(ensure_non_negative(0.0, "flow").unwrap(), 0.0);
        assert!(ensure_non_negative(-1e-9, "flow").is_err());
        assert!(ensure_non_negative(f64::INFINITY, "flow").is_err());
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert_eq!(ensure_fraction(0.0, "f").unwrap(), 0.0);
        assert_eq!(ensure_fraction(1.0, "f").unwrap(), 1.0);
        assert!(ensure_fraction(1.01, "f").is_err());
        assert!(ensure_fraction(-0.1, "f").is_err());
    }
}
