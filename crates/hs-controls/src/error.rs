//! Error types for control objects.

use thiserror::Error;

/// Result type for control construction.
pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Lower bound above upper bound.
    #[error("Invalid range for {what}: {low} > {high}")]
    InvalidRange { what: &'static str, low: f64, high: f64 },

    /// Unknown economizer or control tag.
    #[error("Unrecognized {what}: '{value}'")]
    UnknownTag { what: &'static str, value: String },
}

impl From<ControlError> for hs_core::HsError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::InvalidArg { what } => hs_core::HsError::InvalidArg { what },
            ControlError::UnknownTag { what, value } => hs_core::HsError::UnknownTag { what, value },
            other => hs_core::HsError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_display() {
        let err = ControlError::InvalidRange {
            what: "supply air temperature",
            low: 30.0,
            high: 10.0,
        };
        assert!(err.to_string().contains("supply air temperature"));
    }

    #[test]
    fn converts_to_core_error() {
        let err: hs_core::HsError = ControlError::InvalidArg { what: "x" }.into();
        assert!(matches!(err, hs_core::HsError::InvalidArg { what: "x" }));
    }
}
