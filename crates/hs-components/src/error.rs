//! Error types for equipment factories.

use hs_core::HsError;
use thiserror::Error;

/// Errors raised while deriving equipment parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Model(#[from] HsError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HsError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HsError::InvalidArg { what },
            ComponentError::NotSupported { what } => HsError::InvalidArg { what },
            ComponentError::InvalidArg { what } => HsError::InvalidArg { what },
            ComponentError::Model(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical {
            what: "fan efficiency",
        };
        assert!(err.to_string().contains("fan efficiency"));
    }

    #[test]
    fn error_conversion() {
        let hs: HsError = ComponentError::InvalidArg { what: "test" }.into();
        assert!(matches!(hs, HsError::InvalidArg { .. }));

        let nested = ComponentError::from(HsError::not_found("PlantLoop", "Hot Water Loop"));
        assert!(matches!(HsError::from(nested), HsError::NotFound { .. }));
    }
}
