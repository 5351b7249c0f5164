use thiserror::Error;

pub type HsResult<T> = Result<T, HsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },

    /// A named or indexed object was requested that the model does not hold.
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    #[error("Unknown {what}: {value}")]
    UnknownTag { what: &'static str, value: String },
}

impl HsError {
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        HsError::NotFound {
            what,
            name: name.into(),
        }
    }

    pub fn unknown_tag(what: &'static str, value: impl Into<String>) -> Self {
        HsError::UnknownTag {
            what,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_object() {
        let err = HsError::not_found("Schedule", "Always On");
        assert_eq!(err.to_string(), "Schedule not found: Always On");
    }
}
