use thiserror::Error;

/// Error type for invalid model inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErwError {
    #[error("{0}")]
    Error(String),
    #[error("invalid {field}: {value} (expected {constraint})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

impl ErwError {
    /// Shorthand for an [`ErwError::InvalidInput`] rejection.
    pub fn invalid_input(field: &'static str, value: f64, constraint: &'static str) -> Self {
        ErwError::InvalidInput {
            field,
            value,
            constraint,
        }
    }
}

/// Convenience type for `Result<T, ErwError>`.
pub type ErwResult<T> = Result<T, ErwError>;
