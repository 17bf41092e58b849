//! Error types for lafs-core.

use thiserror::Error;

/// Generation error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter failed validation before generation started.
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field (with index when it is a sequence element).
        field: String,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// A sampling distribution rejected its parameters.
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Configuration could not be loaded or extracted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Builds an [`Error::InvalidParameter`] for `field`.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field name for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<rand_distr::NormalError> for Error {
    fn from(err: rand_distr::NormalError) -> Self {
        Self::Distribution(format!("normal: {err}"))
    }
}

impl From<rand::distributions::BernoulliError> for Error {
    fn from(err: rand::distributions::BernoulliError) -> Self {
        Self::Distribution(format!("bernoulli: {err}"))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;
