//! Error types for riego operations.
//!
//! Degenerate inputs are rejected eagerly, before any numeric work, so that
//! NaN can never reach a best-score comparison.

use std::fmt;

/// Main error type for riego operations.
///
/// # Examples
///
/// ```
/// use riego::error::RiegoError;
///
/// let err = RiegoError::invalid_hyperparameter("swarm_size", 0, ">= 1");
/// assert!(err.to_string().contains("swarm_size"));
/// ```
#[derive(Debug)]
pub enum RiegoError {
    /// A dataset was required but no sample points were provided.
    EmptyDataset,

    /// Invalid hyperparameter or configuration value.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The search domain derived from the dataset has no extent: every
    /// sample carries identical coordinates.
    DegenerateDomain {
        /// Latitude extent of the dataset
        lat_span: f64,
        /// Longitude extent of the dataset
        lon_span: f64,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RiegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiegoError::EmptyDataset => {
                write!(f, "empty dataset: at least one sample point is required")
            }
            RiegoError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            RiegoError::DegenerateDomain { lat_span, lon_span } => {
                write!(
                    f,
                    "Degenerate search domain: latitude span = {lat_span}, longitude span = {lon_span}"
                )
            }
            RiegoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RiegoError {}

impl From<&str> for RiegoError {
    fn from(msg: &str) -> Self {
        RiegoError::Other(msg.to_string())
    }
}

impl From<String> for RiegoError {
    fn from(msg: String) -> Self {
        RiegoError::Other(msg)
    }
}

impl RiegoError {
    /// Create an invalid hyperparameter error with descriptive context.
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RiegoError>;
