//! Error types for orbital geometry

use thiserror::Error;

/// Result type for element construction
pub type ElementsResult<T> = Result<T, ElementsError>;

/// Reasons a catalog orbit cannot be turned into geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementsError {
    #[error("semi-major axis must be positive, got {0}")]
    NonPositiveSemiMajorAxis(f64),

    #[error("eccentricity must lie in [0, 1), got {0}")]
    EccentricityOutOfRange(f64),

    #[error("{field} is missing")]
    Missing { field: &'static str },

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}
