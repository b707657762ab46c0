//! Construction-time errors.
//!
//! Every failure surfaces when a detector is built; once construction
//! succeeds, evaluation is total and degenerate numerics degrade to a
//! probability of 0 instead of erroring.

use thiserror::Error;

use crate::config::Method;

/// Configuration validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("active size must be positive")]
    InvalidActiveSize,

    #[error("season count must be positive")]
    InvalidSeasonCount,

    #[error("invalid sensitivity: {0} (must be in (0, 1])")]
    InvalidSensitivity(f64),

    #[error("permutation count must be positive")]
    InvalidPermCount,

    #[error("no methods configured")]
    NoMethods,

    #[error("method configured twice: {0}")]
    DuplicateMethod(Method),

    #[error("unknown method name: {0}")]
    UnknownMethod(String),

    #[error("invalid {side} bound: {value} (must be finite)")]
    NonFiniteBound { side: &'static str, value: f64 },

    #[error("upper bound {upper} is below lower bound {lower}")]
    BoundsInverted { upper: f64, lower: f64 },

    #[error("fence method requires at least one bound")]
    FenceWithoutBounds,

    #[error("weight configured for unselected method: {0}")]
    WeightForUnselectedMethod(Method),

    #[error("invalid weight for {method}: {weight} (must be positive and finite)")]
    InvalidWeight { method: Method, weight: f64 },
}

/// Errors raised while building a detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("non-finite value {value} in initial history at index {index}")]
    NonFiniteHistory { index: usize, value: f64 },
}
