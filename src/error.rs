//! Errors raised by the registry, controller, and result emitter.
//!
//! Every variant is a local precondition failure: the operation that
//! returned it left the selection state untouched.

use crate::controller::{Axis, Bound};
use crate::registry::{DistributionId, Parameterization};

pub type Result<T> = std::result::Result<T, GadgetError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GadgetError {
    /// Returned when a distribution name does not match any registered distribution.
    #[error("unknown distribution: '{0}'")]
    UnknownDistribution(String),

    /// Returned when a parameterization name is unknown or not declared for the distribution.
    #[error("unknown parameterization: '{0}'")]
    UnknownParameterization(String),

    /// Returned when the parameterization control is used on a distribution that doesn't offer it.
    #[error("{distribution} does not support the {parameterization} parameterization")]
    InvalidParameterization {
        distribution: DistributionId,
        parameterization: Parameterization,
    },

    /// Returned when a parameter name is not part of the active distribution.
    #[error("unknown parameter: '{0}'")]
    UnknownParameter(String),

    /// Returned when a value lies outside a parameter's `[min, max]`.
    #[error("value {value} for '{name}' is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Returned when a plot limit is not finite or would produce an empty range.
    #[error("invalid {axis} {bound} limit: {value}")]
    InvalidLimit { axis: Axis, bound: Bound, value: f64 },

    /// Returned when a required parameter has no value.
    #[error("parameter '{0}' has no value")]
    IncompleteSelection(String),

    /// Returned when more values are supplied than the distribution has parameters.
    #[error("{distribution} takes {expected} parameters, got {got}")]
    TooManyValues {
        distribution: DistributionId,
        expected: usize,
        got: usize,
    },
}
