use std::error::Error as StdError;
use std::result;

use thiserror::Error;

#[derive(Debug, Error)]
/// Unifies the errors raised while configuring or running an optimizer.
///
/// Configuration problems are caught eagerly, when a hive or swarm is built.
/// Objective failures surface lazily, from the first evaluation that fails,
/// and abort the run without a partial result.
pub enum Error {
    /// A construction parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The objective function failed (or returned NaN) at `position`.
    #[error("objective evaluation failed at {position:?}: {source}")]
    ObjectiveEvaluation {
        /// The point that was being evaluated.
        position: Vec<f64>,
        /// The objective's own error.
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// Two vectors that should share a dimensionality do not.
    #[error("dimension mismatch: expected {expected} components, got {got}")]
    DimensionMismatch {
        /// Length of the left-hand (reference) vector.
        expected: usize,
        /// Length of the offending vector.
        got: usize,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Error {
        Error::InvalidConfiguration(message.into())
    }
}

/// Encodes the possibility of a bad configuration or a failing objective.
pub type Result<T> = result::Result<T, Error>;
