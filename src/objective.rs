use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt;

use crate::result::{Error, Result};

/// Scalar function being minimized.
///
/// Both optimizers treat the objective as an opaque callable: they hand it a
/// position of the configured dimensionality and expect a single real value
/// back, lower being better. The objective must be total over the declared
/// bounds. A `NaN` is reported as an evaluation failure rather than silently
/// losing every comparison.
///
/// Any `Fn(&[f64]) -> f64` closure is already an `Objective`. Objectives that
/// can fail should be wrapped in [`Fallible`](struct.Fallible.html), or
/// implement the trait directly.
///
/// Note that `evaluate` takes `&self`. The optimizers never mutate the
/// objective, so if it needs to keep counters or caches, it is up to the
/// user to reach for a `Cell` or `RefCell`.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use swarmopt::Objective;
///
/// #[derive(Debug)]
/// struct OutOfDomain;
///
/// impl fmt::Display for OutOfDomain {
///     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
///         write!(f, "log of a non-positive number")
///     }
/// }
///
/// impl std::error::Error for OutOfDomain {}
///
/// struct LogSum;
///
/// impl Objective for LogSum {
///     type Error = OutOfDomain;
///
///     fn evaluate(&self, position: &[f64]) -> Result<f64, OutOfDomain> {
///         if position.iter().any(|x| *x <= 0.0) {
///             return Err(OutOfDomain);
///         }
///         Ok(position.iter().map(|x| x.ln()).sum())
///     }
/// }
///
/// assert_eq!(LogSum.evaluate(&[1.0, 1.0]).unwrap(), 0.0);
/// assert!(LogSum.evaluate(&[0.0]).is_err());
/// ```
pub trait Objective {
    /// Failure reported by the objective itself.
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates the objective at `position`.
    fn evaluate(&self, position: &[f64]) -> ::std::result::Result<f64, Self::Error>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    type Error = Infallible;

    fn evaluate(&self, position: &[f64]) -> ::std::result::Result<f64, Infallible> {
        Ok(self(position))
    }
}

/// Adapts a closure returning `Result<f64, E>` into an [`Objective`](trait.Objective.html).
///
/// ```
/// use swarmopt::{Fallible, Objective};
///
/// let checked = Fallible(|x: &[f64]| {
///     x.first().copied().ok_or(std::fmt::Error)
/// });
/// assert_eq!(checked.evaluate(&[3.0]).unwrap(), 3.0);
/// ```
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
    F: Fn(&[f64]) -> ::std::result::Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, position: &[f64]) -> ::std::result::Result<f64, E> {
        (self.0)(position)
    }
}

#[derive(Debug)]
struct NotANumber;

impl fmt::Display for NotANumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "objective returned NaN")
    }
}

impl StdError for NotANumber {}

/// Evaluates `objective` at `position`, folding its error and `NaN` results
/// into `Error::ObjectiveEvaluation`.
pub(crate) fn evaluate<O: Objective>(objective: &O, position: &[f64]) -> Result<f64> {
    match objective.evaluate(position) {
        Ok(value) if value.is_nan() => Err(Error::ObjectiveEvaluation {
            position: position.to_vec(),
            source: Box::new(NotANumber),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(Error::ObjectiveEvaluation {
            position: position.to_vec(),
            source: Box::new(err),
        }),
    }
}
