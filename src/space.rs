//! The box-bounded region both optimizers search.

use rand::Rng;

use crate::result::{Error, Result};
use crate::vector;

/// A single `[low, high]` interval, applied uniformly to every dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Inclusive lower edge.
    pub low: f64,
    /// Inclusive upper edge.
    pub high: f64,
}

impl Bounds {
    /// Validates that `low < high` and that both edges, and the width
    /// between them, are finite.
    pub fn new(low: f64, high: f64) -> Result<Bounds> {
        if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
            return Err(Error::config(format!(
                "bounds must be finite with a finite width, got [{}, {}]",
                low, high
            )));
        }
        if low >= high {
            return Err(Error::config(format!(
                "lower bound {} must be strictly less than upper bound {}",
                low, high
            )));
        }
        Ok(Bounds { low, high })
    }

    /// Whether `x` lies in `[low, high]`.
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    /// Nearest point of the interval to `x`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.low).min(self.high)
    }

    /// Draws uniformly from `[low, high]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..=self.high)
    }
}

/// Dimensionality plus bounds. Immutable for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchSpace {
    dimensions: usize,
    bounds: Bounds,
}

impl SearchSpace {
    /// Fails with `Error::InvalidConfiguration` for zero dimensions or bad bounds.
    pub fn new(dimensions: usize, (low, high): (f64, f64)) -> Result<SearchSpace> {
        if dimensions == 0 {
            return Err(Error::config("search space needs at least one dimension"));
        }
        Ok(SearchSpace {
            dimensions,
            bounds: Bounds::new(low, high)?,
        })
    }

    /// Number of components in every position.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The interval shared by every dimension.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// A fresh position, uniform over the whole box.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dimensions).map(|_| self.bounds.sample(rng)).collect()
    }

    /// Clamps `position` into the box in place.
    pub fn clamp(&self, position: &mut [f64]) -> Result<()> {
        self.check(position)?;
        vector::clamp_into(position, self.bounds.low, self.bounds.high);
        Ok(())
    }

    /// Whether `position` has the right length and lies inside the box.
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimensions && position.iter().all(|x| self.bounds.contains(*x))
    }

    fn check(&self, position: &[f64]) -> Result<()> {
        if position.len() == self.dimensions {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions,
                got: position.len(),
            })
        }
    }
}
