use std::fmt::{Debug, Formatter, Result as FmtResult};

#[derive(Clone, PartialEq)]
/// A point in the search space, plus the objective value found there.
///
/// This is also what both optimizers hand back when a run finishes: the best
/// position and its value. The `fitness` is always the objective evaluated at
/// exactly this `position`; the two are only ever replaced together.
pub struct Candidate {
    /// Position in the search space.
    pub position: Vec<f64>,

    /// Cached objective value at `position` (lower is better).
    pub fitness: f64,
}

impl Candidate {
    /// Pairs a position with its already-computed objective value.
    pub fn new(position: Vec<f64>, fitness: f64) -> Candidate {
        Candidate { position, fitness }
    }

    /// A placeholder that any real evaluation improves on.
    pub(crate) fn unevaluated(position: Vec<f64>) -> Candidate {
        Candidate::new(position, f64::INFINITY)
    }

    /// Whether `self` is strictly better (lower) than `other`. Ties lose.
    pub fn improves_on(&self, other: &Candidate) -> bool {
        self.fitness < other.fitness
    }

    /// Splits into `(position, fitness)`.
    pub fn into_parts(self) -> (Vec<f64>, f64) {
        (self.position, self.fitness)
    }
}

impl Debug for Candidate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "[{}] {:?}", self.fitness, self.position)
    }
}

#[derive(Clone, Debug)]
/// One food source worked by the hive: a candidate plus its trial counter.
///
/// The trial counter (staleness) counts consecutive visits that failed to
/// improve the source. Once it exceeds the hive's abandonment limit, a scout
/// replaces the source with a fresh random sample.
pub struct FoodSource {
    candidate: Candidate,
    trials: usize,
}

impl FoodSource {
    pub(crate) fn new(candidate: Candidate) -> FoodSource {
        FoodSource {
            candidate,
            trials: 0,
        }
    }

    /// The source's current position and fitness.
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Consecutive non-improving visits.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Whether the source has stagnated for more than `limit` visits.
    pub fn expired(&self, limit: usize) -> bool {
        self.trials > limit
    }

    /// Records a failed attempt to improve on this source.
    pub(crate) fn deplete(&mut self) {
        self.trials += 1;
    }

    /// Swaps in a new position and fitness together and clears the counter.
    pub(crate) fn replace(&mut self, candidate: Candidate) {
        self.candidate = candidate;
        self.trials = 0;
    }
}
