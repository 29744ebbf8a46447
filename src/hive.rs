use std::fmt::{Debug, Formatter, Result as FmtResult};

use crossbeam::channel::Sender;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::{Candidate, FoodSource};
use crate::control::{Progress, RunControl, StopHandle};
use crate::objective::{self, Objective};
use crate::result::{Error, Result};
use crate::scaling::{self, Roulette, ScalingFunction};
use crate::space::SearchSpace;
use crate::task::{Task, TaskGenerator};
use crate::vector;

/// Which candidate a hive reports as its answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BestTracking {
    /// Scan the population once the run ends and report its fittest source.
    ///
    /// A source that was abandoned by a scout is forgotten, so the answer can
    /// be worse than something the hive saw earlier in the run.
    #[default]
    FinalPopulation,

    /// Remember the best candidate ever evaluated into the population
    /// (initial samples, accepted moves and scout samples) and report that.
    /// The answer never gets worse from one round to the next.
    RunningBest,
}

/// Tunable settings of a hive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HiveConfig {
    /// Number of food sources, which is also the number of employed bees
    /// and the number of onlookers per round.
    pub population: usize,

    /// Rounds run by [`Hive::optimize`](struct.Hive.html#method.optimize).
    pub iterations: usize,

    /// A source is abandoned once its trial counter exceeds this.
    pub abandonment_limit: usize,

    /// How the final answer is picked.
    pub best_tracking: BestTracking,
}

impl Default for HiveConfig {
    fn default() -> HiveConfig {
        HiveConfig {
            population: 20,
            iterations: 100,
            abandonment_limit: 10,
            best_tracking: BestTracking::FinalPopulation,
        }
    }
}

/// Builds a [`Hive`](struct.Hive.html).
///
/// Nothing is validated until [`build`](#method.build), which is where an
/// invalid configuration is reported.
pub struct HiveBuilder<O> {
    objective: O,
    dimensions: usize,
    bounds: (f64, f64),
    config: HiveConfig,
    scale: Box<ScalingFunction>,
    seed: Option<u64>,
    control: RunControl,
}

impl<O: Objective> HiveBuilder<O> {
    /// Start building a hive that minimizes `objective` over
    /// `[bounds.0, bounds.1]^dimensions`.
    pub fn new(objective: O, dimensions: usize, bounds: (f64, f64)) -> HiveBuilder<O> {
        HiveBuilder {
            objective,
            dimensions,
            bounds,
            config: HiveConfig::default(),
            scale: scaling::inverse(scaling::DEFAULT_EPSILON),
            seed: None,
            control: RunControl::default(),
        }
    }

    /// Replace every tunable setting at once.
    pub fn set_config(mut self, config: HiveConfig) -> HiveBuilder<O> {
        self.config = config;
        self
    }

    /// Set the number of food sources.
    pub fn set_population(mut self, population: usize) -> HiveBuilder<O> {
        self.config.population = population;
        self
    }

    /// Set the number of rounds to run.
    pub fn set_iterations(mut self, iterations: usize) -> HiveBuilder<O> {
        self.config.iterations = iterations;
        self
    }

    /// Set how many failed visits a source survives before it is abandoned.
    pub fn set_abandonment_limit(mut self, limit: usize) -> HiveBuilder<O> {
        self.config.abandonment_limit = limit;
        self
    }

    /// Set how the final answer is picked.
    pub fn set_best_tracking(mut self, tracking: BestTracking) -> HiveBuilder<O> {
        self.config.best_tracking = tracking;
        self
    }

    /// Set the scaling function for onlookers to use.
    pub fn set_scaling(mut self, scale: Box<ScalingFunction>) -> HiveBuilder<O> {
        self.scale = scale;
        self
    }

    /// Seed the hive's random number generator, for reproducible runs.
    pub fn set_seed(mut self, seed: u64) -> HiveBuilder<O> {
        self.seed = Some(seed);
        self
    }

    /// Let `handle` stop the hive between rounds.
    pub fn set_stop_handle(mut self, handle: StopHandle) -> HiveBuilder<O> {
        self.control.stop = handle;
        self
    }

    /// Post a [`Progress`](struct.Progress.html) to `sender` after every round.
    pub fn set_progress(mut self, sender: Sender<Progress>) -> HiveBuilder<O> {
        self.control.progress = Some(sender);
        self
    }

    /// Validate the configuration and scatter the initial food sources.
    ///
    /// Uses the configured seed, or OS entropy if none was set.
    pub fn build(self) -> Result<Hive<O>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Like [`build`](#method.build), drawing every random number from `rng`.
    pub fn build_with_rng<R: Rng>(self, mut rng: R) -> Result<Hive<O, R>> {
        let space = SearchSpace::new(self.dimensions, self.bounds)?;
        if self.config.population < 2 {
            return Err(Error::config(format!(
                "hive needs at least two food sources, got {}",
                self.config.population
            )));
        }
        if self.config.abandonment_limit == 0 {
            return Err(Error::config("abandonment limit must be at least one"));
        }

        let sources = (0..self.config.population)
            .map(|_| FoodSource::new(Candidate::unevaluated(space.sample(&mut rng))))
            .collect::<Vec<_>>();

        Ok(Hive {
            objective: self.objective,
            space,
            config: self.config,
            scale: self.scale,
            rng,
            sources,
            best: None,
            selection: Selection::Uniform,
            rounds: 0,
            initialized: false,
            control: self.control,
        })
    }
}

/// How onlookers pick sources during the current round.
enum Selection {
    Roulette(Roulette),
    Uniform,
}

/// Runs Karaboga's Artificial Bee Colony algorithm.
///
/// Each round has three phases, always in this order:
///
/// 1. **Employed bees.** Every source `i` is explored once: a partner `k` is
///    drawn uniformly (it may be `i` itself), and the variant
///    `x_i + φ ⊙ (x_i − x_k)`, with each `φ` component uniform in `[-1, 1]`,
///    is clamped to the bounds and evaluated. A strictly better variant
///    replaces the source and clears its trial counter; otherwise the counter
///    goes up by one.
/// 2. **Onlooker bees.** The fitnesses left by the employed phase are scaled
///    into weights, and `N` onlookers each pick a source by roulette (with
///    replacement) and explore it exactly as above.
/// 3. **Scouts.** Every source whose counter exceeds the abandonment limit is
///    resampled uniformly over the bounds, re-evaluated, and its counter
///    cleared.
///
/// # Examples
///
/// ```
/// use swarmopt::HiveBuilder;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let mut hive = HiveBuilder::new(sphere, 2, (-10.0, 10.0))
///     .set_population(20)
///     .set_iterations(100)
///     .set_seed(7)
///     .build()
///     .unwrap();
///
/// let best = hive.optimize().unwrap();
/// assert!(best.position.iter().all(|x| (-10.0..=10.0).contains(x)));
/// assert!(best.fitness < 1.0);
/// ```
pub struct Hive<O, R = StdRng> {
    objective: O,
    space: SearchSpace,
    config: HiveConfig,
    scale: Box<ScalingFunction>,
    rng: R,

    sources: Vec<FoodSource>,
    best: Option<Candidate>,
    selection: Selection,
    rounds: usize,
    initialized: bool,

    control: RunControl,
}

impl<O, R> Debug for Hive<O, R> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for source in &self.sources {
            writeln!(f, "..{:?} ({} trials)..", source.candidate(), source.trials())?;
        }
        match self.best.as_ref() {
            Some(best) => write!(f, ">>{:?}<<", best),
            None => write!(f, ">>round {}<<", self.rounds),
        }
    }
}

impl<O: Objective, R: Rng> Hive<O, R> {
    /// The settings this hive was built with.
    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// The region being searched.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// The current food sources, in a fixed order.
    pub fn food_sources(&self) -> &[FoodSource] {
        &self.sources
    }

    /// Rounds completed since the population was last evaluated.
    pub fn rounds_completed(&self) -> usize {
        self.rounds
    }

    /// The answer the hive would give right now, under its tracking mode.
    ///
    /// Before the population has been evaluated, every fitness is infinite.
    pub fn best(&self) -> Candidate {
        match (self.config.best_tracking, self.best.as_ref()) {
            (BestTracking::RunningBest, Some(best)) => best.clone(),
            _ => self.population_best().clone(),
        }
    }

    /// Evaluates every food source, clearing trial counters and the round
    /// count.
    ///
    /// [`optimize`](#method.optimize) calls this itself. It only needs
    /// calling directly before driving the hive with [`step`](#method.step),
    /// and even then `step` will do it on first use.
    pub fn initialize(&mut self) -> Result<()> {
        self.best = None;
        self.rounds = 0;
        for i in 0..self.sources.len() {
            let position = self.sources[i].candidate().position.clone();
            let fitness = objective::evaluate(&self.objective, &position)?;
            let evaluated = Candidate::new(position, fitness);
            self.consider_improvement(&evaluated);
            self.sources[i].replace(evaluated);
        }
        self.initialized = true;
        Ok(())
    }

    /// Runs exactly one round: employed, onlooker and scout phases.
    pub fn step(&mut self) -> Result<()> {
        if !self.initialized {
            self.initialize()?;
        }
        for task in TaskGenerator::new(self.sources.len()).max_rounds(1) {
            self.execute(&task)?;
        }
        self.finish_round();
        Ok(())
    }

    /// Evaluates the population, runs the configured number of rounds, then
    /// returns the best candidate.
    ///
    /// The run ends early, with the best-so-far, if the stop handle is raised
    /// or the progress receiver is dropped. If the objective fails, the run is
    /// aborted and the error returned.
    pub fn optimize(&mut self) -> Result<Candidate> {
        let _span = tracing::info_span!(
            "abc",
            population = self.sources.len(),
            dimensions = self.space.dimensions()
        )
        .entered();
        tracing::info!(iterations = self.config.iterations, "starting bee colony");

        self.initialize()?;

        let mut tasks = TaskGenerator::new(self.sources.len()).max_rounds(self.config.iterations);
        while let Some(task) = tasks.next() {
            self.execute(&task)?;
            if task == Task::Scout {
                self.finish_round();
                let keep_going = self.control.report(|| Progress {
                    iteration: self.rounds,
                    best: self.best(),
                });
                if !keep_going {
                    tracing::info!(round = tasks.round, "bee colony stopped early");
                    tasks.stop();
                }
            }
        }

        let best = self.best();
        tracing::info!(rounds = self.rounds, best = best.fitness, "bee colony finished");
        Ok(best)
    }

    fn population_best(&self) -> &Candidate {
        let index = self
            .sources
            .iter()
            .position_min_by(|a, b| a.candidate().fitness.total_cmp(&b.candidate().fitness))
            .unwrap_or(0);
        self.sources[index].candidate()
    }

    fn finish_round(&mut self) {
        self.rounds += 1;
        tracing::debug!(
            round = self.rounds,
            best = self.best().fitness,
            "round complete"
        );
    }

    fn execute(&mut self, task: &Task) -> Result<()> {
        match *task {
            Task::Employed(n) => self.work_on(n),
            Task::Onlooker(n) => {
                if n == 0 {
                    self.selection = self.onlooker_selection();
                }
                let index = self.choose();
                self.work_on(index)
            }
            Task::Scout => self.scout(),
        }
    }

    fn onlooker_selection(&self) -> Selection {
        let fitnesses = self
            .sources
            .iter()
            .map(|source| source.candidate().fitness)
            .collect::<Vec<f64>>();
        let weights = (self.scale)(&fitnesses);

        let roulette = if weights.len() == fitnesses.len() {
            Roulette::new(&weights)
        } else {
            None
        };
        match roulette {
            Some(roulette) => Selection::Roulette(roulette),
            None => {
                tracing::warn!(
                    round = self.rounds + 1,
                    "onlooker weights are not a distribution, choosing uniformly"
                );
                Selection::Uniform
            }
        }
    }

    fn choose(&mut self) -> usize {
        match self.selection {
            Selection::Roulette(ref roulette) => roulette.spin(&mut self.rng),
            Selection::Uniform => self.rng.gen_range(0..self.sources.len()),
        }
    }

    fn work_on(&mut self, index: usize) -> Result<()> {
        let partner = self.rng.gen_range(0..self.sources.len());
        let phi = (0..self.space.dimensions())
            .map(|_| self.rng.gen_range(-1.0..=1.0))
            .collect::<Vec<f64>>();

        let current = &self.sources[index].candidate().position;
        let other = &self.sources[partner].candidate().position;
        let step = vector::mul(&phi, &vector::sub(current, other)?)?;
        let mut position = vector::add(current, &step)?;
        self.space.clamp(&mut position)?;

        let fitness = objective::evaluate(&self.objective, &position)?;
        let variant = Candidate::new(position, fitness);

        if variant.improves_on(self.sources[index].candidate()) {
            self.consider_improvement(&variant);
            self.sources[index].replace(variant);
        } else {
            self.sources[index].deplete();
        }
        Ok(())
    }

    fn scout(&mut self) -> Result<()> {
        let limit = self.config.abandonment_limit;
        for i in 0..self.sources.len() {
            if !self.sources[i].expired(limit) {
                continue;
            }
            tracing::trace!(
                source = i,
                trials = self.sources[i].trials(),
                "abandoning food source"
            );
            let position = self.space.sample(&mut self.rng);
            let fitness = objective::evaluate(&self.objective, &position)?;
            let scouted = Candidate::new(position, fitness);
            self.consider_improvement(&scouted);
            self.sources[i].replace(scouted);
        }
        Ok(())
    }

    fn consider_improvement(&mut self, candidate: &Candidate) {
        if self.config.best_tracking != BestTracking::RunningBest {
            return;
        }
        let improved = match self.best.as_ref() {
            Some(best) => candidate.improves_on(best),
            None => true,
        };
        if improved {
            self.best = Some(candidate.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::fmt;

    use crossbeam::channel::unbounded;

    use crate::objective::Fallible;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "broken objective")
        }
    }

    impl std::error::Error for Broken {}

    #[test]
    fn rejects_small_populations_and_bad_bounds() {
        let too_small = HiveBuilder::new(sphere, 2, (-1.0, 1.0))
            .set_population(1)
            .build();
        assert!(matches!(too_small, Err(Error::InvalidConfiguration(_))));

        let inverted = HiveBuilder::new(sphere, 2, (1.0, -1.0)).build();
        assert!(matches!(inverted, Err(Error::InvalidConfiguration(_))));

        let empty = HiveBuilder::new(sphere, 2, (2.0, 2.0)).build();
        assert!(matches!(empty, Err(Error::InvalidConfiguration(_))));

        let no_limit = HiveBuilder::new(sphere, 2, (-1.0, 1.0))
            .set_abandonment_limit(0)
            .build();
        assert!(matches!(no_limit, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn build_does_not_evaluate() {
        let calls = Cell::new(0);
        let counting = |x: &[f64]| {
            calls.set(calls.get() + 1);
            sphere(x)
        };
        let hive = HiveBuilder::new(&counting, 3, (-1.0, 1.0))
            .set_seed(1)
            .build()
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert!(hive
            .food_sources()
            .iter()
            .all(|s| s.candidate().fitness == f64::INFINITY));
    }

    #[test]
    fn evaluations_per_round() {
        // N initial, then N employed + N onlookers per round, plus one per scout.
        let calls = Cell::new(0);
        let counting = |x: &[f64]| {
            calls.set(calls.get() + 1);
            sphere(x)
        };
        let mut hive = HiveBuilder::new(&counting, 2, (-5.0, 5.0))
            .set_population(8)
            .set_iterations(1)
            .set_seed(3)
            .build()
            .unwrap();
        hive.optimize().unwrap();
        // No source can collect 11 failed visits in one round with only 8
        // onlookers, so no scout fires.
        assert_eq!(calls.get(), 8 + 8 + 8);
    }

    #[test]
    fn positions_stay_in_bounds() {
        let space = SearchSpace::new(3, (-2.0, 2.0)).unwrap();
        let seen_outside = Cell::new(false);
        let watching = |x: &[f64]| {
            if !space.contains(x) {
                seen_outside.set(true);
            }
            // Pulls everything towards a corner, so clamping gets exercised.
            x.iter().map(|v| (v - 5.0).powi(2)).sum::<f64>()
        };
        let mut hive = HiveBuilder::new(&watching, 3, (-2.0, 2.0))
            .set_population(10)
            .set_seed(5)
            .build()
            .unwrap();
        for _ in 0..30 {
            hive.step().unwrap();
            assert!(hive
                .food_sources()
                .iter()
                .all(|s| space.contains(&s.candidate().position)));
        }
        assert!(!seen_outside.get());
        assert_eq!(hive.rounds_completed(), 30);
    }

    #[test]
    fn fitness_matches_position() {
        let mut hive = HiveBuilder::new(sphere, 2, (-3.0, 3.0))
            .set_population(6)
            .set_seed(9)
            .build()
            .unwrap();
        for _ in 0..20 {
            hive.step().unwrap();
            for source in hive.food_sources() {
                let c = source.candidate();
                assert_eq!(c.fitness, sphere(&c.position));
            }
        }
    }

    #[test]
    fn stale_sources_are_scouted_in_the_same_round() {
        // A flat objective never improves, so every visit depletes.
        let flat = |_: &[f64]| 1.0;
        let mut hive = HiveBuilder::new(flat, 2, (-1.0, 1.0))
            .set_population(5)
            .set_abandonment_limit(10)
            .set_seed(21)
            .build()
            .unwrap();
        hive.initialize().unwrap();

        let mut scouted = 0;
        for _ in 0..40 {
            let before = hive
                .food_sources()
                .iter()
                .map(|s| (s.candidate().position.clone(), s.trials()))
                .collect::<Vec<_>>();
            hive.step().unwrap();
            for (source, (position, trials)) in hive.food_sources().iter().zip(before) {
                assert!(source.trials() <= 10);
                if source.candidate().position != position {
                    // Only a scout can move a source on a flat landscape.
                    assert_eq!(source.trials(), 0);
                    scouted += 1;
                } else {
                    // Everyone is visited at least once per round.
                    assert!(source.trials() > trials);
                }
            }
        }
        assert!(scouted > 0);
    }

    #[test]
    fn tracking_modes() {
        // The best value ever seen only lives in the population until a scout
        // abandons it; running-best mode keeps it regardless.
        let run = |tracking| {
            let mut hive = HiveBuilder::new(sphere, 2, (-10.0, 10.0))
                .set_population(10)
                .set_iterations(60)
                .set_abandonment_limit(1)
                .set_best_tracking(tracking)
                .set_seed(17)
                .build()
                .unwrap();
            let best = hive.optimize().unwrap();
            let population_min = hive
                .food_sources()
                .iter()
                .map(|s| s.candidate().fitness)
                .fold(f64::INFINITY, f64::min);
            (best, population_min)
        };

        let (final_best, final_min) = run(BestTracking::FinalPopulation);
        assert_eq!(final_best.fitness, final_min);

        let (running_best, running_min) = run(BestTracking::RunningBest);
        assert!(running_best.fitness <= running_min);
        assert_eq!(running_best.fitness, sphere(&running_best.position));
    }

    #[test]
    fn final_population_forgets_abandoned_sources() {
        // Only the very first evaluation (source 0 at initialization) is good.
        // Nothing can beat it, so source 0 goes stale, a scout replaces it,
        // and the final population no longer holds that value.
        let run = |tracking| {
            let calls = Cell::new(0);
            let one_lucky_sample = |_: &[f64]| {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    0.0
                } else {
                    1.0
                }
            };
            let mut hive = HiveBuilder::new(&one_lucky_sample, 2, (-1.0, 1.0))
                .set_population(4)
                .set_iterations(5)
                .set_abandonment_limit(1)
                .set_best_tracking(tracking)
                .set_seed(13)
                .build()
                .unwrap();
            let first_position = hive.food_sources()[0].candidate().position.clone();
            let best = hive.optimize().unwrap();
            (best, first_position)
        };

        let (final_best, _) = run(BestTracking::FinalPopulation);
        let (running_best, first_position) = run(BestTracking::RunningBest);
        assert_eq!(final_best.fitness, 1.0);
        assert_eq!(running_best.fitness, 0.0);
        assert_eq!(running_best.position, first_position);
        assert!(running_best.fitness < final_best.fitness);
    }

    #[test]
    fn running_best_is_lowest_value_ever_returned() {
        let values = RefCell::new(Vec::new());
        let recording = |x: &[f64]| {
            let value = sphere(x);
            values.borrow_mut().push(value);
            value
        };
        let best = HiveBuilder::new(&recording, 2, (-10.0, 10.0))
            .set_population(10)
            .set_iterations(40)
            .set_abandonment_limit(1)
            .set_best_tracking(BestTracking::RunningBest)
            .set_seed(17)
            .build()
            .unwrap()
            .optimize()
            .unwrap();
        let lowest = values.into_inner().into_iter().fold(f64::INFINITY, f64::min);
        assert_eq!(best.fitness, lowest);
        assert_eq!(best.fitness, sphere(&best.position));
    }

    #[test]
    fn running_best_never_regresses() {
        let (sender, receiver) = unbounded();
        let mut hive = HiveBuilder::new(sphere, 3, (-5.0, 5.0))
            .set_population(10)
            .set_iterations(50)
            .set_abandonment_limit(2)
            .set_best_tracking(BestTracking::RunningBest)
            .set_progress(sender)
            .set_seed(4)
            .build()
            .unwrap();
        let best = hive.optimize().unwrap();
        drop(hive);

        let values = receiver.iter().map(|p| p.best.fitness).collect::<Vec<_>>();
        assert_eq!(values.len(), 50);
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*values.last().unwrap(), best.fitness);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let trace = RefCell::new(Vec::new());
            let recording = |x: &[f64]| {
                trace.borrow_mut().push(x.to_vec());
                sphere(x)
            };
            let best = HiveBuilder::new(&recording, 2, (-4.0, 4.0))
                .set_population(6)
                .set_iterations(15)
                .set_seed(seed)
                .build()
                .unwrap()
                .optimize()
                .unwrap();
            (best, trace.into_inner())
        };

        let (a, trace_a) = run(99);
        let (b, trace_b) = run(99);
        assert_eq!(a, b);
        assert_eq!(trace_a, trace_b);

        let (_, trace_c) = run(100);
        assert_ne!(trace_a, trace_c);
    }

    #[test]
    fn objective_failure_aborts() {
        let calls = Cell::new(0);
        let failing = Fallible(|x: &[f64]| {
            calls.set(calls.get() + 1);
            if calls.get() > 25 {
                Err(Broken)
            } else {
                Ok(sphere(x))
            }
        });
        let mut hive = HiveBuilder::new(failing, 2, (-1.0, 1.0))
            .set_population(5)
            .set_seed(2)
            .build()
            .unwrap();
        match hive.optimize() {
            Err(Error::ObjectiveEvaluation { position, source }) => {
                assert_eq!(position.len(), 2);
                assert_eq!(source.to_string(), "broken objective");
            }
            other => panic!("expected an evaluation error, got {:?}", other),
        }
        assert_eq!(calls.get(), 26);
    }

    #[test]
    fn stop_handle_ends_between_rounds() {
        let handle = StopHandle::new();
        let calls = Cell::new(0);
        let remote = handle.clone();
        let stopping = |x: &[f64]| {
            calls.set(calls.get() + 1);
            if calls.get() == 30 {
                remote.stop();
            }
            sphere(x)
        };
        let mut hive = HiveBuilder::new(&stopping, 2, (-1.0, 1.0))
            .set_population(4)
            .set_iterations(1_000)
            .set_stop_handle(handle)
            .set_seed(8)
            .build()
            .unwrap();
        let best = hive.optimize().unwrap();
        assert!(hive.rounds_completed() < 1_000);
        assert!(hive.rounds_completed() >= 1);
        assert!(best.fitness.is_finite());
    }

    #[test]
    fn negative_objectives_fall_back_to_uniform_onlookers() {
        let shifted = |x: &[f64]| sphere(x) - 100.0;
        let mut hive = HiveBuilder::new(shifted, 2, (-3.0, 3.0))
            .set_population(6)
            .set_iterations(20)
            .set_seed(12)
            .build()
            .unwrap();
        let best = hive.optimize().unwrap();
        assert!(best.fitness < -90.0);
    }

    #[test]
    fn custom_rng_is_used() {
        let build = || {
            HiveBuilder::new(sphere, 2, (-1.0, 1.0))
                .set_population(3)
                .build_with_rng(StdRng::seed_from_u64(42))
                .unwrap()
        };
        let a = build();
        let b = build();
        for (x, y) in a.food_sources().iter().zip(b.food_sources()) {
            assert_eq!(x.candidate().position, y.candidate().position);
        }
    }
}
