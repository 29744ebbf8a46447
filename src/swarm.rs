use std::fmt::{Debug, Formatter, Result as FmtResult};

use crossbeam::channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::Candidate;
use crate::control::{Progress, RunControl, StopHandle};
use crate::objective::{self, Objective};
use crate::result::{Error, Result};
use crate::space::SearchSpace;
use crate::vector;

/// Tunable settings of a swarm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmConfig {
    /// Number of particles.
    pub population: usize,

    /// Iterations run by [`Swarm::optimize`](struct.Swarm.html#method.optimize).
    pub iterations: usize,

    /// Weight `w` on a particle's previous velocity.
    pub inertia: f64,

    /// Weight `c1` on the pull towards the particle's own best.
    pub cognitive: f64,

    /// Weight `c2` on the pull towards the swarm's best.
    pub social: f64,

    /// Initial velocities are drawn uniformly from `[-v, v]` per component.
    pub initial_velocity: f64,
}

impl Default for SwarmConfig {
    fn default() -> SwarmConfig {
        SwarmConfig {
            population: 30,
            iterations: 100,
            inertia: 0.5,
            cognitive: 1.0,
            social: 2.0,
            initial_velocity: 1.0,
        }
    }
}

/// One member of the swarm.
#[derive(Clone, Debug)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best: Candidate,
}

impl Particle {
    /// Current position, always inside the bounds.
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity. Never clamped.
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Best position this particle has visited, with its value.
    ///
    /// Infinite until the particle is first evaluated.
    pub fn personal_best(&self) -> &Candidate {
        &self.best
    }
}

/// Builds a [`Swarm`](struct.Swarm.html).
pub struct SwarmBuilder<O> {
    objective: O,
    dimensions: usize,
    bounds: (f64, f64),
    config: SwarmConfig,
    seed: Option<u64>,
    control: RunControl,
}

impl<O: Objective> SwarmBuilder<O> {
    /// Start building a swarm that minimizes `objective` over
    /// `[bounds.0, bounds.1]^dimensions`.
    pub fn new(objective: O, dimensions: usize, bounds: (f64, f64)) -> SwarmBuilder<O> {
        SwarmBuilder {
            objective,
            dimensions,
            bounds,
            config: SwarmConfig::default(),
            seed: None,
            control: RunControl::default(),
        }
    }

    /// Replace every tunable setting at once.
    pub fn set_config(mut self, config: SwarmConfig) -> SwarmBuilder<O> {
        self.config = config;
        self
    }

    /// Set the number of particles.
    pub fn set_population(mut self, population: usize) -> SwarmBuilder<O> {
        self.config.population = population;
        self
    }

    /// Set the number of iterations to run.
    pub fn set_iterations(mut self, iterations: usize) -> SwarmBuilder<O> {
        self.config.iterations = iterations;
        self
    }

    /// Set the inertia, cognitive and social weights.
    pub fn set_coefficients(
        mut self,
        inertia: f64,
        cognitive: f64,
        social: f64,
    ) -> SwarmBuilder<O> {
        self.config.inertia = inertia;
        self.config.cognitive = cognitive;
        self.config.social = social;
        self
    }

    /// Set the range initial velocity components are drawn from.
    pub fn set_initial_velocity(mut self, magnitude: f64) -> SwarmBuilder<O> {
        self.config.initial_velocity = magnitude;
        self
    }

    /// Seed the swarm's random number generator, for reproducible runs.
    pub fn set_seed(mut self, seed: u64) -> SwarmBuilder<O> {
        self.seed = Some(seed);
        self
    }

    /// Let `handle` stop the swarm between iterations.
    pub fn set_stop_handle(mut self, handle: StopHandle) -> SwarmBuilder<O> {
        self.control.stop = handle;
        self
    }

    /// Post a [`Progress`](struct.Progress.html) to `sender` after every iteration.
    pub fn set_progress(mut self, sender: Sender<Progress>) -> SwarmBuilder<O> {
        self.control.progress = Some(sender);
        self
    }

    /// Validate the configuration and scatter the particles.
    pub fn build(self) -> Result<Swarm<O>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Like [`build`](#method.build), drawing every random number from `rng`.
    pub fn build_with_rng<R: Rng>(self, mut rng: R) -> Result<Swarm<O, R>> {
        let space = SearchSpace::new(self.dimensions, self.bounds)?;
        let config = self.config;
        if config.population < 1 {
            return Err(Error::config("swarm needs at least one particle"));
        }
        for (name, value) in [
            ("inertia", config.inertia),
            ("cognitive", config.cognitive),
            ("social", config.social),
        ] {
            if !value.is_finite() {
                return Err(Error::config(format!(
                    "{} coefficient must be finite, got {}",
                    name, value
                )));
            }
        }
        if !config.initial_velocity.is_finite() || config.initial_velocity < 0.0 {
            return Err(Error::config(format!(
                "initial velocity must be finite and non-negative, got {}",
                config.initial_velocity
            )));
        }

        let v = config.initial_velocity;
        let particles = (0..config.population)
            .map(|_| {
                let position = space.sample(&mut rng);
                let velocity = (0..space.dimensions())
                    .map(|_| rng.gen_range(-v..=v))
                    .collect();
                Particle {
                    best: Candidate::unevaluated(position.clone()),
                    position,
                    velocity,
                }
            })
            .collect::<Vec<_>>();
        let global_best = Candidate::unevaluated(space.sample(&mut rng));

        Ok(Swarm {
            objective: self.objective,
            space,
            config,
            rng,
            particles,
            global_best,
            iterations: 0,
            control: self.control,
        })
    }
}

/// Runs Particle Swarm Optimization.
///
/// Every iteration:
///
/// 1. Each particle is evaluated where it stands. A strictly better value
///    becomes its personal best, and, if it also beats the swarm's best so
///    far, the global best.
/// 2. Each particle draws `r1, r2` uniform in `[0, 1]` and updates
///    `v = w·v + c1·r1·(p_best − x) + c2·r2·(g_best − x)`, using the global
///    best as it stands after step 1 of this same iteration.
/// 3. Each particle moves, `x += v`, and is clamped to the bounds. The
///    velocity itself is left unclamped.
///
/// The global best is kept across the whole run, so it never gets worse.
///
/// # Examples
///
/// ```
/// use swarmopt::SwarmBuilder;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let mut swarm = SwarmBuilder::new(sphere, 2, (-10.0, 10.0))
///     .set_seed(3)
///     .build()
///     .unwrap();
///
/// let (position, value) = swarm.optimize().unwrap().into_parts();
/// assert_eq!(position.len(), 2);
/// assert!(value < 1.0);
/// ```
pub struct Swarm<O, R = StdRng> {
    objective: O,
    space: SearchSpace,
    config: SwarmConfig,
    rng: R,

    particles: Vec<Particle>,
    global_best: Candidate,
    iterations: usize,

    control: RunControl,
}

impl<O, R> Debug for Swarm<O, R> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for particle in &self.particles {
            writeln!(f, "..{:?} -> {:?}..", particle.best, particle.position)?;
        }
        write!(f, ">>{:?}<<", self.global_best)
    }
}

impl<O: Objective, R: Rng> Swarm<O, R> {
    /// The settings this swarm was built with.
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// The region being searched.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// The particles, in a fixed order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Best position seen by any particle so far.
    ///
    /// Before the first iteration this is a random placeholder with an
    /// infinite value.
    pub fn global_best(&self) -> &Candidate {
        &self.global_best
    }

    /// Iterations completed over the swarm's lifetime.
    pub fn iterations_completed(&self) -> usize {
        self.iterations
    }

    /// Runs exactly one iteration: evaluate, then move every particle.
    pub fn step(&mut self) -> Result<()> {
        self.evaluate_all()?;
        self.fly()?;
        self.iterations += 1;
        tracing::debug!(
            iteration = self.iterations,
            best = self.global_best.fitness,
            "iteration complete"
        );
        Ok(())
    }

    /// Runs the configured number of iterations and returns the global best.
    ///
    /// Calling this again continues from where the swarm left off. The run
    /// ends early, with the best-so-far, if the stop handle is raised or the
    /// progress receiver is dropped. If the objective fails, the run is
    /// aborted and the error returned.
    pub fn optimize(&mut self) -> Result<Candidate> {
        let _span = tracing::info_span!(
            "pso",
            population = self.particles.len(),
            dimensions = self.space.dimensions()
        )
        .entered();
        tracing::info!(iterations = self.config.iterations, "starting particle swarm");

        for _ in 0..self.config.iterations {
            self.step()?;
            let keep_going = self.control.report(|| Progress {
                iteration: self.iterations,
                best: self.global_best.clone(),
            });
            if !keep_going {
                tracing::info!(iteration = self.iterations, "particle swarm stopped early");
                break;
            }
        }

        tracing::info!(
            iterations = self.iterations,
            best = self.global_best.fitness,
            "particle swarm finished"
        );
        Ok(self.global_best.clone())
    }

    fn evaluate_all(&mut self) -> Result<()> {
        for particle in &mut self.particles {
            let value = objective::evaluate(&self.objective, &particle.position)?;
            if value < particle.best.fitness {
                particle.best = Candidate::new(particle.position.clone(), value);
            }
            if particle.best.improves_on(&self.global_best) {
                self.global_best = particle.best.clone();
            }
        }
        Ok(())
    }

    fn fly(&mut self) -> Result<()> {
        let SwarmConfig {
            inertia,
            cognitive,
            social,
            ..
        } = self.config;
        let global = &self.global_best.position;

        for particle in &mut self.particles {
            let r1 = self.rng.gen_range(0.0..=1.0);
            let r2 = self.rng.gen_range(0.0..=1.0);

            let momentum = vector::scale(&particle.velocity, inertia);
            let towards_own = vector::scale(
                &vector::sub(&particle.best.position, &particle.position)?,
                cognitive * r1,
            );
            let towards_swarm = vector::scale(&vector::sub(global, &particle.position)?, social * r2);
            particle.velocity =
                vector::add(&vector::add(&momentum, &towards_own)?, &towards_swarm)?;

            vector::add_assign(&mut particle.position, &particle.velocity)?;
            self.space.clamp(&mut particle.position)?;
        }
        Ok(())
    }
}
