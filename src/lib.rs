#![doc(html_root_url = "https://daviddonna.github.io/swarmopt/")]
#![warn(missing_docs)]

//! Minimizes a black-box objective over a box-bounded real search space with
//! one of two population-based optimizers:
//!
//! * [`Hive`](struct.Hive.html) runs Karaboga's Artificial Bee Colony (ABC)
//!   algorithm: employed bees, onlookers and scouts.
//! * [`Swarm`](struct.Swarm.html) runs Particle Swarm Optimization (PSO)
//!   with inertia, cognitive and social weights.
//!
//! Both are configured through a builder, validated once at `build`, and run
//! to completion by `optimize`, which returns the best
//! [`Candidate`](struct.Candidate.html) found. Neither needs gradients; the
//! objective is any [`Objective`](trait.Objective.html), which includes every
//! `Fn(&[f64]) -> f64`.
//!
//! Every random draw goes through the optimizer's own generator, so a seed
//! (or an injected [`Rng`](https://docs.rs/rand/0.8/rand/trait.Rng.html))
//! makes a run reproducible.
//!
//! # Examples
//!
//! ```
//! // Minimize the 2-dimensional Rastrigin function with both optimizers.
//!
//! use std::f64::consts::PI;
//! use swarmopt::{HiveBuilder, SwarmBuilder};
//!
//! fn rastrigin(x: &[f64]) -> f64 {
//!     let a = 10.0;
//!     a * x.len() as f64
//!         + x.iter()
//!             .map(|v| v * v - a * (2.0 * PI * v).cos())
//!             .sum::<f64>()
//! }
//!
//! let from_bees = HiveBuilder::new(rastrigin, 2, (-5.12, 5.12))
//!     .set_iterations(200)
//!     .set_seed(1)
//!     .build()
//!     .unwrap()
//!     .optimize()
//!     .unwrap();
//!
//! let from_particles = SwarmBuilder::new(rastrigin, 2, (-5.12, 5.12))
//!     .set_iterations(200)
//!     .set_seed(1)
//!     .build()
//!     .unwrap()
//!     .optimize()
//!     .unwrap();
//!
//! println!("ABC: {:?}", from_bees);
//! println!("PSO: {:?}", from_particles);
//! assert!(from_bees.fitness.is_finite() && from_particles.fitness.is_finite());
//! ```

mod candidate;
mod control;
mod hive;
mod objective;
mod result;
mod space;
mod swarm;
mod task;

pub mod scaling;
pub mod vector;

pub use candidate::{Candidate, FoodSource};
pub use control::{Progress, StopHandle};
pub use hive::{BestTracking, Hive, HiveBuilder, HiveConfig};
pub use objective::{Fallible, Objective};
pub use result::{Error, Result};
pub use space::{Bounds, SearchSpace};
pub use swarm::{Particle, Swarm, SwarmBuilder, SwarmConfig};
