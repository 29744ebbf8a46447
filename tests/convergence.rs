use std::cell::{Cell, RefCell};

use proptest::prelude::*;

use swarmopt::{BestTracking, Error, HiveBuilder, SwarmBuilder};

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    values[values.len() / 2]
}

#[test]
fn hive_converges_on_sphere() {
    let results = (0..5)
        .map(|seed| {
            HiveBuilder::new(sphere, 2, (-10.0, 10.0))
                .set_population(30)
                .set_iterations(200)
                .set_seed(seed)
                .build()
                .unwrap()
                .optimize()
                .unwrap()
                .fitness
        })
        .collect::<Vec<_>>();
    assert!(median(results) < 1e-2);
}

#[test]
fn swarm_converges_on_sphere() {
    let results = (0..5)
        .map(|seed| {
            SwarmBuilder::new(sphere, 2, (-10.0, 10.0))
                .set_population(30)
                .set_iterations(200)
                .set_seed(seed)
                .build()
                .unwrap()
                .optimize()
                .unwrap()
                .fitness
        })
        .collect::<Vec<_>>();
    assert!(median(results) < 1e-2);
}

#[test]
fn vanishingly_narrow_interval() {
    let bounds = (5.0, 5.0 + 1e-9);

    let bees = HiveBuilder::new(sphere, 1, bounds)
        .set_population(5)
        .set_iterations(30)
        .set_seed(1)
        .build()
        .unwrap()
        .optimize()
        .unwrap();
    assert!(bees.position[0] >= bounds.0 && bees.position[0] <= bounds.1);

    let particles = SwarmBuilder::new(sphere, 1, bounds)
        .set_population(5)
        .set_iterations(30)
        .set_seed(1)
        .build()
        .unwrap()
        .optimize()
        .unwrap();
    assert!(particles.position[0] >= bounds.0 && particles.position[0] <= bounds.1);
}

#[test]
fn population_minimums() {
    assert!(matches!(
        HiveBuilder::new(sphere, 2, (-1.0, 1.0))
            .set_population(1)
            .build(),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(HiveBuilder::new(sphere, 2, (-1.0, 1.0))
        .set_population(2)
        .build()
        .is_ok());

    assert!(matches!(
        SwarmBuilder::new(sphere, 2, (-1.0, 1.0))
            .set_population(0)
            .build(),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(SwarmBuilder::new(sphere, 2, (-1.0, 1.0))
        .set_population(1)
        .build()
        .is_ok());
}

#[test]
fn running_best_is_at_least_as_good() {
    for seed in 0..5 {
        let run = |tracking| {
            let values = RefCell::new(Vec::new());
            let recording = |x: &[f64]| {
                let value = sphere(x);
                values.borrow_mut().push(value);
                value
            };
            let best = HiveBuilder::new(&recording, 3, (-5.0, 5.0))
                .set_population(10)
                .set_iterations(50)
                .set_abandonment_limit(3)
                .set_best_tracking(tracking)
                .set_seed(seed)
                .build()
                .unwrap()
                .optimize()
                .unwrap();
            let lowest = values.into_inner().into_iter().fold(f64::INFINITY, f64::min);
            (best, lowest)
        };
        // Same seed, same trajectory; only the reported answer differs.
        let (final_population, lowest) = run(BestTracking::FinalPopulation);
        let (running, running_lowest) = run(BestTracking::RunningBest);
        assert_eq!(lowest, running_lowest);
        assert_eq!(running.fitness, lowest);
        assert!(running.fitness <= final_population.fitness);
    }
}

#[test]
fn tracking_modes_disagree_once_the_best_is_abandoned() {
    let run = |tracking| {
        let calls = Cell::new(0);
        // Only the first evaluation is good; a scout eventually discards it.
        let one_lucky_sample = |_: &[f64]| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                -1.0
            } else {
                0.5
            }
        };
        HiveBuilder::new(&one_lucky_sample, 3, (-5.0, 5.0))
            .set_population(6)
            .set_iterations(10)
            .set_abandonment_limit(1)
            .set_best_tracking(tracking)
            .set_seed(2)
            .build()
            .unwrap()
            .optimize()
            .unwrap()
    };
    let final_population = run(BestTracking::FinalPopulation);
    let running = run(BestTracking::RunningBest);
    assert_eq!(final_population.fitness, 0.5);
    assert_eq!(running.fitness, -1.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn answers_stay_in_bounds(
        seed in any::<u64>(),
        low in -100.0f64..0.0,
        width in 1e-6f64..50.0,
        dimensions in 1usize..5,
    ) {
        let high = low + width;
        // Optimum far outside the box, so every run presses on the edge.
        let shifted = |x: &[f64]| x.iter().map(|v| (v - 500.0).powi(2)).sum::<f64>();

        let bees = HiveBuilder::new(shifted, dimensions, (low, high))
            .set_population(6)
            .set_iterations(10)
            .set_seed(seed)
            .build()
            .unwrap()
            .optimize()
            .unwrap();
        prop_assert_eq!(bees.position.len(), dimensions);
        prop_assert!(bees.position.iter().all(|x| *x >= low && *x <= high));

        let particles = SwarmBuilder::new(shifted, dimensions, (low, high))
            .set_population(6)
            .set_iterations(10)
            .set_seed(seed)
            .build()
            .unwrap()
            .optimize()
            .unwrap();
        prop_assert_eq!(particles.position.len(), dimensions);
        prop_assert!(particles.position.iter().all(|x| *x >= low && *x <= high));
    }
}
