use std::thread::spawn;

use crossbeam::channel::unbounded;

use swarmopt::{scaling, HiveBuilder, StopHandle};

fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

fn main() {
    let (sender, receiver) = unbounded();
    let stop = StopHandle::new();

    let mut hive = HiveBuilder::new(rosenbrock, 4, (-2.048, 2.048))
        .set_population(40)
        .set_iterations(100_000)
        .set_scaling(scaling::power_rank(2.0))
        .set_stop_handle(stop.clone())
        .set_progress(sender)
        .build()
        .unwrap();
    let worker = spawn(move || hive.optimize());

    // Print the first five rounds that get below 1e-2, then call it a day.
    for progress in receiver
        .iter()
        .skip_while(|p| p.best.fitness >= 1e-2)
        .take(5)
    {
        println!("round {}: {:?}", progress.iteration, progress.best);
    }
    stop.stop();
    drop(receiver);

    println!("{:?}", worker.join().unwrap());
}
