use swarmopt::{BestTracking, HiveBuilder, SwarmBuilder};

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn main() -> swarmopt::Result<()> {
    let bees = HiveBuilder::new(sphere, 2, (-10.0, 10.0))
        .set_population(20)
        .set_iterations(100)
        .set_best_tracking(BestTracking::RunningBest)
        .build()?
        .optimize()?;
    println!("ABC best position: {:?}", bees.position);
    println!("ABC best value:    {}", bees.fitness);

    let particles = SwarmBuilder::new(sphere, 2, (-10.0, 10.0))
        .set_population(30)
        .set_iterations(100)
        .build()?
        .optimize()?;
    println!("PSO best position: {:?}", particles.position);
    println!("PSO best value:    {}", particles.fitness);
    Ok(())
}
