//! Genealogy Simulation Benchmark
//!
//! Seeds a population and runs a number of years without the server.
//! Usage: genealogy-bench [population] [years] [seed]

use std::time::Instant;

use simulation::SimulationWorld;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(index) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let initial_pop: usize = arg(&args, 1, 10_000)?;
    let years: u32 = arg(&args, 2, 50)?;
    let seed: u64 = arg(&args, 3, 1990)?;

    info!(initial_pop, years, seed, "genealogy simulation starting");
    let mut world = SimulationWorld::with_seed(seed);
    world.seed_population(initial_pop);

    let start = Instant::now();
    let (mut births, mut deaths, mut unions) = (0u64, 0u64, 0u64);
    for _ in 0..years {
        let summary = world.tick();
        births += u64::from(summary.births);
        deaths += u64::from(summary.deaths);
        unions += u64::from(summary.unions_formed);
    }
    let elapsed = start.elapsed();

    let counts = world.counts();
    info!(
        ?elapsed,
        per_year = ?(elapsed / years.max(1)),
        year = world.current_year(),
        births,
        deaths,
        unions,
        people = counts.people,
        living = counts.living,
        "benchmark complete"
    );

    Ok(())
}
