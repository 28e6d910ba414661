//! Purchase Example
//!
//! Plans a purchase for a fixture set and prints the result.
//!
//! Use `-f` to load a fixture set by name
//! Use `-a` to pick the algorithm (`per-item`, `brute-force`, `sweep`, `greedy`, `ilp`)
//! Use `-k` for the subset size, largest sweep size, or ILP vendor limit
//! Set `RUST_LOG=debug` to follow the solver step by step

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lotpick::{
    fixtures::Fixture,
    observer::TracingObserver,
    solvers::{brute_force::sweep_with_observer, solve_with_observer},
    summary::{write_breakdown, write_ranking},
    utils::ExamplePurchaseArgs,
    validation::validate,
};

/// Purchase Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()?;

    let args = ExamplePurchaseArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let currency = fixture.currency()?;
    let vendors = fixture.vendors();
    let mut observer = TracingObserver;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let start = Instant::now();

    let Some(algorithm) = args.algorithm() else {
        let max_k = args.k.unwrap_or(vendors.len());
        let results = sweep_with_observer(
            fixture.wanted(),
            fixture.lots(),
            max_k,
            args.top,
            &mut observer,
        );

        let elapsed = start.elapsed();

        for (k, solutions) in &results {
            println!("\n{k} vendor(s):");
            write_ranking(&mut handle, solutions, currency)?;
        }

        println!("\nSolution: {}", elapsed.human(Truncate::Nano));

        return Ok(());
    };

    let solutions = solve_with_observer(
        &algorithm,
        fixture.wanted(),
        fixture.lots(),
        &vendors,
        &mut observer,
    )?;

    let elapsed = start.elapsed();

    println!("\nAlgorithm: {}", algorithm.name());

    write_ranking(&mut handle, &solutions, currency)?;

    if let Some(best) = solutions.first() {
        println!();
        write_breakdown(&mut handle, best, currency)?;

        for violation in validate(fixture.wanted(), &best.allocation, Some(&vendors)).violations() {
            println!(" Violation: {violation}");
        }
    }

    println!("\nSolution: {}", elapsed.human(Truncate::Nano));

    Ok(())
}
