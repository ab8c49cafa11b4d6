//! Example: Screening the 20-input Morris function.
//!
//! Run with `RUST_LOG=morris_screening=debug` to see every trajectory draw.

use morris_screening::functions::MORRIS_DIMENSION;
use morris_screening::output::{format_result, to_json_pretty};
use morris_screening::{BoundedDomain, EffectPattern, MorrisFunction, MorrisScreening};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let model = MorrisFunction::new(7);
    let domain = BoundedDomain::unit(MORRIS_DIMENSION);

    let result = MorrisScreening::new()
        .trajectories(40)
        .base_size(80)
        .levels(4)
        .seed(42)
        .run(&model, &domain)?;

    println!("{}", format_result(&result));

    let stats = &result.statistics;
    let negligible: Vec<usize> = (0..MORRIS_DIMENSION)
        .filter(|&i| matches!(stats.pattern(0, i), Ok(EffectPattern::Negligible)))
        .collect();
    println!("Negligible inputs: {:?}", negligible);

    if std::env::args().any(|a| a == "--json") {
        println!("{}", to_json_pretty(&result)?);
    }
    Ok(())
}
