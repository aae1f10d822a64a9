// src/bin/verify.rs

use anyhow::{Context, Result};
use clap::Parser;
use exercise_ids::{
    process::{DEFAULT_INPUT, DEFAULT_OUTPUT},
    table::read_table,
    verify::verify,
    OrderPolicy,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Check an id-augmented CSV against the file it was produced from.
#[derive(Parser, Debug)]
struct Args {
    /// Original CSV
    #[arg(long, env = "EXERCISE_IDS_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// CSV with the id column
    #[arg(long, env = "EXERCISE_IDS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let input = read_table(&args.input)?;
    let output = read_table(&args.output)?;

    let report = verify(&input, &output).with_context(|| {
        format!(
            "{} is not a valid id mapping of {}",
            args.output.display(),
            args.input.display()
        )
    })?;
    info!(order = ?report.order, "verified");

    println!("\n{: <20} {:>10}", "Check", "Value");
    println!("{:-<31}", "");
    println!("{: <20} {:>10}", "rows", report.rows);
    println!("{: <20} {:>10}", "unique exercises", report.unique_exercises);
    let order = match report.order {
        Some(OrderPolicy::FirstSeen) => "first-seen",
        Some(OrderPolicy::Sorted) => "sorted",
        None => "neither",
    };
    println!("{: <20} {:>10}", "order", order);
    Ok(())
}
