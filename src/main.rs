use anyhow::Result;
use clap::Parser;
use exercise_ids::{
    process::{self, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_SAMPLE},
    EmptyRows, OrderPolicy, RunConfig,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Prepend a stable numeric id for each distinct exercise to a CSV file.
#[derive(Parser, Debug)]
struct Args {
    /// CSV to read; first column is the exercise name
    #[arg(long, env = "EXERCISE_IDS_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the CSV with the id column
    #[arg(long, env = "EXERCISE_IDS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How distinct exercises are numbered
    #[arg(long, env = "EXERCISE_IDS_ORDER", value_enum, default_value_t = OrderPolicy::FirstSeen)]
    order: OrderPolicy,

    /// Number of id → exercise pairs to print afterwards
    #[arg(long, env = "EXERCISE_IDS_SAMPLE", default_value_t = DEFAULT_SAMPLE)]
    sample: usize,

    /// Print the run summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = RunConfig {
        input: args.input,
        output: args.output,
        order: args.order,
        empty_rows: EmptyRows::Skip,
        sample: args.sample,
    };

    let summary = process::run(&cfg)?;
    info!("all done");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Processed {} unique exercises", summary.unique_exercises);
    println!("Output written to {}", summary.output_path.display());
    if !summary.sample.is_empty() {
        println!("\nFirst {} exercises by id:", summary.sample.len());
        for (id, exercise) in &summary.sample {
            println!("ID: {}, Exercise: {}", id, exercise);
        }
    }
    Ok(())
}
