// src/process.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

use crate::{
    assign::{assign, EmptyRows, OrderPolicy},
    table::{read_table, write_table},
};

pub const DEFAULT_INPUT: &str = "app/src_db/MOYB-DB - muscle-in-exercise.csv";
pub const DEFAULT_OUTPUT: &str = "app/src_db/MOYB-DB - muscle-in-exercise-with-ids.csv";
pub const DEFAULT_SAMPLE: usize = 10;

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub order: OrderPolicy,
    pub empty_rows: EmptyRows,
    /// How many id → exercise pairs to keep in the summary.
    pub sample: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            order: OrderPolicy::default(),
            empty_rows: EmptyRows::default(),
            sample: DEFAULT_SAMPLE,
        }
    }
}

impl RunConfig {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Data rows read, empty ones included.
    pub input_rows: usize,
    pub skipped_rows: usize,
    pub unique_exercises: usize,
    pub output_path: PathBuf,
    /// First `sample` `(id, exercise)` pairs in id order.
    pub sample: Vec<(u32, String)>,
}

/// Read `cfg.input`, number its exercises and write `cfg.output`.
///
/// Nothing is written unless reading and assignment both succeed.
#[tracing::instrument(level = "info", skip(cfg), fields(input = %cfg.input.display(), order = ?cfg.order))]
pub fn run(cfg: &RunConfig) -> Result<RunSummary> {
    let start = Instant::now();

    info!("reading {}", cfg.input.display());
    let table = read_table(&cfg.input)?;

    let assigned = assign(&table, cfg.order, cfg.empty_rows)?;
    info!("found {} unique exercises", assigned.assignment.len());

    write_table(&cfg.output, &assigned.table)?;
    info!(
        rows = assigned.table.len(),
        elapsed = ?start.elapsed(),
        "output written to {}",
        cfg.output.display()
    );

    Ok(RunSummary {
        input_rows: table.len(),
        skipped_rows: assigned.skipped,
        unique_exercises: assigned.assignment.len(),
        output_path: cfg.output.clone(),
        sample: assigned.assignment.sample(cfg.sample),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedInput;
    use std::fs;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,exercise_ids=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn test_run_end_to_end() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.csv");
        fs::write(
            &input,
            "exercise,muscle\nSquat,Quad\nBench,Chest\n\nSquat,Glute\n",
        )?;

        let summary = run(&RunConfig::new(&input, &output))?;
        assert_eq!(summary.input_rows, 3);
        assert_eq!(summary.unique_exercises, 2);
        assert_eq!(
            summary.sample,
            vec![(1, "Squat".to_string()), (2, "Bench".to_string())]
        );
        assert_eq!(
            fs::read_to_string(&output)?,
            "id,exercise,muscle\r\n1,Squat,Quad\r\n2,Bench,Chest\r\n1,Squat,Glute\r\n"
        );
        Ok(())
    }

    #[test]
    fn test_sample_is_capped() -> Result<()> {
        let tmp = tempdir()?;
        let input = tmp.path().join("in.csv");
        fs::write(&input, "exercise\nA\nB\nC\n")?;

        let cfg = RunConfig {
            sample: 2,
            order: OrderPolicy::Sorted,
            ..RunConfig::new(&input, tmp.path().join("out.csv"))
        };
        let summary = run(&cfg)?;
        assert_eq!(summary.unique_exercises, 3);
        assert_eq!(summary.sample.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        init_test_logging();
        let tmp = tempdir().unwrap();
        let output = tmp.path().join("out.csv");
        let err = run(&RunConfig::new(tmp.path().join("missing.csv"), &output)).unwrap_err();
        assert!(err.downcast_ref::<MalformedInput>().is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_write_failure_is_fatal_and_clean() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.csv");
        fs::write(&input, "exercise,muscle\nSquat,Quad\n")?;
        // a directory in the way of the output file
        fs::create_dir(&output)?;
        fs::write(output.join("keep.txt"), "untouched")?;

        let err = run(&RunConfig::new(&input, &output)).unwrap_err();
        assert!(err.downcast_ref::<MalformedInput>().is_none());
        assert_eq!(fs::read_to_string(output.join("keep.txt"))?, "untouched");

        let mut names: Vec<String> = fs::read_dir(tmp.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["in.csv", "out.csv"]);
        Ok(())
    }

    #[test]
    fn test_empty_input_writes_nothing() -> Result<()> {
        let tmp = tempdir()?;
        let input = tmp.path().join("in.csv");
        let output = tmp.path().join("out.csv");
        fs::write(&input, "")?;

        let err = run(&RunConfig::new(&input, &output)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MalformedInput>(),
            Some(&MalformedInput::MissingHeader)
        );
        assert!(!output.exists());
        Ok(())
    }
}
