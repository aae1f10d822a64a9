use anyhow::Result;
use exercise_ids::{
    run,
    table::read_table,
    verify::{verify, VerifyError},
    OrderPolicy, RunConfig,
};
use std::fs;
use tempfile::tempdir;

const MAPPING: &str = "\
Exercise,Muscle,Role
Bench Press,Pectorals,primary
Barbell Squat,Quadriceps,primary
Barbell Squat,Glutes,secondary

\"Row, Bent-Over\",Lats,primary
Bench Press,Triceps,secondary
";

#[test]
fn first_seen_run_verifies() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("muscle-in-exercise.csv");
    let output = tmp.path().join("db").join("with-ids.csv");
    fs::write(&input, MAPPING)?;

    let summary = run(&RunConfig::new(&input, &output))?;
    assert_eq!(summary.unique_exercises, 3);
    assert_eq!(summary.input_rows, 5);

    let written = fs::read_to_string(&output)?;
    let lines: Vec<&str> = written.split("\r\n").collect();
    assert_eq!(lines[0], "id,Exercise,Muscle,Role");
    assert_eq!(lines[1], "1,Bench Press,Pectorals,primary");
    assert_eq!(lines[4], "3,\"Row, Bent-Over\",Lats,primary");
    assert_eq!(lines[5], "1,Bench Press,Triceps,secondary");

    let report = verify(&read_table(&input)?, &read_table(&output)?)?;
    assert_eq!(report.order, Some(OrderPolicy::FirstSeen));
    Ok(())
}

#[test]
fn sorted_run_verifies() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("in.csv");
    let output = tmp.path().join("out.csv");
    fs::write(&input, MAPPING)?;

    let cfg = RunConfig {
        order: OrderPolicy::Sorted,
        ..RunConfig::new(&input, &output)
    };
    let summary = run(&cfg)?;
    assert_eq!(
        summary.sample,
        vec![
            (1, "Barbell Squat".to_string()),
            (2, "Bench Press".to_string()),
            (3, "Row, Bent-Over".to_string()),
        ]
    );

    let report = verify(&read_table(&input)?, &read_table(&output)?)?;
    assert_eq!(report.order, Some(OrderPolicy::Sorted));
    Ok(())
}

#[test]
fn rerun_is_idempotent() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("in.csv");
    let output = tmp.path().join("out.csv");
    fs::write(&input, MAPPING)?;

    run(&RunConfig::new(&input, &output))?;
    let first = fs::read(&output)?;
    run(&RunConfig::new(&input, &output))?;
    assert_eq!(fs::read(&output)?, first);
    Ok(())
}

#[test]
fn header_only_input() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("in.csv");
    let output = tmp.path().join("out.csv");
    fs::write(&input, "Exercise,Muscle\n")?;

    let summary = run(&RunConfig::new(&input, &output))?;
    assert_eq!(summary.unique_exercises, 0);
    assert!(summary.sample.is_empty());
    assert_eq!(fs::read_to_string(&output)?, "id,Exercise,Muscle\r\n");
    Ok(())
}

#[test]
fn tampered_output_fails_verification() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("in.csv");
    let output = tmp.path().join("out.csv");
    fs::write(&input, MAPPING)?;
    run(&RunConfig::new(&input, &output))?;

    let tampered =
        fs::read_to_string(&output)?.replacen("1,Bench Press,Triceps", "4,Bench Press,Triceps", 1);
    fs::write(&output, tampered)?;

    let err = verify(&read_table(&input)?, &read_table(&output)?).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VerifyError>(),
        Some(VerifyError::InconsistentId { .. })
    ));
    Ok(())
}
