//! Running the `sensorbuf` binary end to end

use crate::common::fixtures::{empty_config, read_output, sample_readings, write_input};
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, extra: &[&str]) -> Output {
    let config = empty_config(dir);
    Command::new(env!("CARGO_BIN_EXE_sensorbuf"))
        .current_dir(dir)
        .arg("--config-file")
        .arg(&config)
        .arg("--no-color")
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn test_success_exits_zero_and_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_readings(25);
    write_input(&dir.path().join("sensor_data"), &input);

    let output = run_in(dir.path(), &["-n", "3"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let mut written = read_output(&dir.path().join("sensor_data_out.csv"));
    written.sort_by_key(|r| r.id);
    assert_eq!(written, input);
}

#[test]
fn test_sentinel_mode_from_command_line() {
    let dir = tempfile::tempdir().unwrap();
    write_input(&dir.path().join("sensor_data"), &sample_readings(10));

    let output = run_in(dir.path(), &["--termination", "sentinel", "-n", "4"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(read_output(&dir.path().join("sensor_data_out.csv")).len(), 10);
}

#[test]
fn test_missing_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &["--log-level", "error"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot open input file"), "stderr: {}", stderr);
}

#[test]
fn test_bad_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "consumers = \"many\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sensorbuf"))
        .current_dir(dir.path())
        .arg("--config-file")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.toml"));
}
