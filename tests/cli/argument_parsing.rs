//! CLI argument parsing tests

use clap::Parser;
use sensorbuf::app::cli::args::Args;
use sensorbuf::app::cli::Settings;
use sensorbuf::queue::Termination;
use std::path::PathBuf;
use std::time::Duration;

fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("sensorbuf").chain(argv.iter().copied()))
}

#[test]
fn test_no_arguments_uses_conventional_files() {
    let args = parse(&[]).unwrap();
    let settings = Settings::resolve(&args, None).unwrap();

    assert_eq!(settings.input, PathBuf::from("sensor_data"));
    assert_eq!(settings.output, PathBuf::from("sensor_data_out.csv"));
    assert_eq!(settings.consumers, 2);
}

#[test]
fn test_full_argument_set() {
    let args = parse(&[
        "-i",
        "in.bin",
        "-o",
        "out.csv",
        "--append",
        "-n",
        "4",
        "-t",
        "sentinel",
        "--produce-delay-ms",
        "10",
        "--consume-delay-ms",
        "25",
        "--retry-attempts",
        "3",
        "--retry-delay-ms",
        "1",
        "--log-level",
        "debug",
        "--log-format",
        "ext",
        "--no-color",
    ])
    .unwrap();
    let settings = Settings::resolve(&args, None).unwrap();

    assert_eq!(settings.input, PathBuf::from("in.bin"));
    assert_eq!(settings.output, PathBuf::from("out.csv"));
    assert!(settings.append);
    assert_eq!(settings.consumers, 4);
    assert_eq!(settings.termination, Termination::Sentinel);
    assert_eq!(settings.produce_delay, Duration::from_millis(10));
    assert_eq!(settings.consume_delay, Duration::from_millis(25));
    assert_eq!(settings.retry.max_attempts, 3);
    assert_eq!(settings.retry.delay, Duration::from_millis(1));
    assert_eq!(settings.log_level, "debug");
    assert!(!settings.color);
}

#[test]
fn test_invalid_arguments_rejected() {
    assert!(parse(&["--consumers", "0"]).is_err());
    assert!(parse(&["--termination", "drain"]).is_err());
    assert!(parse(&["--log-format", "xml"]).is_err());
    assert!(parse(&["--color", "--no-color"]).is_err());
}
