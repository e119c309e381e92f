//! TOML configuration layering tests

use clap::Parser;
use sensorbuf::app::cli::{load_config, Args, Settings};
use sensorbuf::app::AppError;
use sensorbuf::queue::Termination;

#[test]
fn test_config_file_sets_values_and_flags_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sensorbuf.toml");
    std::fs::write(
        &path,
        "consumers = 6\ntermination = \"sentinel\"\nretry-attempts = 2\n",
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    let args = Args::try_parse_from(["sensorbuf", "-n", "3"]).unwrap();
    let settings = Settings::resolve(&args, config.as_ref()).unwrap();

    assert_eq!(settings.consumers, 3);
    assert_eq!(settings.termination, Termination::Sentinel);
    assert_eq!(settings.retry.max_attempts, 2);
}

#[test]
fn test_unknown_key_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sensorbuf.toml");
    std::fs::write(&path, "queue-size = 10\n").unwrap();

    assert!(matches!(
        load_config(Some(&path)),
        Err(AppError::Configuration { .. })
    ));
}
