//! Input files and output readers shared by the integration tests

#![allow(dead_code)]

use sensorbuf::app::cli::Settings;
use sensorbuf::queue::Termination;
use sensorbuf::sensor::{parse_line, Reading, ReadingWriter};
use std::path::{Path, PathBuf};

/// Readings with ids `1..=count` and distinct values and timestamps
pub fn sample_readings(count: u16) -> Vec<Reading> {
    (1..=count)
        .map(|id| Reading::new(id, f64::from(id) * 0.25 + 10.0, 1_700_000_000 + i64::from(id) * 60))
        .collect()
}

/// Write `readings` as packed binary records
pub fn write_input(path: &Path, readings: &[Reading]) {
    let mut writer = ReadingWriter::create(path).unwrap();
    writer.write_all(readings).unwrap();
    writer.finish().unwrap();
}

/// Parse every line of a CSV output file
pub fn read_output(path: &Path) -> Vec<Reading> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| parse_line(line).unwrap())
        .collect()
}

/// Settings pointing at `sensor_data` / `sensor_data_out.csv` inside `dir`
pub fn settings_in(dir: &Path, consumers: usize, termination: Termination) -> Settings {
    Settings {
        input: dir.join("sensor_data"),
        output: dir.join("sensor_data_out.csv"),
        consumers,
        termination,
        color: false,
        ..Settings::default()
    }
}

/// Empty configuration file so the user's own config is never picked up
pub fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("sensorbuf.toml");
    std::fs::write(&path, "").unwrap();
    path
}
