//! TOML configuration file parsing and settings resolution
//!
//! Values are layered: built-in defaults, then the configuration file, then
//! command line arguments.

use super::args::Args;
use crate::app::error::{AppError, AppResult};
use crate::core::logging::LogFormat;
use crate::core::retry::RetryPolicy;
use crate::queue::Termination;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Input file name used when none is configured
pub const DEFAULT_INPUT: &str = "sensor_data";
/// Output file name used when none is configured
pub const DEFAULT_OUTPUT: &str = "sensor_data_out.csv";
pub const DEFAULT_CONSUMERS: usize = 2;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Contents of a `sensorbuf.toml` file
///
/// ```toml
/// input = "sensor_data"
/// output = "sensor_data_out.csv"
/// consumers = 2
/// termination = "sentinel"
/// retry-attempts = 5
/// log-level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub append: Option<bool>,
    pub consumers: Option<usize>,
    pub termination: Option<Termination>,
    pub produce_delay_ms: Option<u64>,
    pub consume_delay_ms: Option<u64>,
    pub retry_attempts: Option<usize>,
    pub retry_delay_ms: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl ConfigFile {
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::configuration(e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!(
                "Error reading configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&contents).map_err(|e| {
            AppError::configuration(format!(
                "Error parsing configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// `<config dir>/sensorbuf/sensorbuf.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sensorbuf").join("sensorbuf.toml"))
}

/// Load the configuration file named on the command line, or the default one
///
/// An explicitly named file must exist; a missing default file is not an error.
pub fn load_config(config_file: Option<&Path>) -> AppResult<Option<ConfigFile>> {
    match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::configuration(format!(
                    "The specified configuration file does not exist: {}",
                    path.display()
                )));
            }
            ConfigFile::load(path).map(Some)
        }
        None => match default_config_path() {
            Some(path) if path.exists() => ConfigFile::load(&path).map(Some),
            _ => Ok(None),
        },
    }
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub append: bool,
    pub consumers: usize,
    pub termination: Termination,
    pub produce_delay: Duration,
    pub consume_delay: Duration,
    pub retry: RetryPolicy,
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            append: false,
            consumers: DEFAULT_CONSUMERS,
            termination: Termination::default(),
            produce_delay: Duration::ZERO,
            consume_delay: Duration::ZERO,
            retry: RetryPolicy::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            log_file: None,
            color: std::io::stderr().is_terminal(),
        }
    }
}

impl Settings {
    /// Layer the configuration file and then the command line over the defaults
    pub fn resolve(args: &Args, config: Option<&ConfigFile>) -> AppResult<Self> {
        let mut settings = Self::default();
        if let Some(config) = config {
            settings.apply_config(config)?;
        }
        settings.apply_args(args)?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_config(&mut self, config: &ConfigFile) -> AppResult<()> {
        if let Some(input) = &config.input {
            self.input = input.clone();
        }
        if let Some(output) = &config.output {
            self.output = output.clone();
        }
        if let Some(append) = config.append {
            self.append = append;
        }
        if let Some(consumers) = config.consumers {
            self.consumers = consumers;
        }
        if let Some(termination) = config.termination {
            self.termination = termination;
        }
        if let Some(ms) = config.produce_delay_ms {
            self.produce_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = config.consume_delay_ms {
            self.consume_delay = Duration::from_millis(ms);
        }
        if let Some(attempts) = config.retry_attempts {
            self.retry.max_attempts = attempts;
        }
        if let Some(ms) = config.retry_delay_ms {
            self.retry.delay = Duration::from_millis(ms);
        }
        if let Some(level) = &config.log_level {
            self.log_level = level.to_ascii_lowercase();
        }
        if let Some(format) = &config.log_format {
            self.log_format = format.parse().map_err(AppError::configuration)?;
        }
        if let Some(log_file) = &config.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(color) = config.color {
            self.color = color;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: &Args) -> AppResult<()> {
        if let Some(input) = &args.input {
            self.input = input.clone();
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if args.append {
            self.append = true;
        }
        if let Some(consumers) = args.consumers {
            self.consumers = usize::from(consumers);
        }
        if let Some(termination) = &args.termination {
            self.termination = termination.parse().map_err(AppError::configuration)?;
        }
        if let Some(ms) = args.produce_delay_ms {
            self.produce_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = args.consume_delay_ms {
            self.consume_delay = Duration::from_millis(ms);
        }
        if let Some(attempts) = args.retry_attempts {
            self.retry.max_attempts = attempts;
        }
        if let Some(ms) = args.retry_delay_ms {
            self.retry.delay = Duration::from_millis(ms);
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = &args.log_format {
            self.log_format = format.parse().map_err(AppError::configuration)?;
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(color) = args.color_choice() {
            self.color = color;
        }
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        if self.consumers == 0 {
            return Err(AppError::configuration(
                "consumers must be at least 1".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::configuration(format!(
                "invalid log level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.input == self.output {
            return Err(AppError::configuration(format!(
                "input and output must be different files ({})",
                self.input.display()
            )));
        }
        Ok(())
    }
}
