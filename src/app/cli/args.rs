//! Command line arguments
//!
//! Every option is optional so that values from the configuration file can
//! fill the gaps; see [`Settings::resolve`](super::config::Settings::resolve).

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sensorbuf")]
#[command(about = "Fan sensor readings out to worker threads and log them as CSV")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Binary readings file [default: sensor_data]
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// CSV output file [default: sensor_data_out.csv]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(short = 'a', long = "append", action = ArgAction::SetTrue)]
    pub append: bool,

    /// Number of consumer threads [default: 2]
    #[arg(
        short = 'n',
        long = "consumers",
        value_name = "COUNT",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub consumers: Option<u16>,

    /// End-of-stream signalling [default: close]
    #[arg(short = 't', long = "termination", value_name = "MODE", value_parser = ["sentinel", "close"])]
    pub termination: Option<String>,

    /// Pause after each produced reading
    #[arg(long = "produce-delay-ms", value_name = "MS")]
    pub produce_delay_ms: Option<u64>,

    /// Pause after each logged reading
    #[arg(long = "consume-delay-ms", value_name = "MS")]
    pub consume_delay_ms: Option<u64>,

    /// Consecutive failed buffer reads before a consumer gives up
    #[arg(long = "retry-attempts", value_name = "COUNT")]
    pub retry_attempts: Option<usize>,

    /// Initial delay between failed buffer reads (doubles each attempt)
    #[arg(long = "retry-delay-ms", value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,
}

impl Args {
    /// Explicit color choice, `None` when neither flag was given
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
