//! CLI Integration Tests
//!
//! Tests are organized by functionality:
//! - `cli::argument_parsing` - command line flags and their defaults
//! - `cli::toml_config` - configuration file layering
//! - `cli::exit_codes` - running the binary end to end

mod cli;
mod common;
