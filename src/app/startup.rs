//! Application startup: arguments, configuration, logging, then the pipeline

use super::cli::{load_config, Args, Settings};
use super::runner::run_pipeline;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{flush_logging, init_logging};
use crate::core::version::long_version;
use clap::Parser;

/// Run the application and return the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    let config = match load_config(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    let settings = match Settings::resolve(&args, config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    if let Err(e) = init_logging(
        Some(&settings.log_level),
        settings.log_format,
        settings.log_file.as_deref(),
        settings.color,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        return 1;
    }

    log::info!("sensorbuf {}", long_version());
    log::debug!("Settings: {:?}", settings);

    let code = match run_pipeline(&settings) {
        Ok(_) => 0,
        Err(e) => {
            log_error_with_context(&e, "Running sensor pipeline");
            1
        }
    };

    flush_logging();
    code
}
