//! Application Error Types

use crate::core::error_handling::ContextualError;
use crate::queue::QueueError;
use crate::sensor::SensorError;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("{message}: {source}")]
    File {
        message: String,
        #[source]
        source: SensorError,
    },

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Failed to spawn thread '{name}': {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Thread '{name}' panicked")]
    ThreadPanicked { name: String },
}

impl AppError {
    pub fn configuration(message: impl Into<String>) -> Self {
        AppError::Configuration {
            message: message.into(),
        }
    }

    /// Failure to open one of the pipeline's files
    pub fn file(role: &str, path: &Path, source: SensorError) -> Self {
        AppError::File {
            message: format!("Cannot open {} file '{}'", role, path.display()),
            source,
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, AppError::Configuration { .. } | AppError::File { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Configuration { message } | AppError::File { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
