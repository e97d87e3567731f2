//! Error handling for the quiz-e2e CLI.
//!
//! This module provides a small error hierarchy using `thiserror`. Each
//! variant carries enough context for the user to act on it.
//!
//! # Architecture
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Configuration errors** (`ConfigError`) name the offending field and a hint
//! - **Error conversion** is automatic via `#[from]` attributes
//! - **Context helpers** allow attaching file paths or hints to errors
//!
//! # Example
//!
//! ```rust,no_run
//! use quiz_e2e_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_report(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

pub mod miette;

use quiz_e2e::FailureSummary;
use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
///
/// This is the error type returned by CLI commands. It converts from the
/// narrower error types via `From` implementations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scenario ran and at least one checkpoint failed.
    #[error("Scenario failed{}: {message}", checkpoint_suffix(.checkpoint))]
    ScenarioFailed {
        /// Failing checkpoint, `None` if the browser never started.
        checkpoint: Option<usize>,
        /// Failure class reported by the runner.
        kind: &'static str,
        /// Runner message naming expected and actual values.
        message: String,
    },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

fn checkpoint_suffix(checkpoint: &Option<usize>) -> String {
    match checkpoint {
        Some(index) => format!(" at checkpoint {index}"),
        None => " before the first checkpoint".to_string(),
    }
}

impl From<&FailureSummary> for CliError {
    fn from(failure: &FailureSummary) -> Self {
        Self::ScenarioFailed {
            checkpoint: failure.checkpoint,
            kind: failure.kind,
            message: failure.message.clone(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Create a quiz-e2e.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Add a file path to the error context.
    ///
    /// A `NotFound` I/O error becomes [`CliError::FileNotFound`]; other
    /// errors are prefixed with the path.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Add a helpful hint to the error context.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let path = path.as_ref();
            match e.into() {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.to_path_buf())
                }
                other => CliError::Custom(format!("{}: {}", path.display(), other)),
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }
}
