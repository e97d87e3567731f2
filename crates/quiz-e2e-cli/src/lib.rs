//! quiz-e2e CLI - browser end-to-end checks for the dynamic quiz app.
//!
//! This crate provides the command-line interface around the `quiz-e2e`
//! runner: configuration loading, logging, error reporting and the
//! terminal summary of a run.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and the checkpoint summary
//! - `commands` - Individual CLI command implementations
//! - `config` - Configuration loading from file, environment and flags
//!
//! # Example
//!
//! ```rust
//! use quiz_e2e_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
