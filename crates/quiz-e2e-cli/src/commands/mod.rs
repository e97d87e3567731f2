//! Command implementations for the quiz-e2e CLI.
//!
//! - [`run`] - Drive the quiz scenario in a browser
//! - [`print_config`] - Show the effective configuration
//!
//! Each command is implemented in its own module and provides an `execute`
//! function that takes the parsed command arguments and returns a Result.

pub mod print_config;
pub mod run;

// Re-export execute functions for convenience
pub use print_config::execute as print_config_execute;
pub use run::execute as run_execute;
