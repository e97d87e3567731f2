//! Command-line interface definition for the quiz scenario runner.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `quiz-e2e run` - Drive the quiz scenario in Chrome and report the outcome
//! - `quiz-e2e print-config` - Show the effective configuration as JSON

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, RunArgs};
pub use validation::{parse_millis, parse_window_size};

/// quiz-e2e - end-to-end verification of the quiz app in headless Chrome
#[derive(Parser, Debug)]
#[command(
    name = "quiz-e2e",
    version,
    about = "End-to-end verification of the quiz app in headless Chrome",
    long_about = "quiz-e2e drives the quiz application through its full journey (landing page,\n\
                  configuration, every question, results) in a single Chrome session and checks\n\
                  the rendered page at each checkpoint. Screenshots are kept per checkpoint."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every step, probe and browser action of each checkpoint.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
