use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_millis, parse_window_size};

/// Available quiz-e2e subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the quiz scenario
    ///
    /// Launches Chrome, walks the quiz from the landing page to the results
    /// page and exits non-zero at the first checkpoint that fails.
    Run(RunArgs),

    /// Print the effective configuration as JSON
    ///
    /// Merges defaults, quiz-e2e.config.json, QUIZ_E2E_* variables and the
    /// given options exactly as `run` would, without launching a browser.
    PrintConfig(RunArgs),
}

/// Options shared by `run` and `print-config`.
///
/// Every option is optional; unset options fall back to the environment, the
/// config file and then the built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Quiz app entry: a local HTML file or a URL
    ///
    /// Examples:
    ///   quiz-e2e run quiz_app.html
    ///   quiz-e2e run http://localhost:8000/quiz_app.html
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Budget for each explicit wait, in milliseconds
    #[arg(long, value_name = "MS", value_parser = parse_millis)]
    pub timeout_ms: Option<u64>,

    /// Delay between probes while waiting, in milliseconds
    #[arg(long, value_name = "MS", value_parser = parse_millis)]
    pub poll_interval_ms: Option<u64>,

    /// Directory for checkpoint screenshots
    #[arg(long, value_name = "DIR")]
    pub screenshots_dir: Option<PathBuf>,

    /// Do not capture screenshots
    #[arg(long)]
    pub no_screenshots: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub visible: bool,

    /// Browser window size as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", value_parser = parse_window_size)]
    pub window_size: Option<(u32, u32)>,

    /// Chrome/Chromium executable to launch
    #[arg(long, value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Path to the config file (default: ./quiz-e2e.config.json if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
