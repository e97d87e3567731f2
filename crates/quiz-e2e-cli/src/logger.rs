//! Logging infrastructure for the quiz-e2e CLI.
//!
//! This module provides a structured logging setup using the `tracing` ecosystem.
//! Logs go to stderr so `print-config` output on stdout stays machine-readable.
//!
//! # Features
//!
//! - **Verbosity control**: `--verbose` for debug, `--quiet` for errors only
//! - **Color support**: Automatic detection with `--no-color` override
//! - **Environment filters**: Override via `RUST_LOG` environment variable
//! - **Checkpoint spans**: every line logged inside a checkpoint carries its index and label
//!
//! # Example
//!
//! ```rust,no_run
//! use quiz_e2e_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//!
//! info!("Starting scenario");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `--verbose` is given.
pub const VERBOSE_FILTER: &str = "quiz_e2e=debug,quiz_e2e_cli=debug";

/// Directives used when `--quiet` is given.
pub const QUIET_FILTER: &str = "quiz_e2e=error,quiz_e2e_cli=error";

/// Directives used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "quiz_e2e=info,quiz_e2e_cli=info";

/// Build the filter for the given flags.
///
/// The level is determined in this order:
/// 1. `--verbose` flag: DEBUG for the quiz-e2e crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for the quiz-e2e crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(build_filter(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Check if colored output should be enabled.
///
/// # Environment Variables
///
/// - `NO_COLOR`: If set, disables colors
/// - `FORCE_COLOR`: If set, forces colors even in non-TTY
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
