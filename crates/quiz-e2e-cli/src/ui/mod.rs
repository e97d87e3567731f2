//! Terminal UI utilities for status messages and the run summary.
//!
//! Everything here writes to stderr. Colors follow `--no-color`, `NO_COLOR`,
//! `FORCE_COLOR` and terminal detection, in that order.
//!
//! # Examples
//!
//! ```no_run
//! use quiz_e2e_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Running quiz scenario");
//! ui::success("All checkpoints passed");
//! ```

mod format;
mod messages;

pub use format::{format_duration, print_scenario_summary, status_mark, summary_line};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on flags and environment.
///
/// Should be called early in `main`.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && should_use_color());
}

/// Applies `style` when stderr colors are enabled.
pub(crate) fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if console::colors_enabled_stderr() {
        style(text)
    } else {
        text.to_string()
    }
}
