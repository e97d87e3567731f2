//! Miette diagnostic conversion for CLI errors.
//!
//! This module provides conversion from CLI errors to miette diagnostics
//! for readable error reporting.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::ScenarioFailed {
            kind: "session_init",
            ref message,
            ..
        } => miette::miette!(
            code = "quiz_e2e::session_init",
            help = "Install Chrome/Chromium or point --chrome-path at the binary",
            "{}",
            message
        ),
        CliError::ScenarioFailed { kind, .. } => miette::miette!(
            code = format!("quiz_e2e::{kind}"),
            help = "Re-run with --verbose for step-level logs, or --visible to watch the browser",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_failure_carries_code() {
        let report = cli_error_to_miette(CliError::ScenarioFailed {
            checkpoint: Some(1),
            kind: "assertion",
            message: "Page title is incorrect.".to_string(),
        });
        assert_eq!(
            report.code().map(|c| c.to_string()),
            Some("quiz_e2e::assertion".to_string())
        );
        assert!(report.help().is_some());
        assert!(report.to_string().contains("checkpoint 1"));
    }

    #[test]
    fn test_session_failure_suggests_chrome_path() {
        let report = cli_error_to_miette(CliError::ScenarioFailed {
            checkpoint: None,
            kind: "session_init",
            message: "failed to launch browser".to_string(),
        });
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--chrome-path"));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("bad".to_string()));
        assert_eq!(report.to_string(), "Invalid argument: bad");
    }
}
