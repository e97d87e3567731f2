//! Formatting utilities for durations and the scenario summary.

use super::paint;
use console::Term;
use owo_colors::OwoColorize;
use quiz_e2e::{CheckpointStatus, ScenarioReport};
use std::time::Duration;

/// Format duration in human-readable format.
///
/// Converts to the most appropriate unit (ms, s, m:s).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use quiz_e2e_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Plain marker for a checkpoint outcome.
pub fn status_mark(status: CheckpointStatus) -> &'static str {
    match status {
        CheckpointStatus::Passed => "✓",
        CheckpointStatus::Failed => "✗",
        CheckpointStatus::NotRun => "-",
    }
}

/// One-line verdict, e.g. `PASSED 6/6 checkpoints in 1.20s`.
pub fn summary_line(report: &ScenarioReport) -> String {
    format!(
        "{} {}/{} checkpoints in {}",
        if report.passed { "PASSED" } else { "FAILED" },
        report.passed_count(),
        report.checkpoints.len(),
        format_duration(Duration::from_millis(report.duration_ms))
    )
}

fn styled_mark(status: CheckpointStatus) -> String {
    let mark = status_mark(status);
    match status {
        CheckpointStatus::Passed => paint(mark, |t| t.green().bold().to_string()),
        CheckpointStatus::Failed => paint(mark, |t| t.red().bold().to_string()),
        CheckpointStatus::NotRun => paint(mark, |t| t.dimmed().to_string()),
    }
}

/// Print the per-checkpoint summary of a run to stderr.
///
/// ```no_run
/// # fn show(report: &quiz_e2e::ScenarioReport) {
/// quiz_e2e_cli::ui::print_scenario_summary(report);
/// # }
/// ```
pub fn print_scenario_summary(report: &ScenarioReport) {
    let width = (Term::stderr().size().1 as usize).min(80);

    eprintln!("\n{}", paint("Scenario Summary", |t| t.bold().underline().to_string()));
    eprintln!("{}", "─".repeat(width));

    for checkpoint in &report.checkpoints {
        let timing = match checkpoint.status {
            CheckpointStatus::NotRun => String::new(),
            _ => format!(
                "({})",
                format_duration(Duration::from_millis(checkpoint.duration_ms))
            ),
        };
        eprintln!(
            "  {} {:>2}. {} {}",
            styled_mark(checkpoint.status),
            checkpoint.index,
            checkpoint.label,
            paint(&timing, |t| t.dimmed().to_string())
        );
    }

    if let Some(failure) = &report.failure {
        eprintln!(
            "\n  {} {}",
            paint(failure.kind, |t| t.red().bold().to_string()),
            failure.message
        );
    }

    eprintln!("{}", "─".repeat(width));

    let line = summary_line(report);
    if report.passed {
        eprintln!("  {}", paint(&line, |t| t.green().to_string()));
    } else {
        eprintln!("  {}", paint(&line, |t| t.red().to_string()));
    }

    if !report.artifacts.is_empty() {
        eprintln!("  {}", paint("Screenshots:", |t| t.bold().to_string()));
        for artifact in &report.artifacts {
            eprintln!("    {}", paint(&artifact.display().to_string(), |t| t.dimmed().to_string()));
        }
    }
}
