//! Run command implementation.
//!
//! Launches a browser, walks the quiz scenario and reports each checkpoint.

use crate::cli::RunArgs;
use crate::config::{CliOverrides, RunConfig};
use crate::error::{CliError, ConfigError, Result, ResultExt};
use crate::ui;
use quiz_e2e::{BrowserSession, Scenario, ScenarioReport};
use std::path::Path;
use tracing::{debug, info};

/// Execute the run command.
///
/// # Steps
///
/// 1. Load and validate the configuration
/// 2. Resolve the entry resource to a URL
/// 3. Plan the scenario from the fixture
/// 4. Open a browser session and run every checkpoint
/// 5. Write the JSON report (if requested) and print the summary
///
/// # Errors
///
/// Returns configuration errors before any browser is launched, and
/// [`CliError::ScenarioFailed`] when a checkpoint fails.
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = RunConfig::load(&CliOverrides::from(&args), args.config.as_deref())?;
    config.validate()?;
    debug!("effective configuration: {:?}", config);

    let entry_url = config.entry_url().with_path(&config.entry)?;
    let scenario = Scenario::quiz(&entry_url, &config.fixture, config.wait_config()).map_err(
        |err| ConfigError::InvalidValue {
            field: "fixture".to_string(),
            value: err.to_string(),
            hint: "List at least one question under fixture.questions".to_string(),
        },
    )?;
    let recorder = config.recorder();

    if let Some(path) = &config.report {
        check_report_path(path)?;
    }

    ui::info(&format!(
        "Running {} checkpoints against {}",
        scenario.checkpoints().len(),
        entry_url
    ));

    let report = quiz_e2e::execute(
        BrowserSession::open(config.session_config()),
        &scenario,
        recorder.as_ref(),
    )
    .await;

    if let Some(path) = &config.report {
        write_report(&report, path).await?;
        info!("report written to {}", path.display());
    }

    ui::print_scenario_summary(&report);

    match &report.failure {
        None => {
            ui::success("All checkpoints passed");
            Ok(())
        }
        Some(failure) => {
            ui::error(&format!(
                "{} of {} checkpoints passed",
                report.passed_count(),
                report.checkpoints.len()
            ));
            Err(CliError::from(failure))
        }
    }
}

/// Rejects a report path that cannot be written before any browser starts.
fn check_report_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--report must name a file, but {} is a directory",
            path.display()
        )));
    }
    if path.exists() {
        ui::warning(&format!("Overwriting existing report {}", path.display()));
    }
    Ok(())
}

async fn write_report(report: &ScenarioReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_path(parent)
            .with_hint("--report must point into a writable directory")?;
    }
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json).await.with_path(path)
}
