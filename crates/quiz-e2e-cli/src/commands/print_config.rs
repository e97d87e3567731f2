//! Print-config command implementation.
//!
//! Shows the merged configuration without launching a browser.

use crate::cli::RunArgs;
use crate::config::{CliOverrides, RunConfig};
use crate::error::Result;

/// Execute the print-config command.
///
/// Loads every source the `run` command would and writes the merged result
/// to stdout as JSON. The result is not validated, so a broken setting can
/// be inspected before it is fixed.
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = RunConfig::load(&CliOverrides::from(&args), args.config.as_deref())?;
    println!("{}", config.to_json()?);
    Ok(())
}
