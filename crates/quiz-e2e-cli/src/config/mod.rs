//! Configuration system for the quiz scenario runner with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod validation;

use quiz_e2e::QuizFixture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{snake_to_camel, CliOverrides, DEFAULT_CONFIG_FILE, ENV_PREFIX};

/// Run configuration - loaded from quiz-e2e.config.json, `QUIZ_E2E_*` or CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunConfig {
    /// Entry resource of the quiz app: a local path or a URL
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Directory screenshots are written to
    #[serde(default = "default_screenshots_dir")]
    pub screenshots_dir: PathBuf,

    /// Capture a screenshot at each checkpoint
    #[serde(default = "default_true")]
    pub screenshots: bool,

    /// Budget for each explicit wait, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Delay between probes of a wait, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Run Chrome without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Chrome executable (auto-detected when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Write the JSON run report here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,

    /// Literals the application is expected to render
    #[serde(default)]
    pub fixture: QuizFixture,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            screenshots_dir: default_screenshots_dir(),
            screenshots: true,
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_path: None,
            report: None,
            fixture: QuizFixture::default(),
        }
    }
}

impl RunConfig {
    /// Pretty-printed JSON of this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
