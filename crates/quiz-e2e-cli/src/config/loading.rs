use crate::config::RunConfig;
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "quiz-e2e.config.json";

/// Prefix of the environment variables that override scalar settings.
pub const ENV_PREFIX: &str = "QUIZ_E2E_";

/// Scalar fields settable from the environment, in `snake_case`.
const ENV_KEYS: [&str; 10] = [
    "entry",
    "screenshots_dir",
    "screenshots",
    "timeout_ms",
    "poll_interval_ms",
    "headless",
    "window_width",
    "window_height",
    "chrome_path",
    "report",
];

/// Settings given explicitly on the command line. `None` leaves the value to
/// lower-priority sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

/// `timeout_ms` -> `timeoutMs`.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

impl RunConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<Self> {
        Self::figment(overrides, config_path)?
            .extract()
            .map_err(|e| {
                ConfigError::InvalidValue {
                    field: "configuration".to_string(),
                    value: e.to_string(),
                    hint: "Check quiz-e2e.config.json syntax, field types and QUIZ_E2E_* variables"
                        .to_string(),
                }
                .into()
            })
    }

    /// The merged provider chain, before extraction.
    pub fn figment(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("loading config file {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        // QUIZ_E2E_TIMEOUT_MS -> timeoutMs
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .only(&ENV_KEYS)
                .map(|key| snake_to_camel(key.as_str()).into())
                // `map` resets lowercasing, so this must come after it.
                .lowercase(false),
        );

        Ok(figment.merge(Serialized::defaults(overrides)))
    }
}
