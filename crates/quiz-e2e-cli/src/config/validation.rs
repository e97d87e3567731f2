use crate::config::RunConfig;
use crate::error::{ConfigError, Result};

fn invalid(field: &str, value: impl ToString, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}

impl RunConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide the quiz app as a path or URL, e.g. quiz_app.html".to_string(),
            }
            .into());
        }

        if self.timeout_ms == 0 {
            return Err(invalid("timeoutMs", 0, "The wait timeout must be positive"));
        }

        if self.poll_interval_ms == 0 {
            return Err(invalid(
                "pollIntervalMs",
                0,
                "The poll interval must be positive",
            ));
        }

        if self.poll_interval_ms > self.timeout_ms {
            return Err(invalid(
                "pollIntervalMs",
                self.poll_interval_ms,
                &format!("Must not exceed timeoutMs ({})", self.timeout_ms),
            ));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(invalid(
                "windowWidth/windowHeight",
                format!("{}x{}", self.window_width, self.window_height),
                "Window dimensions must be non-zero",
            ));
        }

        if self.fixture.questions.is_empty() {
            return Err(ConfigError::MissingField {
                field: "fixture.questions".to_string(),
                hint: "The quiz fixture needs at least one question".to_string(),
            }
            .into());
        }

        for (i, question) in self.fixture.questions.iter().enumerate() {
            if question.text.is_empty() {
                return Err(invalid(
                    &format!("fixture.questions[{i}].text"),
                    "\"\"",
                    "Question text cannot be empty",
                ));
            }
            if question.correct_label.is_empty() {
                return Err(invalid(
                    &format!("fixture.questions[{i}].correctLabel"),
                    "\"\"",
                    "The correct option label cannot be empty",
                ));
            }
        }

        Ok(())
    }
}
