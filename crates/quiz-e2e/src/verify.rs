//! Checkpoint assertions.
//!
//! Comparisons are exact: the checkpoints encode literal application strings,
//! so there is no trimming, case folding or partial matching. Nothing in this
//! module touches the document except [`verify_expectation`], which only
//! reads it.

use crate::engine::BrowserEngine;
use crate::error::ScenarioError;
use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder reported as the actual value when an element did not resolve.
pub const MISSING: &str = "<missing>";

/// An observed value diverged from the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (expected {expected:?}, actual {actual:?})")]
pub struct AssertionFailure {
    /// What was being checked.
    pub message: String,
    /// Value observed in the document.
    pub actual: String,
    /// Value the checkpoint required.
    pub expected: String,
}

impl AssertionFailure {
    /// Creates a failure record.
    pub fn new(
        message: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            actual: actual.into(),
            expected: expected.into(),
        }
    }
}

/// Fails unless `actual == expected`.
pub fn assert_equals(actual: &str, expected: &str, message: &str) -> Result<(), AssertionFailure> {
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(message, actual, expected))
    }
}

/// Fails unless `condition` holds.
pub fn assert_true(condition: bool, message: &str) -> Result<(), AssertionFailure> {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure::new(message, "false", "true"))
    }
}

/// Fails unless `actual` ends with `suffix`, reporting the full value.
pub fn assert_suffix(actual: &str, suffix: &str, message: &str) -> Result<(), AssertionFailure> {
    if actual.ends_with(suffix) {
        Ok(())
    } else {
        Err(AssertionFailure::new(message, actual, format!("...{suffix}")))
    }
}

/// What a checkpoint expects to observe about one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "expect")]
pub enum Expectation {
    /// Element text equals `text` exactly.
    Text {
        /// Element to read.
        locator: Locator,
        /// Position within the locator's matches.
        #[serde(default)]
        index: usize,
        /// Literal the element must show.
        text: String,
        /// Message used on failure.
        message: String,
    },
    /// Element is rendered.
    Visible {
        /// Element to read.
        locator: Locator,
        /// Position within the locator's matches.
        #[serde(default)]
        index: usize,
        /// Message used on failure.
        message: String,
    },
}

impl Expectation {
    /// Expects the first element matched by `locator` to show `text`.
    pub fn text(locator: Locator, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::text_at(locator, 0, text, message)
    }

    /// Expects element `index` of `locator` to show `text`.
    pub fn text_at(
        locator: Locator,
        index: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Text {
            locator,
            index,
            text: text.into(),
            message: message.into(),
        }
    }

    /// Expects the first element matched by `locator` to be visible.
    pub fn visible(locator: Locator, message: impl Into<String>) -> Self {
        Self::Visible {
            locator,
            index: 0,
            message: message.into(),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text {
                locator,
                index,
                text,
                ..
            } => write!(f, "{locator}[{index}] == {text:?}"),
            Self::Visible { locator, index, .. } => write!(f, "{locator}[{index}] visible"),
        }
    }
}

/// Reads the element named by `expectation` and asserts on it.
///
/// # Errors
///
/// [`ScenarioError::Assertion`] on mismatch or when the element is missing,
/// [`ScenarioError::Browser`] if the engine could not be queried.
pub async fn verify_expectation(
    engine: &dyn BrowserEngine,
    expectation: &Expectation,
) -> Result<(), ScenarioError> {
    match expectation {
        Expectation::Text {
            locator,
            index,
            text,
            message,
        } => {
            let actual = engine.element(locator, *index).await?;
            let actual = actual.as_ref().map_or(MISSING, |el| el.text.as_str());
            assert_equals(actual, text, message)?;
        }
        Expectation::Visible {
            locator,
            index,
            message,
        } => {
            let element = engine.element(locator, *index).await?;
            assert_true(element.is_some_and(|el| el.visible), message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_is_exact() {
        assert!(assert_equals("H2O", "H2O", "option").is_ok());

        let err = assert_equals("h2o", "H2O", "option").unwrap_err();
        assert_eq!(err.actual, "h2o");
        assert_eq!(err.expected, "H2O");
        assert_eq!(err.message, "option");

        assert!(assert_equals(" H2O", "H2O", "option").is_err());
    }

    #[test]
    fn true_reports_boolean_values() {
        assert!(assert_true(true, "chart shown").is_ok());
        let err = assert_true(false, "Performance chart is not displayed.").unwrap_err();
        assert_eq!(err.actual, "false");
        assert_eq!(err.expected, "true");
    }

    #[test]
    fn suffix_reports_full_url() {
        let url = "file:///tmp/work/quiz_app.html";
        assert!(assert_suffix(url, "quiz_app.html", "Page URL is incorrect.").is_ok());

        let err = assert_suffix("about:blank", "quiz_app.html", "Page URL is incorrect.")
            .unwrap_err();
        assert_eq!(err.actual, "about:blank");
        assert_eq!(err.expected, "...quiz_app.html");
    }

    #[test]
    fn failure_display_names_both_values() {
        let err = AssertionFailure::new("Correct count is incorrect.", "2", "3");
        assert_eq!(
            err.to_string(),
            "Correct count is incorrect. (expected \"3\", actual \"2\")"
        );
    }

    #[test]
    fn expectation_display() {
        let e = Expectation::text_at(Locator::css(".option-label"), 1, "Mars", "m");
        assert_eq!(e.to_string(), ".option-label[1] == \"Mars\"");
        let e = Expectation::visible(Locator::id("time-chart"), "m");
        assert_eq!(e.to_string(), "#time-chart[0] visible");
    }
}
