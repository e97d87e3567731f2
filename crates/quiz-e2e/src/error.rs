//! Error types for the verification pipeline.
//!
//! Two layers: [`BrowserError`] covers everything the engine can do wrong
//! (launch, navigation, script execution, missing elements), and
//! [`ScenarioError`] is the checkpoint-level taxonomy the runner reports.
//! Artifact capture has its own [`ArtifactCaptureError`] because it is
//! logged and swallowed rather than propagated.

use crate::verify::AssertionFailure;
use crate::wait::WaitTimeout;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the browser engine or the session wrapping it.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the DevTools connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or never reached the ready state.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An action addressed an element that did not resolve.
    #[error("no element at index {index} for locator {locator}")]
    ElementNotFound {
        /// Rendered form of the locator
        locator: String,
        /// Position that was requested
        index: usize,
    },

    /// An operation was attempted on a closed session.
    #[error("browser session is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a checkpoint (and therefore the scenario) failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The browser could not be started. Nothing ran.
    #[error("session could not be opened: {0}")]
    SessionInit(#[source] BrowserError),

    /// An expected state never materialized within the wait budget.
    #[error(transparent)]
    ConditionTimeout(#[from] WaitTimeout),

    /// An observed value diverged from the expected literal.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// An engine action (navigate, click, select) failed outright.
    #[error("browser action failed: {0}")]
    Browser(#[from] BrowserError),
}

impl ScenarioError {
    /// Short machine-friendly name of the failure class, used in reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionInit(_) => "session_init",
            Self::ConditionTimeout(_) => "condition_timeout",
            Self::Assertion(_) => "assertion",
            Self::Browser(_) => "browser",
        }
    }
}

/// Failure to persist a diagnostic screenshot. Never fatal.
#[derive(Debug, Error)]
pub enum ArtifactCaptureError {
    /// The engine could not produce an image.
    #[error("screenshot capture failed: {0}")]
    Capture(#[from] BrowserError),

    /// The image could not be written.
    #[error("failed to write artifact {}: {source}", path.display())]
    Write {
        /// Destination that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
