//! Wait conditions and the polling loop behind them.
//!
//! The quiz re-renders its question text asynchronously after every "next",
//! so a fixed sleep races the render and an immediate read races the DOM
//! update. Everything here polls under a bounded timeout instead.
//!
//! # Design
//!
//! [`poll_until`] is the engine-independent building block: a probe closure,
//! a [`WaitConfig`] and a description. It measures time with `tokio::time`,
//! so tests can run it under a paused clock. [`wait_until`] layers the
//! DOM-level [`WaitCondition`]s on top of it.

use crate::engine::{BrowserEngine, ElementSnapshot};
use crate::locator::Locator;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Default timeout for wait operations (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for wait operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// A wait condition that was not satisfied within its budget.
#[derive(Debug, Clone, Error)]
#[error("timed out after {elapsed:?} waiting for {condition}{}", last_error_suffix(.last_error))]
pub struct WaitTimeout {
    /// Description of the condition that never held.
    pub condition: String,
    /// Time spent polling before giving up.
    pub elapsed: Duration,
    /// Last probe error seen, if the final polls were failing.
    pub last_error: Option<String>,
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(err) => format!(" (last error: {err})"),
        None => String::new(),
    }
}

/// Polls `probe` until it yields a value or `config.timeout` elapses.
///
/// The first probe runs immediately, so an already-satisfied condition
/// returns without sleeping. Sleeps are clamped to the remaining budget and
/// the timeout is only reported once the full budget has elapsed. Probe
/// errors are treated as transient: the document may be mid-render.
///
/// # Example
///
/// ```ignore
/// let text = poll_until(
///     || async { Ok::<_, BrowserError>(read_text().await.filter(|t| t == "Mars")) },
///     WaitConfig::default(),
///     "answer to render",
/// ).await?;
/// ```
pub async fn poll_until<F, Fut, T, E>(
    mut probe: F,
    config: WaitConfig,
    description: &str,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: fmt::Display,
{
    let start = Instant::now();

    loop {
        let last_error = match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => None,
            Err(err) => {
                debug!("probe for {} failed: {}", description, err);
                Some(err.to_string())
            }
        };

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(WaitTimeout {
                condition: description.to_string(),
                elapsed,
                last_error,
            });
        }

        sleep(config.poll_interval.min(config.timeout - elapsed)).await;
    }
}

/// A predicate over the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// The first located element exists and is rendered.
    Visible(Locator),
    /// The first located element's rendered text equals the value exactly.
    TextEquals(Locator, String),
    /// At least one element resolves, visible or not.
    Present(Locator),
}

impl WaitCondition {
    /// The locator this condition observes.
    pub fn locator(&self) -> &Locator {
        match self {
            Self::Visible(locator) | Self::TextEquals(locator, _) | Self::Present(locator) => {
                locator
            }
        }
    }

    /// Checks the condition against one resolution result.
    ///
    /// Returns the element that satisfied it.
    pub fn evaluate(&self, elements: Vec<ElementSnapshot>) -> Option<ElementSnapshot> {
        let first = elements.into_iter().next()?;
        let holds = match self {
            Self::Visible(_) => first.visible,
            Self::TextEquals(_, expected) => first.text == *expected,
            Self::Present(_) => true,
        };
        holds.then_some(first)
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible(locator) => write!(f, "{locator} to be visible"),
            Self::TextEquals(locator, expected) => {
                write!(f, "text of {locator} to equal {expected:?}")
            }
            Self::Present(locator) => write!(f, "{locator} to be present"),
        }
    }
}

/// Blocks until `condition` holds in the engine's current document.
///
/// The locator is re-resolved on every poll.
pub async fn wait_until(
    engine: &dyn BrowserEngine,
    condition: &WaitCondition,
    config: WaitConfig,
) -> Result<ElementSnapshot, WaitTimeout> {
    let description = condition.to_string();
    let found = poll_until(
        move || async move {
            let elements = engine.resolve(condition.locator()).await?;
            Ok::<_, crate::error::BrowserError>(condition.evaluate(elements))
        },
        config,
        &description,
    )
    .await?;

    debug!("condition met: {}", description);
    Ok(found)
}
