//! # quiz-e2e
//!
//! End-to-end verification of the quiz application in headless Chrome,
//! built on chromiumoxide.
//!
//! The crate drives one browser session through a fixed journey (landing
//! page, quiz configuration, each question, results) and asserts on the
//! rendered DOM at every checkpoint.
//!
//! ## Architecture
//!
//! - **BrowserSession**: owns the Chrome process and the single page
//! - **BrowserEngine**: the capability set the pipeline consumes
//! - **wait**: bounded polling until a DOM condition holds
//! - **verify**: exact-match assertions with structured failures
//! - **ArtifactRecorder**: best-effort screenshots per checkpoint
//! - **Scenario**: the journey as a state machine of checkpoints
//!
//! ## Example Usage
//!
//! ```ignore
//! use quiz_e2e::{execute, BrowserSession, QuizFixture, Scenario, ScreenshotRecorder,
//!     SessionConfig, WaitConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let url = quiz_e2e::resolve_target("quiz_app.html").unwrap();
//!     let scenario = Scenario::quiz(&url, &QuizFixture::default(), WaitConfig::default()).unwrap();
//!     let recorder = ScreenshotRecorder::new("screenshots");
//!
//!     let report = execute(BrowserSession::open(SessionConfig::default()), &scenario, &recorder).await;
//!     assert!(report.passed, "{:?}", report.failure);
//! }
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: waiter, verifier, plan construction (no browser)
//! 2. **Pipeline tests**: the full scenario against an in-process fake app
//! 3. **Integration tests**: real Chrome against `fixtures/quiz_app.html`
//!
//! Run with `cargo test` or `cargo test -- --ignored` for the Chrome tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod error;
pub mod fixture;
pub mod locator;
pub mod page;
pub mod recorder;
pub mod scenario;
pub mod session;
pub mod verify;
pub mod wait;

// Re-export main types for convenience
pub use engine::{BrowserEngine, ElementSnapshot, Session};
pub use error::{ArtifactCaptureError, BrowserError, Result, ScenarioError};
pub use fixture::{QuestionFixture, QuizFixture, QuizSelectors, DEFAULT_ENTRY};
pub use locator::Locator;
pub use page::Page;
pub use recorder::{ArtifactRecorder, NoopRecorder, ScreenshotRecorder};
pub use scenario::{
    execute, Checkpoint, CheckpointReport, CheckpointStatus, FailureSummary, PlanError, Scenario,
    ScenarioReport, ScenarioRun, ScenarioState, Step,
};
pub use session::{resolve_target, BrowserSession, SessionConfig};
pub use verify::{assert_equals, assert_suffix, assert_true, AssertionFailure, Expectation};
pub use wait::{
    poll_until, wait_until, WaitCondition, WaitConfig, WaitTimeout, DEFAULT_POLL_INTERVAL,
    DEFAULT_TIMEOUT,
};
