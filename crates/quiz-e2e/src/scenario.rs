//! The quiz scenario as an explicit state machine.
//!
//! A [`Scenario`] is an ordered list of [`Checkpoint`]s. Each checkpoint names
//! the [`ScenarioState`] it starts from and the one it leaves the application
//! in. Construction rejects plans whose indices skip or whose states do not
//! chain, and the [`ScenarioRun`] cursor is private, so a checkpoint can only
//! run once every earlier checkpoint has passed. The first failure moves the
//! run to [`ScenarioState::Failed`], which absorbs everything after it.

use crate::engine::{BrowserEngine, Session};
use crate::error::{Result as BrowserResult, ScenarioError};
use crate::fixture::QuizFixture;
use crate::locator::Locator;
use crate::recorder::ArtifactRecorder;
use crate::verify::{assert_equals, assert_suffix, verify_expectation, Expectation};
use crate::wait::{wait_until, WaitCondition, WaitConfig};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Where the application is in the expected journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "at")]
pub enum ScenarioState {
    /// Nothing has been loaded yet.
    NotStarted,
    /// Entry page loaded and identified.
    Landing,
    /// Category and difficulty chosen, quiz started.
    Configured,
    /// Showing question `n` (1-based).
    Question(usize),
    /// Results page requested.
    Results,
    /// Every checkpoint passed.
    Finished,
    /// Checkpoint `n` failed. Absorbing.
    Failed(usize),
}

impl ScenarioState {
    /// Resolves implicit transitions: a configured quiz is on question 1.
    #[must_use]
    pub fn settle(self) -> Self {
        match self {
            Self::Configured => Self::Question(1),
            other => other,
        }
    }

    /// True once no further checkpoint may run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed(_))
    }
}

impl fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Landing => f.write_str("landing"),
            Self::Configured => f.write_str("configured"),
            Self::Question(n) => write!(f, "question {n}"),
            Self::Results => f.write_str("results"),
            Self::Finished => f.write_str("finished"),
            Self::Failed(n) => write!(f, "failed at checkpoint {n}"),
        }
    }
}

/// One action, observation or assertion inside a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Load a resource and wait for top-level navigation.
    Navigate(String),
    /// Assert `document.title`.
    ExpectTitle {
        /// Expected title.
        title: String,
        /// Message used on failure.
        message: String,
    },
    /// Assert the current URL ends with `suffix`.
    ExpectUrlSuffix {
        /// Expected URL suffix.
        suffix: String,
        /// Message used on failure.
        message: String,
    },
    /// Choose an option by value in a `<select>`.
    Select {
        /// The `<select>` element.
        locator: Locator,
        /// Option value to choose.
        value: String,
    },
    /// Click element `index` of `locator`.
    Click {
        /// Elements to choose from.
        locator: Locator,
        /// Position of the element to click.
        index: usize,
    },
    /// Block until the condition holds.
    WaitFor(WaitCondition),
    /// Assert on a single element.
    Expect(Expectation),
    /// Record a best-effort screenshot.
    Capture(String),
}

/// An ordered, verifiable step of the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// 1-based position in the scenario.
    pub index: usize,
    /// Human-readable name.
    pub label: String,
    /// State this checkpoint requires.
    pub from: ScenarioState,
    /// State this checkpoint leaves behind on success.
    pub to: ScenarioState,
    /// What to do, in order.
    pub steps: Vec<Step>,
}

/// Reasons a list of checkpoints is not a valid scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No checkpoints at all.
    #[error("scenario has no checkpoints")]
    Empty,

    /// The quiz fixture lists no questions.
    #[error("quiz fixture has no questions")]
    NoQuestions,

    /// Indices must be 1..N without gaps.
    #[error("checkpoint at position {position} has index {found}, expected {expected}")]
    IndexGap {
        /// Zero-based position in the list.
        position: usize,
        /// Index that position must carry.
        expected: usize,
        /// Index it carries.
        found: usize,
    },

    /// A checkpoint does not start where its predecessor ended.
    #[error("checkpoint {index} starts from {found}, but the previous checkpoint ends at {expected}")]
    Disconnected {
        /// Offending checkpoint.
        index: usize,
        /// Where the predecessor leaves the application.
        expected: ScenarioState,
        /// Where this checkpoint expects to start.
        found: ScenarioState,
    },
}

/// A validated, ordered plan of checkpoints plus its wait budget.
#[derive(Debug, Clone)]
pub struct Scenario {
    checkpoints: Vec<Checkpoint>,
    wait: WaitConfig,
}

impl Scenario {
    /// Validates and wraps a list of checkpoints.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if the list is empty, indices are not 1..N, or
    /// states do not chain from [`ScenarioState::NotStarted`].
    pub fn new(checkpoints: Vec<Checkpoint>, wait: WaitConfig) -> Result<Self, PlanError> {
        if checkpoints.is_empty() {
            return Err(PlanError::Empty);
        }

        let mut expected_from = ScenarioState::NotStarted;
        for (position, checkpoint) in checkpoints.iter().enumerate() {
            if checkpoint.index != position + 1 {
                return Err(PlanError::IndexGap {
                    position,
                    expected: position + 1,
                    found: checkpoint.index,
                });
            }
            if checkpoint.from != expected_from {
                return Err(PlanError::Disconnected {
                    index: checkpoint.index,
                    expected: expected_from,
                    found: checkpoint.from,
                });
            }
            expected_from = checkpoint.to.settle();
        }

        Ok(Self { checkpoints, wait })
    }

    /// Builds the quiz journey for `fixture`, starting at `entry_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoQuestions`] if the fixture has no questions.
    pub fn quiz(entry_url: &str, fixture: &QuizFixture, wait: WaitConfig) -> Result<Self, PlanError> {
        let sel = &fixture.selectors;
        let questions = &fixture.questions;
        let first = questions.first().ok_or(PlanError::NoQuestions)?;
        let mut shots = ShotNames::default();
        let mut checkpoints = Vec::with_capacity(questions.len() + 3);

        checkpoints.push(Checkpoint {
            index: 1,
            label: "landing page".to_string(),
            from: ScenarioState::NotStarted,
            to: ScenarioState::Landing,
            steps: vec![
                Step::Navigate(entry_url.to_string()),
                Step::ExpectTitle {
                    title: fixture.title.clone(),
                    message: "Page title is incorrect.".to_string(),
                },
                Step::ExpectUrlSuffix {
                    suffix: fixture.url_suffix.clone(),
                    message: "Page URL is incorrect.".to_string(),
                },
                Step::Capture(shots.next("LandingPage")),
            ],
        });

        checkpoints.push(Checkpoint {
            index: 2,
            label: "start quiz".to_string(),
            from: ScenarioState::Landing,
            to: ScenarioState::Configured,
            steps: vec![
                Step::Select {
                    locator: sel.category.clone(),
                    value: fixture.category.clone(),
                },
                Step::Select {
                    locator: sel.difficulty.clone(),
                    value: fixture.difficulty.clone(),
                },
                Step::Click {
                    locator: sel.start_button.clone(),
                    index: 0,
                },
                Step::WaitFor(WaitCondition::Visible(sel.question_text.clone())),
                Step::Expect(Expectation::visible(
                    sel.question_text.clone(),
                    "Quiz screen did not appear.",
                )),
                Step::WaitFor(WaitCondition::TextEquals(
                    sel.question_text.clone(),
                    first.text.clone(),
                )),
                Step::Expect(Expectation::text(
                    sel.question_text.clone(),
                    first.text.clone(),
                    "First question text is incorrect.",
                )),
                Step::Capture(shots.next("FirstQuestionDisplayed")),
            ],
        });

        for (i, question) in questions.iter().enumerate() {
            let number = i + 1;
            let mut steps = vec![
                Step::Expect(Expectation::text_at(
                    sel.option_labels.clone(),
                    question.correct_index,
                    question.correct_label.clone(),
                    format!(
                        "Option {} of question {number} is incorrect.",
                        question.correct_index
                    ),
                )),
                Step::Click {
                    locator: sel.option_labels.clone(),
                    index: question.correct_index,
                },
                Step::Capture(shots.next(&format!("Question{number}_Answered"))),
            ];

            let (label, to) = match questions.get(number) {
                Some(next) => {
                    steps.push(Step::Click {
                        locator: sel.next_button.clone(),
                        index: 0,
                    });
                    steps.push(Step::WaitFor(WaitCondition::TextEquals(
                        sel.question_text.clone(),
                        next.text.clone(),
                    )));
                    (
                        format!("answer question {number}"),
                        ScenarioState::Question(number + 1),
                    )
                }
                None => {
                    steps.push(Step::Expect(Expectation::text(
                        sel.next_button.clone(),
                        fixture.submit_label.clone(),
                        format!(
                            "Button text should be '{}' on last question.",
                            fixture.submit_label
                        ),
                    )));
                    steps.push(Step::Click {
                        locator: sel.next_button.clone(),
                        index: 0,
                    });
                    (
                        format!("answer question {number} and submit"),
                        ScenarioState::Results,
                    )
                }
            };

            checkpoints.push(Checkpoint {
                index: checkpoints.len() + 1,
                label,
                from: ScenarioState::Question(number),
                to,
                steps,
            });
        }

        let mut steps = vec![
            Step::WaitFor(WaitCondition::Visible(sel.score_text.clone())),
            Step::Expect(Expectation::text(
                sel.score_text.clone(),
                fixture.score_text.clone(),
                "Final score is incorrect.",
            )),
            Step::Expect(Expectation::text(
                sel.correct_count.clone(),
                fixture.correct_count.clone(),
                "Correct count is incorrect.",
            )),
            Step::Expect(Expectation::text(
                sel.incorrect_count.clone(),
                fixture.incorrect_count.clone(),
                "Incorrect count is incorrect.",
            )),
        ];
        steps.extend(fixture.charts.iter().map(|chart| {
            Step::Expect(Expectation::visible(
                Locator::id(chart.clone()),
                format!("Chart '{chart}' is not displayed."),
            ))
        }));
        steps.push(Step::Capture(shots.next("ResultAnalysisPage")));

        checkpoints.push(Checkpoint {
            index: checkpoints.len() + 1,
            label: "results".to_string(),
            from: ScenarioState::Results,
            to: ScenarioState::Finished,
            steps,
        });

        Self::new(checkpoints, wait)
    }

    /// The validated checkpoints, in execution order.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Wait budget applied to every [`Step::WaitFor`].
    pub fn wait_config(&self) -> WaitConfig {
        self.wait
    }

    /// Starts a run at [`ScenarioState::NotStarted`].
    pub fn start(&self) -> ScenarioRun<'_> {
        ScenarioRun {
            scenario: self,
            state: ScenarioState::NotStarted,
            next: 0,
            results: Vec::with_capacity(self.checkpoints.len()),
            artifacts: Vec::new(),
            error: None,
            started: Instant::now(),
        }
    }

    /// Runs every checkpoint in order against `engine`.
    pub async fn run(
        &self,
        engine: &dyn BrowserEngine,
        recorder: &dyn ArtifactRecorder,
    ) -> ScenarioReport {
        let mut run = self.start();
        while run.advance(engine, recorder).await.is_some() {}
        run.finish()
    }
}

/// Sequential artifact names: `01_LandingPage`, `02_...`.
#[derive(Debug, Default)]
struct ShotNames(usize);

impl ShotNames {
    fn next(&mut self, name: &str) -> String {
        self.0 += 1;
        format!("{:02}_{name}", self.0)
    }
}

/// Outcome of a single checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    /// Every step succeeded.
    Passed,
    /// A step failed; see the report's failure.
    Failed,
    /// Never attempted because an earlier checkpoint failed.
    NotRun,
}

/// Per-checkpoint line of a [`ScenarioReport`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckpointReport {
    /// Checkpoint index.
    pub index: usize,
    /// Checkpoint label.
    pub label: String,
    /// Outcome.
    pub status: CheckpointStatus,
    /// Wall time spent on the checkpoint.
    pub duration_ms: u64,
}

/// Serializable description of the failure that ended a run.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    /// Failing checkpoint, or `None` if the session never opened.
    pub checkpoint: Option<usize>,
    /// Failure class (`assertion`, `condition_timeout`, ...).
    pub kind: &'static str,
    /// Human-readable message naming expected and actual values.
    pub message: String,
}

/// Outcome of a scenario run, handed to the reporting side.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    /// True when every checkpoint passed.
    pub passed: bool,
    /// State the run ended in.
    pub final_state: ScenarioState,
    /// One entry per planned checkpoint.
    pub checkpoints: Vec<CheckpointReport>,
    /// Screenshots written during the run.
    pub artifacts: Vec<PathBuf>,
    /// Why the run failed, if it did.
    pub failure: Option<FailureSummary>,
    /// Total wall time.
    pub duration_ms: u64,
    /// The error itself, for callers that need to match on it.
    #[serde(skip)]
    pub error: Option<ScenarioError>,
}

impl ScenarioReport {
    /// Report for a run whose session could not be opened.
    pub fn session_failed(scenario: &Scenario, err: ScenarioError) -> Self {
        Self {
            passed: false,
            final_state: ScenarioState::Failed(0),
            checkpoints: scenario
                .checkpoints
                .iter()
                .map(not_run)
                .collect(),
            artifacts: Vec::new(),
            failure: Some(FailureSummary {
                checkpoint: None,
                kind: err.kind(),
                message: err.to_string(),
            }),
            duration_ms: 0,
            error: Some(err),
        }
    }

    /// Number of checkpoints that passed.
    pub fn passed_count(&self) -> usize {
        self.checkpoints
            .iter()
            .filter(|c| c.status == CheckpointStatus::Passed)
            .count()
    }
}

fn not_run(checkpoint: &Checkpoint) -> CheckpointReport {
    CheckpointReport {
        index: checkpoint.index,
        label: checkpoint.label.clone(),
        status: CheckpointStatus::NotRun,
        duration_ms: 0,
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// An in-progress run of a [`Scenario`].
#[derive(Debug)]
pub struct ScenarioRun<'a> {
    scenario: &'a Scenario,
    state: ScenarioState,
    next: usize,
    results: Vec<CheckpointReport>,
    artifacts: Vec<PathBuf>,
    error: Option<ScenarioError>,
    started: Instant,
}

impl ScenarioRun<'_> {
    /// Current state.
    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// Runs the next checkpoint, if the run is still live.
    ///
    /// Returns `None` once the run is finished or failed; a failed run never
    /// executes anything again.
    pub async fn advance(
        &mut self,
        engine: &dyn BrowserEngine,
        recorder: &dyn ArtifactRecorder,
    ) -> Option<CheckpointStatus> {
        if self.state.is_terminal() {
            return None;
        }
        let scenario = self.scenario;
        let checkpoint = scenario.checkpoints.get(self.next)?;
        if checkpoint.from != self.state.settle() {
            return None;
        }

        let span = info_span!("checkpoint", index = checkpoint.index, label = %checkpoint.label);
        let started = Instant::now();
        let outcome = self
            .run_steps(checkpoint, engine, recorder)
            .instrument(span)
            .await;
        let duration_ms = millis(started.elapsed());
        self.next += 1;

        let status = match outcome {
            Ok(()) => {
                info!(
                    "checkpoint {} ({}) passed: {} -> {}",
                    checkpoint.index, checkpoint.label, self.state, checkpoint.to
                );
                self.state = checkpoint.to;
                CheckpointStatus::Passed
            }
            Err(err) => {
                error!(
                    "checkpoint {} ({}) failed: {}",
                    checkpoint.index, checkpoint.label, err
                );
                self.state = ScenarioState::Failed(checkpoint.index);
                self.error = Some(err);
                CheckpointStatus::Failed
            }
        };

        self.results.push(CheckpointReport {
            index: checkpoint.index,
            label: checkpoint.label.clone(),
            status,
            duration_ms,
        });
        Some(status)
    }

    async fn run_steps(
        &mut self,
        checkpoint: &Checkpoint,
        engine: &dyn BrowserEngine,
        recorder: &dyn ArtifactRecorder,
    ) -> Result<(), ScenarioError> {
        for step in &checkpoint.steps {
            self.perform(step, engine, recorder).await?;
        }
        Ok(())
    }

    async fn perform(
        &mut self,
        step: &Step,
        engine: &dyn BrowserEngine,
        recorder: &dyn ArtifactRecorder,
    ) -> Result<(), ScenarioError> {
        debug!("step: {:?}", step);
        match step {
            Step::Navigate(url) => engine.navigate(url).await?,
            Step::ExpectTitle { title, message } => {
                let actual = engine.title().await?;
                info!("page title: {}", actual);
                assert_equals(&actual, title, message)?;
            }
            Step::ExpectUrlSuffix { suffix, message } => {
                let actual = engine.current_url().await?;
                info!("page url: {}", actual);
                assert_suffix(&actual, suffix, message)?;
            }
            Step::Select { locator, value } => engine.select_by_value(locator, value).await?,
            Step::Click { locator, index } => engine.click(locator, *index).await?,
            Step::WaitFor(condition) => {
                wait_until(engine, condition, self.scenario.wait).await?;
            }
            Step::Expect(expectation) => verify_expectation(engine, expectation).await?,
            Step::Capture(label) => {
                if let Some(path) = recorder.capture(engine, label).await {
                    self.artifacts.push(path);
                }
            }
        }
        Ok(())
    }

    /// Closes the run into a report. Checkpoints never reached are listed as
    /// [`CheckpointStatus::NotRun`].
    pub fn finish(self) -> ScenarioReport {
        let mut checkpoints = self.results;
        checkpoints.extend(self.scenario.checkpoints[self.next..].iter().map(not_run));

        let failure = self.error.as_ref().map(|err| FailureSummary {
            checkpoint: match self.state {
                ScenarioState::Failed(index) => Some(index),
                _ => None,
            },
            kind: err.kind(),
            message: err.to_string(),
        });

        ScenarioReport {
            passed: self.error.is_none() && self.next == self.scenario.checkpoints.len(),
            final_state: self.state,
            checkpoints,
            artifacts: self.artifacts,
            failure,
            duration_ms: millis(self.started.elapsed()),
            error: self.error,
        }
    }
}

/// Opens a session, runs `scenario`, and closes the session.
///
/// Teardown happens exactly once on every path where the session opened,
/// whatever the outcome. A failed `close` is logged and does not change the
/// report.
pub async fn execute<S, Fut>(
    open: Fut,
    scenario: &Scenario,
    recorder: &dyn ArtifactRecorder,
) -> ScenarioReport
where
    S: Session,
    Fut: Future<Output = BrowserResult<S>>,
{
    let session = match open.await {
        Ok(session) => session,
        Err(err) => {
            error!("failed to open browser session: {}", err);
            return ScenarioReport::session_failed(scenario, ScenarioError::SessionInit(err));
        }
    };

    let report = scenario.run(&session, recorder).await;

    match session.close().await {
        Ok(()) => info!("browser closed"),
        Err(err) => warn!("failed to close browser session: {}", err),
    }

    report
}
