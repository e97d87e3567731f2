//! In-process stand-in for the quiz application.
//!
//! `FakeQuiz` implements the engine capability set over a tiny model of the
//! quiz page. Question text and the results page render a few polls late so
//! the runner's waits are actually exercised.

#![allow(dead_code)]

use async_trait::async_trait;
use quiz_e2e::{BrowserEngine, BrowserError, ElementSnapshot, Locator, Result, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One question as the application stores it.
#[derive(Debug, Clone)]
pub struct AppQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct: usize,
}

/// Everything the fake application renders. Tests mutate this to break
/// individual literals.
#[derive(Debug, Clone)]
pub struct AppData {
    pub title: String,
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub questions: Vec<AppQuestion>,
    pub next_label: String,
    pub submit_label: String,
    pub charts: Vec<(String, bool)>,
    /// Polls of `#question-text` / `#score-text` before a new render lands.
    pub render_lag: u32,
    /// Visible text of `#question-text` while a render is pending.
    pub placeholder: Option<String>,
    /// URL the page ends up on after navigation, if not the requested one.
    pub redirect: Option<String>,
    /// Offsets added to the rendered correct / incorrect counts. The score
    /// text is unaffected.
    pub correct_skew: isize,
    pub incorrect_skew: isize,
}

impl Default for AppData {
    fn default() -> Self {
        let q = |text: &str, options: [&str; 4], correct| AppQuestion {
            text: text.to_string(),
            options: options.iter().map(ToString::to_string).collect(),
            correct,
        };
        Self {
            title: "Dynamic Quiz App".to_string(),
            categories: vec!["science".to_string(), "history".to_string()],
            difficulties: vec!["easy".to_string(), "hard".to_string()],
            questions: vec![
                q(
                    "What is the chemical symbol for water?",
                    ["H2O", "CO2", "O2", "NaCl"],
                    0,
                ),
                q(
                    "What planet is known as the Red Planet?",
                    ["Venus", "Mars", "Jupiter", "Saturn"],
                    1,
                ),
                q(
                    "What is the largest mammal?",
                    ["Elephant", "Giraffe", "Blue Whale", "Orca"],
                    2,
                ),
            ],
            next_label: "Next".to_string(),
            submit_label: "Submit".to_string(),
            charts: vec![
                ("performance-chart".to_string(), true),
                ("time-chart".to_string(), true),
            ],
            render_lag: 2,
            placeholder: None,
            redirect: None,
            correct_skew: 0,
            incorrect_skew: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Blank,
    Landing,
    Quiz,
    Results,
}

#[derive(Debug)]
struct Dom {
    screen: Screen,
    url: String,
    category: Option<String>,
    difficulty: Option<String>,
    current: usize,
    displayed: Option<usize>,
    answers: Vec<Option<usize>>,
    lag: u32,
    results_rendered: bool,
}

/// Shared observation handles that outlive the engine.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub closes: Arc<AtomicUsize>,
    pub actions: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }
}

pub struct FakeQuiz {
    app: AppData,
    dom: Mutex<Dom>,
    probe: Probe,
    pub screenshots_fail: bool,
}

impl FakeQuiz {
    pub fn new(app: AppData) -> (Self, Probe) {
        let probe = Probe::default();
        let answers = vec![None; app.questions.len()];
        let engine = Self {
            app,
            dom: Mutex::new(Dom {
                screen: Screen::Blank,
                url: "about:blank".to_string(),
                category: None,
                difficulty: None,
                current: 0,
                displayed: None,
                answers,
                lag: 0,
                results_rendered: false,
            }),
            probe: probe.clone(),
            screenshots_fail: false,
        };
        (engine, probe)
    }

    pub fn conforming() -> (Self, Probe) {
        Self::new(AppData::default())
    }

    fn log(&self, action: String) {
        self.probe.actions.lock().unwrap().push(action);
    }

    fn one(text: impl Into<String>, visible: bool) -> Vec<ElementSnapshot> {
        vec![ElementSnapshot {
            index: 0,
            text: text.into(),
            visible,
        }]
    }

    fn score(&self, dom: &Dom) -> usize {
        self.app
            .questions
            .iter()
            .zip(&dom.answers)
            .filter(|(q, a)| **a == Some(q.correct))
            .count()
    }

    fn render(&self, dom: &mut Dom, locator: &Locator) -> Vec<ElementSnapshot> {
        let Locator::Id(id) = locator else {
            if *locator == Locator::css(".option-label") && dom.screen == Screen::Quiz {
                if let Some(shown) = dom.displayed {
                    return self.app.questions[shown]
                        .options
                        .iter()
                        .enumerate()
                        .map(|(index, text)| ElementSnapshot {
                            index,
                            text: text.clone(),
                            visible: true,
                        })
                        .collect();
                }
            }
            return vec![];
        };

        match (dom.screen, id.as_str()) {
            (Screen::Landing, "category" | "difficulty" | "start-btn") => Self::one("", true),
            (Screen::Quiz, "question-text") => {
                if dom.displayed != Some(dom.current) {
                    if dom.lag > 0 {
                        dom.lag -= 1;
                    } else {
                        dom.displayed = Some(dom.current);
                    }
                }
                match (dom.displayed, &self.app.placeholder) {
                    (Some(shown), _) if shown == dom.current => {
                        Self::one(self.app.questions[shown].text.clone(), true)
                    }
                    (_, Some(placeholder)) => Self::one(placeholder.clone(), true),
                    (Some(shown), None) => Self::one(self.app.questions[shown].text.clone(), true),
                    (None, None) => vec![],
                }
            }
            (Screen::Quiz, "next-btn") => {
                let last = dom.displayed == Some(self.app.questions.len() - 1);
                let label = if last {
                    &self.app.submit_label
                } else {
                    &self.app.next_label
                };
                Self::one(label.clone(), true)
            }
            (Screen::Results, "score-text") => {
                if !dom.results_rendered {
                    if dom.lag > 0 {
                        dom.lag -= 1;
                        return Self::one("", false);
                    }
                    dom.results_rendered = true;
                }
                let text = format!("{} / {}", self.score(dom), self.app.questions.len());
                Self::one(text, true)
            }
            (Screen::Results, "correct-count") if dom.results_rendered => {
                let correct = self.score(dom) as isize + self.app.correct_skew;
                Self::one(correct.to_string(), true)
            }
            (Screen::Results, "incorrect-count") if dom.results_rendered => {
                let incorrect =
                    (self.app.questions.len() - self.score(dom)) as isize + self.app.incorrect_skew;
                Self::one(incorrect.to_string(), true)
            }
            (Screen::Results, chart) if dom.results_rendered => self
                .app
                .charts
                .iter()
                .find(|(name, _)| name == chart)
                .map(|(_, visible)| Self::one("", *visible))
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn missing(locator: &Locator, index: usize) -> BrowserError {
        BrowserError::ElementNotFound {
            locator: locator.to_string(),
            index,
        }
    }
}

#[async_trait]
impl BrowserEngine for FakeQuiz {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.log(format!("navigate {url}"));
        let mut dom = self.dom.lock().unwrap();
        dom.screen = Screen::Landing;
        dom.url = self.app.redirect.clone().unwrap_or_else(|| url.to_string());
        Ok(())
    }

    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementSnapshot>> {
        let mut dom = self.dom.lock().unwrap();
        Ok(self.render(&mut dom, locator))
    }

    async fn click(&self, locator: &Locator, index: usize) -> Result<()> {
        self.log(format!("click {locator}[{index}]"));
        let mut dom = self.dom.lock().unwrap();
        if self.render(&mut dom, locator).len() <= index {
            return Err(Self::missing(locator, index));
        }

        match locator.to_string().as_str() {
            "#start-btn" => {
                if dom.category.is_some() && dom.difficulty.is_some() {
                    dom.screen = Screen::Quiz;
                    dom.current = 0;
                    dom.displayed = None;
                    dom.lag = self.app.render_lag;
                }
            }
            ".option-label" => {
                let current = dom.current;
                dom.answers[current] = Some(index);
            }
            "#next-btn" => {
                if dom.current + 1 < self.app.questions.len() {
                    dom.current += 1;
                } else {
                    dom.screen = Screen::Results;
                }
                dom.lag = self.app.render_lag;
            }
            _ => {}
        }
        Ok(())
    }

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<()> {
        self.log(format!("select {locator}={value}"));
        let mut dom = self.dom.lock().unwrap();
        if self.render(&mut dom, locator).is_empty() {
            return Err(Self::missing(locator, 0));
        }
        match locator.to_string().as_str() {
            "#category" if self.app.categories.iter().any(|c| c == value) => {
                dom.category = Some(value.to_string());
                Ok(())
            }
            "#difficulty" if self.app.difficulties.iter().any(|d| d == value) => {
                dom.difficulty = Some(value.to_string());
                Ok(())
            }
            _ => Err(Self::missing(locator, 0)),
        }
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.log("screenshot".to_string());
        if self.screenshots_fail {
            Err(BrowserError::ScriptExecutionFailed(
                "Page.captureScreenshot failed".to_string(),
            ))
        } else {
            Ok(b"\x89PNG\r\n\x1a\nfake".to_vec())
        }
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.dom.lock().unwrap().url.clone())
    }

    async fn title(&self) -> Result<String> {
        let dom = self.dom.lock().unwrap();
        Ok(match dom.screen {
            Screen::Blank => String::new(),
            _ => self.app.title.clone(),
        })
    }
}

#[async_trait]
impl Session for FakeQuiz {
    async fn close(self) -> Result<()> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        self.log("close".to_string());
        Ok(())
    }
}
