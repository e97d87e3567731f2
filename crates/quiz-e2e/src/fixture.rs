//! Literals the quiz application is expected to render.
//!
//! These values are the scenario's external contract with the fixture
//! application. The defaults must stay verbatim; configuration may replace
//! them to point the runner at a different build of the same app.

use crate::locator::Locator;
use serde::{Deserialize, Serialize};

/// One question of the expected quiz flow.
///
/// Options are addressed by position. The application must render them in a
/// stable order; the runner never searches for a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFixture {
    /// Question text as rendered.
    pub text: String,
    /// Position of the correct option in the option list.
    pub correct_index: usize,
    /// Label rendered at `correct_index`.
    pub correct_label: String,
}

impl QuestionFixture {
    /// Creates a question fixture.
    pub fn new(text: impl Into<String>, correct_index: usize, correct_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct_index,
            correct_label: correct_label.into(),
        }
    }
}

/// Element locators of the quiz application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizSelectors {
    /// Category `<select>`.
    pub category: Locator,
    /// Difficulty `<select>`.
    pub difficulty: Locator,
    /// Control that starts the quiz.
    pub start_button: Locator,
    /// Current question text.
    pub question_text: Locator,
    /// Option labels of the current question, in display order.
    pub option_labels: Locator,
    /// "Next" control, relabelled on the last question.
    pub next_button: Locator,
    /// Final score.
    pub score_text: Locator,
    /// Correct answer count.
    pub correct_count: Locator,
    /// Incorrect answer count.
    pub incorrect_count: Locator,
}

impl Default for QuizSelectors {
    fn default() -> Self {
        Self {
            category: Locator::id("category"),
            difficulty: Locator::id("difficulty"),
            start_button: Locator::id("start-btn"),
            question_text: Locator::id("question-text"),
            option_labels: Locator::css(".option-label"),
            next_button: Locator::id("next-btn"),
            score_text: Locator::id("score-text"),
            correct_count: Locator::id("correct-count"),
            incorrect_count: Locator::id("incorrect-count"),
        }
    }
}

/// The complete expected journey through the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizFixture {
    /// Expected `document.title` of the landing page.
    pub title: String,
    /// Suffix the landing page URL must end with.
    pub url_suffix: String,
    /// `<option>` value chosen in the category control.
    pub category: String,
    /// `<option>` value chosen in the difficulty control.
    pub difficulty: String,
    /// Questions in the order the application presents them.
    pub questions: Vec<QuestionFixture>,
    /// Label of the next control on the last question.
    pub submit_label: String,
    /// Final score text.
    pub score_text: String,
    /// Number of correct answers shown on the results page.
    pub correct_count: String,
    /// Number of incorrect answers shown on the results page.
    pub incorrect_count: String,
    /// Ids of the chart elements on the results page.
    pub charts: Vec<String>,
    /// Element locators.
    pub selectors: QuizSelectors,
}

/// Entry resource of the quiz application.
pub const DEFAULT_ENTRY: &str = "quiz_app.html";

impl Default for QuizFixture {
    fn default() -> Self {
        Self {
            title: "Dynamic Quiz App".to_string(),
            url_suffix: DEFAULT_ENTRY.to_string(),
            category: "science".to_string(),
            difficulty: "easy".to_string(),
            questions: vec![
                QuestionFixture::new("What is the chemical symbol for water?", 0, "H2O"),
                QuestionFixture::new("What planet is known as the Red Planet?", 1, "Mars"),
                QuestionFixture::new("What is the largest mammal?", 2, "Blue Whale"),
            ],
            submit_label: "Submit".to_string(),
            score_text: "3 / 3".to_string(),
            correct_count: "3".to_string(),
            incorrect_count: "0".to_string(),
            charts: vec!["performance-chart".to_string(), "time-chart".to_string()],
            selectors: QuizSelectors::default(),
        }
    }
}
