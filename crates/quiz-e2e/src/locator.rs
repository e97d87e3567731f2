//! Element locators.
//!
//! A [`Locator`] names elements in the current document. It is never resolved
//! ahead of time: every engine call turns it into a fresh `querySelectorAll`
//! so that re-rendered nodes are picked up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to zero or more elements in the current document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "by", content = "value")]
pub enum Locator {
    /// Element id, without the leading `#`.
    Id(String),
    /// Arbitrary CSS selector.
    Css(String),
}

impl Locator {
    /// Locates by element id.
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Locates by CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// JavaScript expression evaluating to an array of the matched elements.
    ///
    /// The selector is JSON-encoded so quotes, backticks and newlines cannot
    /// break out of the string literal.
    pub fn to_js(&self) -> String {
        match self {
            Self::Id(id) => {
                let escaped = js_string(id);
                format!("(() => {{ const el = document.getElementById({escaped}); return el ? [el] : []; }})()")
            }
            Self::Css(selector) => {
                let escaped = js_string(selector);
                format!("Array.from(document.querySelectorAll({escaped}))")
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Css(selector) => f.write_str(selector),
        }
    }
}

/// Encodes `value` as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
    // serde_json cannot fail on a &str
    serde_json::Value::String(value.to_string()).to_string()
}
