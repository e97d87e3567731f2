//! The capability set consumed from the browser engine.
//!
//! Everything the pipeline does to a document goes through [`BrowserEngine`].
//! The chromiumoxide-backed [`BrowserSession`](crate::session::BrowserSession)
//! is the production implementation; tests substitute an in-process fake.
//! Calls suspend until the engine has answered, so from the runner's point of
//! view each one is a blocking step.

use crate::error::Result;
use crate::locator::Locator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Point-in-time view of one resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Position within the locator's result list.
    pub index: usize,
    /// Rendered text (`innerText`), unnormalized.
    pub text: String,
    /// Whether the element is rendered with a non-empty box.
    pub visible: bool,
}

/// Operations on the single live document.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Loads `url` and returns once top-level navigation reports ready.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Resolves `locator` against the current document.
    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementSnapshot>>;

    /// Clicks the element at `index` of `locator`'s result list.
    async fn click(&self, locator: &Locator, index: usize) -> Result<()>;

    /// Selects the option whose value is `value` in the first `<select>`
    /// matched by `locator`, firing `input` and `change`.
    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Captures the current viewport as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Returns the current page URL.
    async fn current_url(&self) -> Result<String>;

    /// Returns the document title.
    async fn title(&self) -> Result<String>;

    /// Resolves `locator` and returns the element at `index`, if any.
    async fn element(&self, locator: &Locator, index: usize) -> Result<Option<ElementSnapshot>> {
        Ok(self.resolve(locator).await?.into_iter().nth(index))
    }
}

/// An engine that owns releasable resources.
///
/// `close` consumes the session, so the type system rules out a second
/// teardown; [`execute`](crate::scenario::execute) makes sure the first one
/// happens.
#[async_trait]
pub trait Session: BrowserEngine + Sized {
    /// Releases every engine resource held by this session.
    async fn close(self) -> Result<()>;
}
