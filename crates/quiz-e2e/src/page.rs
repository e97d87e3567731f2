//! Page-level browser operations.
//!
//! This module provides the [`Page`] type, which wraps a chromiumoxide tab and
//! implements [`BrowserEngine`] on top of it. Every DOM operation is a small
//! script evaluated in the page: locators are re-resolved on each call, and
//! results come back as JSON strings so they deserialize the same way
//! regardless of how the protocol serializes remote objects.

use crate::engine::{BrowserEngine, ElementSnapshot};
use crate::error::{BrowserError, Result};
use crate::locator::{js_string, Locator};
use crate::wait::{poll_until, WaitConfig, WaitTimeout};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page as ChromePage, ScreenshotParams};
use serde::de::DeserializeOwned;
use tracing::debug;

/// A browser tab with the operations the scenario needs.
#[derive(Debug)]
pub struct Page {
    inner: ChromePage,
    load_wait: WaitConfig,
}

impl Page {
    /// Wraps a chromiumoxide page. `load_wait` bounds how long navigation
    /// may take to reach `document.readyState == "complete"`.
    pub(crate) fn new(page: ChromePage, load_wait: WaitConfig) -> Self {
        Self {
            inner: page,
            load_wait,
        }
    }

    /// Waits for the page load event (`readyState == "complete"`).
    ///
    /// Called by `navigate`; call it directly after navigation triggered from
    /// inside the page.
    ///
    /// # Errors
    ///
    /// Returns the timeout if the document never becomes ready.
    pub async fn wait_for_load(&self, config: WaitConfig) -> std::result::Result<(), WaitTimeout> {
        poll_until(
            move || async move {
                let state: String = self.evaluate("document.readyState").await?;
                Ok::<_, BrowserError>((state == "complete").then_some(()))
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Evaluates `script`, which must produce a `JSON.stringify`d value.
    async fn evaluate_json<T>(&self, script: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let json: String = self.evaluate(script).await?;
        serde_json::from_str(&json).map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }
}

fn resolve_script(locator: &Locator) -> String {
    format!(
        r"JSON.stringify({elements}.map((el, index) => {{
            const style = window.getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            const visible = style.display !== 'none'
                && style.visibility !== 'hidden'
                && style.opacity !== '0'
                && rect.width > 0 && rect.height > 0;
            return {{ index, text: el.innerText ?? el.textContent ?? '', visible }};
        }}))",
        elements = locator.to_js()
    )
}

fn click_script(locator: &Locator, index: usize) -> String {
    format!(
        r"(() => {{
            const el = {elements}[{index}];
            if (!el) return false;
            el.scrollIntoView({{ block: 'center' }});
            el.click();
            return true;
        }})()",
        elements = locator.to_js()
    )
}

fn select_script(locator: &Locator, value: &str) -> String {
    format!(
        r"(() => {{
            const el = {elements}[0];
            if (!el) return 'missing';
            const value = {value};
            if (!Array.from(el.options || []).some(o => o.value === value)) return 'no-option';
            el.value = value;
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return 'ok';
        }})()",
        elements = locator.to_js(),
        value = js_string(value)
    )
}

#[async_trait]
impl BrowserEngine for Page {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("navigating to {}", url);
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(self.load_wait)
            .await
            .map_err(|timeout| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: timeout.to_string(),
            })
    }

    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementSnapshot>> {
        self.evaluate_json(&resolve_script(locator)).await
    }

    async fn click(&self, locator: &Locator, index: usize) -> Result<()> {
        debug!("click {}[{}]", locator, index);
        let clicked: bool = self.evaluate(&click_script(locator, index)).await?;
        if clicked {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound {
                locator: locator.to_string(),
                index,
            })
        }
    }

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<()> {
        debug!("select {:?} in {}", value, locator);
        let outcome: String = self.evaluate(&select_script(locator, value)).await?;
        match outcome.as_str() {
            "ok" => Ok(()),
            "no-option" => Err(BrowserError::ElementNotFound {
                locator: format!("{locator} option[value={value:?}]"),
                index: 0,
            }),
            _ => Err(BrowserError::ElementNotFound {
                locator: locator.to_string(),
                index: 0,
            }),
        }
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    async fn current_url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }
}
