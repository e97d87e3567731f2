//! Browser session lifecycle.
//!
//! [`BrowserSession`] owns one Chrome process and one page for the whole
//! scenario. It is opened once, handed to the runner by reference, and
//! closed by consuming it.
//!
//! # Resource Safety
//!
//! `BrowserSession` implements Drop so the browser process is killed even if
//! the runner panics. Explicit cleanup via [`Session::close`] is preferred for
//! graceful shutdown; [`execute`](crate::scenario::execute) always calls it.

use crate::engine::{BrowserEngine, ElementSnapshot, Session};
use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::page::Page;
use crate::wait::WaitConfig;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Configuration for launching the session's browser.
///
/// Defaults suit headless runs in CI and containers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode (default: true, unless the `visible` feature is on).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<PathBuf>,

    /// Budget for navigation to report ready.
    pub load_wait: WaitConfig,
}

impl SessionConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome binary.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Sets the navigation budget.
    #[must_use]
    pub fn with_load_wait(mut self, load_wait: WaitConfig) -> Self {
        self.load_wait = load_wait;
        self
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        } else {
            config = config.with_head();
        }

        let (width, height) = self.window_size;
        config = config
            .window_size(width, height)
            .viewport(None)
            .arg(format!("--window-size={width},{height}"));

        // A unique profile directory keeps parallel sessions from tripping
        // Chrome's ProcessSingleton lock.
        let user_data_dir =
            std::env::temp_dir().join(format!("quiz-e2e-{}", uuid::Uuid::new_v4()));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            window_size: (1920, 1080),
            args: vec![
                // Containers usually lack user namespaces. Only ever point
                // this at trusted local fixtures.
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
            load_wait: WaitConfig::default(),
        }
    }
}

/// One live browser plus the page the scenario drives.
pub struct BrowserSession {
    browser: Option<Browser>,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches Chrome and opens the session's page.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable, or
    /// fails to start, and `ConnectionFailed` if the page cannot be created.
    pub async fn open(config: SessionConfig) -> Result<Self> {
        debug!("launching browser with config: {:?}", config);

        let browser_config = config.to_browser_config()?;

        let (mut browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP traffic while the handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("failed to close browser after page error: {}", close_err);
                }
                handler.abort();
                return Err(BrowserError::ConnectionFailed(e.to_string()));
            }
        };

        debug!("browser session opened");

        Ok(Self {
            browser: Some(browser),
            page: Page::new(page, config.load_wait),
            handler,
        })
    }

    /// The page the session drives.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Returns true if the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.browser.is_none()
    }
}

#[async_trait]
impl BrowserEngine for BrowserSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.navigate(url).await
    }

    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementSnapshot>> {
        self.page.resolve(locator).await
    }

    async fn click(&self, locator: &Locator, index: usize) -> Result<()> {
        self.page.click(locator, index).await
    }

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<()> {
        self.page.select_by_value(locator, value).await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.page.screenshot().await
    }

    async fn current_url(&self) -> Result<String> {
        self.page.current_url().await
    }

    async fn title(&self) -> Result<String> {
        self.page.title().await
    }
}

#[async_trait]
impl Session for BrowserSession {
    async fn close(mut self) -> Result<()> {
        let Some(mut browser) = self.browser.take() else {
            return Err(BrowserError::AlreadyClosed);
        };

        debug!("closing browser gracefully");
        let closed = browser
            .close()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()));
        if closed.is_ok() {
            if let Err(e) = browser.wait().await {
                warn!("browser process did not exit cleanly: {}", e);
            }
        }
        self.handler.abort();
        closed.map(|_| ())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Drop can't await; chromiumoxide's Browser drop kills the process.
        if self.browser.is_some() {
            warn!("BrowserSession dropped without close() - forcing shutdown via Drop");
        }
        self.handler.abort();
    }
}

/// Turns a navigation target into a URL.
///
/// Anything with a URL scheme is returned unchanged. Everything else is a
/// local path, made absolute against the working directory and converted to
/// a `file://` URL.
///
/// # Errors
///
/// Fails if the working directory cannot be determined.
pub fn resolve_target(target: &str) -> std::io::Result<String> {
    if has_scheme(target) {
        return Ok(target.to_string());
    }
    let absolute = std::path::absolute(Path::new(target))?;
    Ok(file_url(&absolute))
}

fn has_scheme(target: &str) -> bool {
    const SCHEMES: [&str; 5] = ["http:", "https:", "file:", "about:", "data:"];
    let lower = target.to_ascii_lowercase();
    SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let encoded: Vec<String> = raw
        .split('/')
        .map(|segment| {
            // Keep drive letters like `C:` readable.
            if segment.len() == 2 && segment.ends_with(':') {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect();
    let joined = encoded.join("/");
    if joined.starts_with('/') {
        format!("file://{joined}")
    } else {
        format!("file:///{joined}")
    }
}
