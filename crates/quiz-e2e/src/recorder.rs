//! Best-effort screenshot artifacts.
//!
//! Capture is diagnostic only. A recorder never returns an error: failures
//! are logged as warnings and the scenario carries on.

use crate::engine::BrowserEngine;
use crate::error::ArtifactCaptureError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Records a visual snapshot of the current session under a label.
#[async_trait]
pub trait ArtifactRecorder: Send + Sync {
    /// Captures the engine's viewport as `label`.
    ///
    /// Returns where the artifact was written, or `None` if nothing was
    /// recorded.
    async fn capture(&self, engine: &dyn BrowserEngine, label: &str) -> Option<PathBuf>;
}

/// Writes PNG screenshots to `<dir>/<label>.png`.
#[derive(Debug, Clone)]
pub struct ScreenshotRecorder {
    dir: PathBuf,
}

impl ScreenshotRecorder {
    /// Creates a recorder writing into `dir`. The directory is created on
    /// first capture.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an artifact with `label` is written to.
    pub fn path_for(&self, label: &str) -> PathBuf {
        let name: String = label
            .chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.png"))
    }

    async fn try_capture(
        &self,
        engine: &dyn BrowserEngine,
        label: &str,
    ) -> Result<PathBuf, ArtifactCaptureError> {
        let png = engine.screenshot().await?;
        let path = self.path_for(label);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ArtifactCaptureError::Write {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, png)
            .await
            .map_err(|source| ArtifactCaptureError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

#[async_trait]
impl ArtifactRecorder for ScreenshotRecorder {
    async fn capture(&self, engine: &dyn BrowserEngine, label: &str) -> Option<PathBuf> {
        match self.try_capture(engine, label).await {
            Ok(path) => {
                info!("screenshot captured: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("failed to capture screenshot '{}': {}", label, e);
                None
            }
        }
    }
}

/// Recorder that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

#[async_trait]
impl ArtifactRecorder for NoopRecorder {
    async fn capture(&self, _engine: &dyn BrowserEngine, _label: &str) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ElementSnapshot;
    use crate::error::{BrowserError, Result};
    use crate::locator::Locator;

    /// Engine that only knows how to take screenshots.
    struct Camera {
        fail: bool,
    }

    #[async_trait]
    impl BrowserEngine for Camera {
        async fn navigate(&self, _url: &str) -> Result<()> {
            Ok(())
        }
        async fn resolve(&self, _locator: &Locator) -> Result<Vec<ElementSnapshot>> {
            Ok(vec![])
        }
        async fn click(&self, _locator: &Locator, _index: usize) -> Result<()> {
            Ok(())
        }
        async fn select_by_value(&self, _locator: &Locator, _value: &str) -> Result<()> {
            Ok(())
        }
        async fn screenshot(&self) -> Result<Vec<u8>> {
            if self.fail {
                Err(BrowserError::ScriptExecutionFailed("target closed".into()))
            } else {
                Ok(b"\x89PNG fake".to_vec())
            }
        }
        async fn current_url(&self) -> Result<String> {
            Ok("about:blank".into())
        }
        async fn title(&self) -> Result<String> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn creates_directory_and_writes_png() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("screenshots").join("nested");
        let recorder = ScreenshotRecorder::new(&dir);

        let path = recorder
            .capture(&Camera { fail: false }, "01_LandingPage")
            .await
            .expect("artifact written");

        assert_eq!(path, dir.join("01_LandingPage.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");

        // Second capture into the existing directory still works.
        assert!(recorder
            .capture(&Camera { fail: false }, "02_FirstQuestionDisplayed")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn engine_failure_is_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let recorder = ScreenshotRecorder::new(tmp.path());
        assert!(recorder.capture(&Camera { fail: true }, "x").await.is_none());
    }

    #[tokio::test]
    async fn unwritable_directory_is_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, b"").unwrap();

        let recorder = ScreenshotRecorder::new(file.join("shots"));
        assert!(recorder.capture(&Camera { fail: false }, "x").await.is_none());
    }

    #[test]
    fn labels_are_sanitized() {
        let recorder = ScreenshotRecorder::new("shots");
        assert_eq!(
            recorder.path_for("05_Question3 Answered/../x"),
            PathBuf::from("shots").join("05_Question3_Answered_.._x.png")
        );
    }
}
