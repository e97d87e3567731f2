use crate::cli::RunArgs;
use crate::config::{CliOverrides, RunConfig};
use quiz_e2e::{ArtifactRecorder, NoopRecorder, ScreenshotRecorder, SessionConfig, WaitConfig};
use std::time::Duration;

// Conversion implementations: CLI args -> config, config -> runner types

impl From<&RunArgs> for CliOverrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            entry: args.entry.clone(),
            screenshots_dir: args.screenshots_dir.clone(),
            screenshots: args.no_screenshots.then_some(false),
            timeout_ms: args.timeout_ms,
            poll_interval_ms: args.poll_interval_ms,
            headless: args.visible.then_some(false),
            window_width: args.window_size.map(|(width, _)| width),
            window_height: args.window_size.map(|(_, height)| height),
            chrome_path: args.chrome_path.clone(),
            report: args.report.clone(),
        }
    }
}

impl RunConfig {
    /// Wait budget for every explicit wait and for page loads.
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }

    /// Browser launch settings.
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new()
            .with_window_size(self.window_width, self.window_height)
            .with_load_wait(self.wait_config());
        config.headless = self.headless;
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path);
        }
        config
    }

    /// The entry resource as a URL.
    pub fn entry_url(&self) -> std::io::Result<String> {
        quiz_e2e::resolve_target(&self.entry)
    }

    /// Screenshot recorder, or a no-op when screenshots are disabled.
    pub fn recorder(&self) -> Box<dyn ArtifactRecorder> {
        if self.screenshots {
            Box::new(ScreenshotRecorder::new(&self.screenshots_dir))
        } else {
            Box::new(NoopRecorder)
        }
    }
}
