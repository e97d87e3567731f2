use std::path::PathBuf;

pub fn default_entry() -> String {
    quiz_e2e::DEFAULT_ENTRY.to_string()
}

pub fn default_screenshots_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

pub fn default_timeout_ms() -> u64 {
    10_000
}

pub fn default_poll_interval_ms() -> u64 {
    100
}

/// Headless unless built with the `visible` feature.
pub fn default_headless() -> bool {
    !cfg!(feature = "visible")
}

pub fn default_window_width() -> u32 {
    1920
}

pub fn default_window_height() -> u32 {
    1080
}

pub fn default_true() -> bool {
    true
}
