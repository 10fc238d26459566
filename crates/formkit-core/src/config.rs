#![forbid(unsafe_code)]

//! Form configuration.
//!
//! Defaults reproduce the stock behaviour (216pt keyboard, 200ms reveal,
//! `dd/mm/yyyy` dates). Each value can be overridden through a builder
//! setter or an environment variable; lookups are injectable for tests.

use std::time::Duration;

/// Environment variable overriding the assumed overlay height (points).
const ENV_OVERLAY_HEIGHT: &str = "FORMKIT_OVERLAY_HEIGHT";
/// Environment variable overriding the reveal animation length (milliseconds).
const ENV_REVEAL_MS: &str = "FORMKIT_REVEAL_MS";
/// Environment variable overriding the date display pattern (chrono syntax).
const ENV_DATE_FORMAT: &str = "FORMKIT_DATE_FORMAT";
/// Environment variable overriding the "unset" row label of optional drop-downs.
const ENV_SENTINEL_LABEL: &str = "FORMKIT_SENTINEL_LABEL";

/// Overlay height assumed until the platform reports the real one.
pub const DEFAULT_OVERLAY_HEIGHT: f32 = 216.0;
/// Length of the scroll reveal animation.
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(200);
/// Date display pattern.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
/// Label of the sentinel row prepended to optional choice lists.
pub const DEFAULT_SENTINEL_LABEL: &str = "-";

/// Tunables shared by a form and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Overlay height used before the first overlay-shown event.
    pub overlay_height: f32,
    /// Duration of the scroll reveal animation.
    pub reveal_duration: Duration,
    /// chrono pattern used to display picked dates.
    pub date_format: String,
    /// Label of the sentinel row in optional drop-downs.
    pub sentinel_label: String,
    /// Picker confirmation button title.
    pub picker_done_title: String,
    /// Picker cancellation button title.
    pub picker_cancel_title: String,
    /// Image picker "import" action title.
    pub import_title: String,
    /// Image picker "capture" action title.
    pub capture_title: String,
    /// Image picker "cancel" action title.
    pub image_cancel_title: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            overlay_height: DEFAULT_OVERLAY_HEIGHT,
            reveal_duration: DEFAULT_REVEAL_DURATION,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            sentinel_label: DEFAULT_SENTINEL_LABEL.to_string(),
            picker_done_title: "OK".to_string(),
            picker_cancel_title: "Cancel".to_string(),
            import_title: "Import picture".to_string(),
            capture_title: "Take picture".to_string(),
            image_cancel_title: "Cancel".to_string(),
        }
    }
}

impl FormConfig {
    /// Defaults overridden by process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = get_env(ENV_OVERLAY_HEIGHT) {
            match raw.trim().parse::<f32>() {
                Ok(h) if h.is_finite() && h >= 0.0 => config.overlay_height = h,
                _ => tracing::warn!(key = ENV_OVERLAY_HEIGHT, value = %raw, "ignoring invalid value"),
            }
        }
        if let Some(raw) = get_env(ENV_REVEAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.reveal_duration = Duration::from_millis(ms),
                Err(_) => tracing::warn!(key = ENV_REVEAL_MS, value = %raw, "ignoring invalid value"),
            }
        }
        if let Some(raw) = get_env(ENV_DATE_FORMAT)
            && !raw.trim().is_empty()
        {
            config.date_format = raw;
        }
        if let Some(raw) = get_env(ENV_SENTINEL_LABEL) {
            config.sentinel_label = raw;
        }

        config
    }

    /// Set the initial overlay height.
    #[must_use]
    pub fn with_overlay_height(mut self, height: f32) -> Self {
        self.overlay_height = height.max(0.0);
        self
    }

    /// Set the reveal animation duration.
    #[must_use]
    pub fn with_reveal_duration(mut self, duration: Duration) -> Self {
        self.reveal_duration = duration;
        self
    }

    /// Set the date display pattern.
    #[must_use]
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Set the sentinel row label.
    #[must_use]
    pub fn with_sentinel_label(mut self, label: impl Into<String>) -> Self {
        self.sentinel_label = label.into();
        self
    }

    /// Set the picker button titles.
    #[must_use]
    pub fn with_picker_titles(mut self, done: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.picker_done_title = done.into();
        self.picker_cancel_title = cancel.into();
        self
    }

    /// Set the image picker action titles.
    #[must_use]
    pub fn with_image_titles(
        mut self,
        import: impl Into<String>,
        capture: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        self.import_title = import.into();
        self.capture_title = capture.into();
        self.image_cancel_title = cancel.into();
        self
    }
}
