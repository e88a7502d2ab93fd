use std::time::Duration;

use bevy::prelude::*;

/// Default distance, in logical pixels, covered by one directional press.
pub const DEFAULT_STEP: f32 = 40.0;

/// Default gap between the synthetic press and release sent to the fallback surface.
pub const DEFAULT_TAP_DURATION: Duration = Duration::from_millis(50);

/// Page loaded when the address bar is empty or a surface first appears.
pub const DEFAULT_HOME: &str = "https://www.google.com";

/// Free-text queries are percent-encoded and appended to this template.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=";

/// Router configuration, inserted by [`crate::TvCursorPlugin`].
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CursorSettings {
    /// Distance moved per directional press. Must be positive.
    pub step: f32,
    /// Logical size of the cursor rectangle.
    pub cursor_size: Vec2,
    /// Release timestamp offset from the press, at least one millisecond.
    pub tap_duration: Duration,
    pub home: String,
    pub search_template: String,
    /// Appended to the host web surface's user agent.
    pub user_agent_suffix: String,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            cursor_size: Vec2::splat(32.0),
            tap_duration: DEFAULT_TAP_DURATION,
            home: DEFAULT_HOME.to_owned(),
            search_template: DEFAULT_SEARCH_TEMPLATE.to_owned(),
            user_agent_suffix: "TVBrowser/1.2".to_owned(),
        }
    }
}

impl CursorSettings {
    /// Returns a copy with out-of-range values replaced by defaults.
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();
        if !(settings.step.is_finite() && settings.step > 0.0) {
            warn!(
                "Cursor step {} is not a positive number, using {DEFAULT_STEP}.",
                settings.step
            );
            settings.step = DEFAULT_STEP;
        }
        if !(settings.cursor_size.is_finite() && settings.cursor_size.cmpge(Vec2::ZERO).all()) {
            warn!(
                "Cursor size {:?} is invalid, using {:?}.",
                settings.cursor_size,
                Self::default().cursor_size
            );
            settings.cursor_size = Self::default().cursor_size;
        }
        settings.tap_duration = settings.tap_duration.max(Duration::from_millis(1));
        settings
    }

    /// User agent string for a web surface whose stock agent is `base`.
    pub fn user_agent(&self, base: &str) -> String {
        if self.user_agent_suffix.is_empty() {
            base.to_owned()
        } else {
            format!("{base} {}", self.user_agent_suffix)
        }
    }
}
