use std::path::Path;

use chrono::{DateTime, TimeZone};

use crate::theme::ThemeConf;

pub const NOTIFICATION_CATEGORY: &str = "notification";
pub const NOTIFICATION_CONF: &str = "notification.conf";
pub const DATE_COLOR_KEY: &str = "color.date";

pub const DEFAULT_WEEKDAY_PATTERN: &str = "%A";
pub const DEFAULT_DATE_PATTERN: &str = "%B %-d, %Y";

/// System time broadcasts the label listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEvent {
    Tick,
    TimeChanged,
    TimezoneChanged,
    LocaleChanged,
}

/// Two line "weekday / date" label shown next to the lockscreen clock.
#[derive(Debug, Clone)]
pub struct DateLabel {
    weekday_pattern: String,
    date_pattern: String,
    color: Option<u32>,
    last_text: Option<String>,
}

impl Default for DateLabel {
    fn default() -> Self {
        Self::new(DEFAULT_WEEKDAY_PATTERN, DEFAULT_DATE_PATTERN)
    }
}

impl DateLabel {
    pub fn new(weekday_pattern: &str, date_pattern: &str) -> Self {
        Self {
            weekday_pattern: weekday_pattern.to_string(),
            date_pattern: date_pattern.to_string(),
            color: None,
            last_text: None,
        }
    }

    /// Pick up the text color from `{theme_root}/notification/notification.conf`.
    pub fn with_theme(mut self, theme_root: &Path) -> Self {
        let conf_path = theme_root.join(NOTIFICATION_CATEGORY).join(NOTIFICATION_CONF);
        self.color = ThemeConf::load(&conf_path).color(DATE_COLOR_KEY);
        self
    }

    pub fn color(&self) -> Option<u32> {
        self.color
    }

    pub fn text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Handle a time broadcast. Returns the new text when it changed.
    ///
    /// Every event re-renders; the timezone comes from `now`.
    pub fn on_time_event<Tz>(&mut self, event: TimeEvent, now: &DateTime<Tz>) -> Option<&str>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        tracing::trace!(?event, "date label time event");
        self.update(now)
    }

    pub fn update<Tz>(&mut self, now: &DateTime<Tz>) -> Option<&str>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let text = format!(
            "{}\n{}",
            now.format(&self.weekday_pattern),
            now.format(&self.date_pattern)
        );
        if self.last_text.as_deref() == Some(text.as_str()) {
            return None;
        }
        tracing::trace!(%text, "date label updated");
        self.last_text = Some(text);
        self.last_text.as_deref()
    }
}
