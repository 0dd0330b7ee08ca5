use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Idle timeout reported when the security controller has no opinion.
pub const DEFAULT_USER_ACTIVITY_TIMEOUT_MS: u64 = 10_000;

/// Frame delay applied before the deferred show runs.
pub const DEFAULT_SHOW_DELAY_MS: u64 = 48;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BouncerSettings {
    /// Root folder holding the themed assets, e.g. `/data/theme`.
    #[serde(default = "default_theme_root")]
    pub theme_root: PathBuf,
    /// When disabled the bouncer always paints the flat fallback color and
    /// never touches the theme folder for wallpapers.
    #[serde(default)]
    pub force_theme: bool,
    /// ARGB color painted when no themed wallpaper resolves.
    #[serde(default)]
    pub fallback_color: u32,
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,
    #[serde(default = "default_user_activity_timeout_ms")]
    pub default_user_activity_timeout_ms: u64,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional log file. Logs go to stderr when absent.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_theme_root() -> PathBuf {
    PathBuf::from("/data/theme")
}

fn default_show_delay_ms() -> u64 {
    DEFAULT_SHOW_DELAY_MS
}

fn default_user_activity_timeout_ms() -> u64 {
    DEFAULT_USER_ACTIVITY_TIMEOUT_MS
}

impl Default for BouncerSettings {
    fn default() -> Self {
        Self {
            theme_root: default_theme_root(),
            force_theme: false,
            fallback_color: 0x0000_0000,
            show_delay_ms: default_show_delay_ms(),
            default_user_activity_timeout_ms: default_user_activity_timeout_ms(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl BouncerSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn default_user_activity_timeout(&self) -> Duration {
        Duration::from_millis(self.default_user_activity_timeout_ms)
    }
}
