//! Themed lockscreen assets.
//!
//! Assets live under `{theme_root}/{category}/{name}.{png,jpg}`. Nothing is
//! cached: every lookup probes the file system again so a theme swap is
//! picked up on the next inflate.

pub mod conf;

use std::path::{Path, PathBuf};

use image::RgbaImage;

pub use conf::{parse_color, ThemeConf};

/// Extensions probed for a logical asset name, in order of preference.
pub const THEME_EXTENSIONS: [&str; 2] = ["png", "jpg"];

pub const LOCKSCREEN_CATEGORY: &str = "lockscreen";
pub const LOCKSCREEN_WALLPAPER: &str = "lockscreen_wallpaper";
pub const LOCKSCREEN_CONF: &str = "lockscreen.conf";
pub const BACKGROUND_COLOR_KEY: &str = "color.background";

const LANDSCAPE_SUFFIX: &str = "_land";

/// Display rotation relative to the natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Source of the current display rotation.
pub trait DisplayRotation {
    fn rotation(&self) -> Rotation;
}

impl DisplayRotation for Rotation {
    fn rotation(&self) -> Rotation {
        *self
    }
}

/// A decoded theme image together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemedDrawable {
    pub path: PathBuf,
    pub image: RgbaImage,
}

/// What the overlay root gets painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Image(ThemedDrawable),
    /// Flat ARGB color.
    Color(u32),
}

/// Return the first existing `{base}.{ext}` for the known extensions.
pub fn probe_theme_file(base: &Path) -> Option<PathBuf> {
    THEME_EXTENSIONS.iter().find_map(|ext| {
        let mut candidate = base.as_os_str().to_os_string();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

pub struct ThemeResolver {
    theme_root: PathBuf,
    rotation: Box<dyn DisplayRotation>,
}

impl ThemeResolver {
    pub fn new(theme_root: impl Into<PathBuf>, rotation: Box<dyn DisplayRotation>) -> Self {
        Self {
            theme_root: theme_root.into(),
            rotation,
        }
    }

    pub fn requires_rotation(&self) -> bool {
        self.rotation.rotation().is_landscape()
    }

    /// Resolve `{theme_root}/{category}/{name}` to a decoded image.
    ///
    /// In landscape the `{name}_land` variant wins when present. Missing or
    /// undecodable files yield `None`.
    pub fn resolve_themed_drawable(&self, category: &str, name: &str) -> Option<ThemedDrawable> {
        if self.requires_rotation() {
            let landscape = format!("{name}{LANDSCAPE_SUFFIX}");
            if let Some(drawable) = self.load_drawable(category, &landscape) {
                return Some(drawable);
            }
        }
        self.load_drawable(category, name)
    }

    fn load_drawable(&self, category: &str, name: &str) -> Option<ThemedDrawable> {
        let base = self.theme_root.join(category).join(name);
        let path = probe_theme_file(&base)?;
        match image::open(&path) {
            Ok(img) => {
                tracing::debug!(path = %path.display(), "resolved themed drawable");
                Some(ThemedDrawable {
                    path,
                    image: img.to_rgba8(),
                })
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to decode themed drawable");
                None
            }
        }
    }

    /// Background for a freshly inflated bouncer.
    ///
    /// With theming disabled the flat color is used without touching the
    /// wallpaper files. `lockscreen.conf` may override `fallback_color`.
    pub fn lockscreen_background(&self, theming_enabled: bool, fallback_color: u32) -> Background {
        if theming_enabled {
            if let Some(drawable) =
                self.resolve_themed_drawable(LOCKSCREEN_CATEGORY, LOCKSCREEN_WALLPAPER)
            {
                return Background::Image(drawable);
            }
        }
        let conf_path = self
            .theme_root
            .join(LOCKSCREEN_CATEGORY)
            .join(LOCKSCREEN_CONF);
        let color = ThemeConf::load(&conf_path)
            .color(BACKGROUND_COLOR_KEY)
            .unwrap_or(fallback_color);
        Background::Color(color)
    }
}
