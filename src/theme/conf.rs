use std::collections::HashMap;
use std::path::Path;

/// Flat `key=value` theme configuration, e.g. `notification/notification.conf`.
///
/// Keys are separated from values by `=`, `:` or whitespace. Escapes and
/// line continuations are not supported.
///
/// A missing or unreadable file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeConf {
    entries: HashMap<String, String>,
}

impl ThemeConf {
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "theme conf unavailable");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            // Key ends at the first `=`, `:` or whitespace; one separator
            // character may follow the whitespace.
            let split = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace());
            let (key, rest) = match split {
                Some(split) => line.split_at(split),
                None => (line, ""),
            };
            let rest = rest.trim_start();
            let value = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim();
            if !key.is_empty() {
                entries.insert(key.to_string(), value.to_string());
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Color stored under `key`, parsed with [`parse_color`].
    pub fn color(&self, key: &str) -> Option<u32> {
        let raw = self.get(key)?;
        let color = parse_color(raw);
        if color.is_none() {
            tracing::warn!(key, value = raw, "ignoring invalid theme color");
        }
        color
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a hex color such as `ff336699`, `#336699` or `0xFF336699`.
///
/// Six digit values are treated as opaque RGB.
pub fn parse_color(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix('#')
        .or_else(|| raw.strip_prefix("0x"))
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok().map(|rgb| 0xFF00_0000 | rgb),
        8 => u32::from_str_radix(digits, 16).ok(),
        _ => None,
    }
}
