//! `.gallery-search.toml` loading.
//!
//! Values from the file are merged over [`SearchConfig::default`]. Unknown keys
//! only warn (with a typo suggestion), and a file that fails to parse keeps the
//! defaults unless it was requested explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = ".gallery-search.toml";

/// Known keys in `.gallery-search.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &[
    "base_url",
    "search_path",
    "suggestions_path",
    "debounce_ms",
    "min_suggestion_chars",
    "page_size",
    "request_timeout_secs",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Runtime configuration for the search controller and its HTTP backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_url: String,
    pub search_path: String,
    pub suggestions_path: String,
    /// Delay between the last keystroke and the suggestions fetch.
    pub debounce_ms: u64,
    /// Suggestions are fetched only once the query has at least this many characters.
    pub min_suggestion_chars: usize,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            search_path: "/api/search".to_string(),
            suggestions_path: "/api/search/suggestions".to_string(),
            debounce_ms: 200,
            min_suggestion_chars: 2,
            page_size: 50,
            request_timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load from `.gallery-search.toml` in `dir`, falling back to defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring {CONFIG_FILE}, using defaults");
                Self::default()
            }
        }
    }

    /// Load an explicitly named config file. Errors are returned, not swallowed.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let table = content.parse::<toml::Table>().map_err(|e| e.to_string())?;
        let mut config = Self::default();

        // Validate keys — warn on unknown
        for key in table.keys() {
            if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
                continue;
            }
            match closest_key(key) {
                Some(suggestion) => warn!(
                    key = key.as_str(),
                    suggestion,
                    "Unknown key in {CONFIG_FILE} — did you mean '{suggestion}'?"
                ),
                None => warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                ),
            }
        }

        if let Some(url) = table.get("base_url").and_then(|v| v.as_str()) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(p) = table.get("search_path").and_then(|v| v.as_str()) {
            config.search_path = p.to_string();
        }
        if let Some(p) = table.get("suggestions_path").and_then(|v| v.as_str()) {
            config.suggestions_path = p.to_string();
        }
        if let Some(ms) = non_negative(&table, "debounce_ms") {
            config.debounce_ms = ms;
        }
        if let Some(n) = non_negative(&table, "min_suggestion_chars") {
            config.min_suggestion_chars = n as usize;
        }
        if let Some(n) = non_negative(&table, "page_size") {
            // A zero page size would make every page empty.
            config.page_size = n.clamp(1, u64::from(u32::MAX)) as u32;
        }
        if let Some(secs) = non_negative(&table, "request_timeout_secs") {
            config.request_timeout_secs = secs;
        }

        Ok(config)
    }
}

fn non_negative(table: &toml::Table, key: &str) -> Option<u64> {
    let value = table.get(key)?.as_integer()?;
    if value < 0 {
        warn!(key, value, "Negative value in {CONFIG_FILE} ignored");
        return None;
    }
    Some(value as u64)
}

fn closest_key(key: &str) -> Option<&'static str> {
    let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k))?;
    (edit_distance(key, suggestion) <= 3).then_some(*suggestion)
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SearchConfig::load(dir.path()), SearchConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "base_url = \"http://gallery.local/\"\ndebounce_ms = 350\npage_size = 24\n",
        )
        .unwrap();

        let config = SearchConfig::load(dir.path());
        assert_eq!(config.base_url, "http://gallery.local");
        assert_eq!(config.debounce(), Duration::from_millis(350));
        assert_eq!(config.page_size, 24);
        // Untouched keys keep their defaults
        assert_eq!(config.search_path, "/api/search");
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config = SearchConfig::from_toml_str("page_sise = 10\n").unwrap();
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn broken_file_falls_back_when_implicit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "base_url = [").unwrap();
        assert_eq!(SearchConfig::load(dir.path()), SearchConfig::default());
    }

    #[test]
    fn broken_file_errors_when_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(SearchConfig::load_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn typo_suggestion_picks_nearest_key() {
        assert_eq!(closest_key("page_sise"), Some("page_size"));
        assert_eq!(closest_key("completely_unrelated_option"), None);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = SearchConfig::from_toml_str("page_size = 0\n").unwrap();
        assert_eq!(config.page_size, 1);
    }
}
