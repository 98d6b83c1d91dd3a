//! User settings: custom stopwords and the selected feed set.
//!
//! The analyzer never reads settings itself. Callers load them through a
//! [`SettingsStore`], turn them into an analysis request, and save any edits.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::feeds::{default_feeds, is_http_url, FeedSource};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub custom_stopwords: Vec<String>,
    #[serde(default = "default_feeds")]
    pub selected_feeds: IndexMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_stopwords: Vec::new(),
            selected_feeds: default_feeds(),
        }
    }
}

impl Settings {
    /// Selected feeds as an ordered list of sources.
    #[must_use]
    pub fn selected_sources(&self) -> Vec<FeedSource> {
        self.selected_feeds
            .iter()
            .map(|(name, url)| FeedSource::new(name.clone(), url.clone()))
            .collect()
    }

    /// Add or replace a feed. A replaced feed keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the name is blank or the URL is
    /// not an `http(s)` URL.
    pub fn add_feed(&mut self, name: &str, url: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }
        if !is_http_url(url) {
            return Err(ConfigError::Validation(format!(
                "feed '{name}' has invalid URL '{url}'; expected http:// or https://"
            )));
        }
        self.selected_feeds.insert(name.to_string(), url.to_string());
        Ok(())
    }

    /// Remove a feed by name, preserving the order of the rest.
    pub fn remove_feed(&mut self, name: &str) -> bool {
        self.selected_feeds.shift_remove(name.trim()).is_some()
    }

    pub fn reset_feeds(&mut self) {
        self.selected_feeds = default_feeds();
    }

    /// Add custom stopwords. Words are trimmed and lowercased; blanks and
    /// words already present are skipped.
    pub fn add_stopwords<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || self.custom_stopwords.contains(&word) {
                continue;
            }
            self.custom_stopwords.push(word);
            added += 1;
        }
        added
    }

    /// Remove custom stopwords, case-insensitively. Returns how many were removed.
    pub fn remove_stopwords<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();
        let before = self.custom_stopwords.len();
        self.custom_stopwords
            .retain(|w| !targets.contains(&w.to_lowercase()));
        before - self.custom_stopwords.len()
    }
}

/// Load/save collaborator for [`Settings`].
pub trait SettingsStore {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if stored settings exist but cannot be read.
    fn load(&self) -> Result<Settings, ConfigError>;

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the settings cannot be written.
    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Stores settings as a pretty-printed JSON file.
///
/// A missing file loads as [`Settings::default`]. A file that exists but is
/// not valid JSON is an error, so a typo never gets silently overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(ConfigError::SettingsIo {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::SettingsParse {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(settings).map_err(|e| ConfigError::SettingsParse {
                path: self.path.display().to_string(),
                source: e,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SettingsIo {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|e| ConfigError::SettingsIo {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
