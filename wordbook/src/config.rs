use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tokio::time::Duration;

use crate::recent::{CACHED_WORDS_KEY, MAX_RECENT_WORDS};

/// Settings read from an optional TOML file. Every field has a default, so an
/// empty file (or none at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dictionary endpoint; the term is appended as the last path segment.
    pub base_url: String,
    /// Key the recent words are stored under.
    pub storage_key: String,
    pub database_url: String,
    pub max_recent_words: usize,
    pub debounce_ms: u64,
    pub reshuffle_delay_ms: u64,
    /// Write logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: dictionary::DEFAULT_BASE_URL.to_owned(),
            storage_key: CACHED_WORDS_KEY.to_owned(),
            database_url: "sqlite://wordbook.db".to_owned(),
            max_recent_words: MAX_RECENT_WORDS,
            debounce_ms: 700,
            reshuffle_delay_ms: 1000,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        anyhow::ensure!(config.max_recent_words > 0, "max_recent_words must be at least 1");
        anyhow::ensure!(!config.storage_key.is_empty(), "storage_key must not be empty");
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn reshuffle_delay(&self) -> Duration {
        Duration::from_millis(self.reshuffle_delay_ms)
    }
}
