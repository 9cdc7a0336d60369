use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, ScrollError};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/todos";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub min_loading_ms: u64,
    pub next_page_debounce_ms: u64,
    pub search_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_loading_ms: 1000,
            next_page_debounce_ms: 1000,
            search_debounce_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }

    pub fn next_page_debounce(&self) -> Duration {
        Duration::from_millis(self.next_page_debounce_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Distance from the end of the list, in viewport lengths, at which
    /// the next page is requested.
    pub end_reached_threshold: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            end_reached_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub timing: TimingConfig,
    pub list: ListConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("todo-scroll").join("config.toml"))
}

impl Config {
    /// Load the config from the default location, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match Config::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring config file: {}", e);
                Config::default()
            }
        }
    }

    /// Load an explicitly requested config file. Unlike [`Config::load`],
    /// errors are reported to the caller.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Config::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ScrollError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.source.page_size == 0 {
            return Err(ScrollError::Config("page_size must be positive".into()));
        }
        if self.source.base_url.trim().is_empty() {
            return Err(ScrollError::Config("base_url must not be empty".into()));
        }
        let threshold = self.list.end_reached_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ScrollError::Config(
                "end_reached_threshold must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
