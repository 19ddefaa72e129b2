use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::status::StatusScale;

/// Global user configuration loaded from `~/.graft/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,
}

/// Build settings from `[build]` in global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Number of resolution workers used by `graft check`.
    #[serde(default = "default_jobs")]
    pub jobs: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(4)
}

/// Version selection settings from `[resolution]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    #[serde(default, rename = "status-scale")]
    pub status_scale: StatusScale,

    /// Cache parsed selectors by their source string.
    #[serde(default = "default_selector_cache", rename = "selector-cache")]
    pub selector_cache: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            status_scale: StatusScale::default(),
            selector_cache: default_selector_cache(),
        }
    }
}

fn default_selector_cache() -> bool {
    true
}

/// Per-workspace overrides from the `[resolution]` section of `Graft.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionOverrides {
    #[serde(default, rename = "status-scale")]
    pub status_scale: Option<StatusScale>,
    #[serde(default, rename = "selector-cache")]
    pub selector_cache: Option<bool>,
}

impl ResolutionConfig {
    /// Apply workspace overrides on top of the global settings.
    pub fn merged_with(&self, overrides: &ResolutionOverrides) -> Self {
        Self {
            status_scale: overrides
                .status_scale
                .clone()
                .unwrap_or_else(|| self.status_scale.clone()),
            selector_cache: overrides.selector_cache.unwrap_or(self.selector_cache),
        }
    }
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration at `path`, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            graft_util::errors::GraftError::Config {
                message: format!("Failed to read global config: {e}"),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            graft_util::errors::GraftError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the Graft data directory.
///
/// `GRAFT_HOME` wins when set; otherwise `~/.graft/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(home) = std::env::var("GRAFT_HOME") {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".graft")
}
