/// CLI configuration
use crate::error::{CliError, Result};
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "podcastr.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalogue: CatalogueSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogueSettings {
    #[serde(default = "default_catalogue_path")]
    pub path: PathBuf,

    /// Episodes fetched for the home listing
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Episodes shown on the "latest" shelf
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        Self {
            path: default_catalogue_path(),
            limit: default_limit(),
            latest_count: default_latest_count(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` (which must exist) or, without one, `podcastr.toml` if
    /// present. Environment variables prefixed with `PODCASTR_` override the
    /// file; nested keys use `__`, e.g. `PODCASTR_CATALOGUE__LATEST_COUNT=3`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.exists() => {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PODCASTR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalogue.limit == 0 {
            return Err(CliError::Config(
                "catalogue.limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_catalogue_path() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_limit() -> usize {
    12
}

fn default_latest_count() -> usize {
    2
}
