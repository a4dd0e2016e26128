use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::catalog::{
    CatalogError, CatalogResult, FileSource, HttpSource, PokemonSource, StaticSource,
    DEFAULT_CATALOG_PATH,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

/// Which source backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Http,
    File,
    /// Empty in-memory catalog, for offline development
    Static,
}

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Origin serving the catalog (http kind).
    pub base_url: String,
    /// Path of the catalog payload under `base_url`.
    pub path: String,
    /// JSON file to read (file kind).
    pub file: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines on stdout instead of pretty output.
    pub json: bool,
    /// Also write daily-rolling JSON logs here.
    pub log_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            base_url: "http://localhost:8080".to_string(),
            path: DEFAULT_CATALOG_PATH.to_string(),
            file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

impl SourceConfig {
    /// Build the configured source.
    pub fn build(&self) -> CatalogResult<Arc<dyn PokemonSource>> {
        match self.kind {
            SourceKind::Http => Ok(Arc::new(HttpSource::with_path(&self.base_url, &self.path)?)),
            SourceKind::File => {
                let file = self.file.as_ref().ok_or_else(|| {
                    CatalogError::Config("source.kind = \"file\" requires source.file".to_string())
                })?;
                Ok(Arc::new(FileSource::new(file)))
            }
            SourceKind::Static => Ok(Arc::new(StaticSource::default())),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/pokedex/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::load_from(&config_path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(ConfigError::Io(_)) => {
                tracing::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config at {}: {e}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pokedex").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
