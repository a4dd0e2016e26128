//! Catalog Data Sources
//!
//! The store only knows the [`PokemonSource`] trait. Three implementations
//! ship with the crate:
//! - [`HttpSource`]: plain GET of the JSON array from a web server
//! - [`FileSource`]: the same payload read from disk
//! - [`StaticSource`]: records already in memory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::error::{CatalogError, CatalogResult};
use super::types::Pokemon;

/// Well-known path of the catalog payload.
pub const DEFAULT_CATALOG_PATH: &str = "/pokemon.json";

/// Anything that can produce the full catalog in one go.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Short description for logs, e.g. the URL being fetched.
    fn describe(&self) -> String;

    /// Fetch the whole catalog, in source order.
    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>>;
}

fn decode(bytes: &[u8]) -> CatalogResult<Vec<Pokemon>> {
    Ok(serde_json::from_slice(bytes)?)
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches the catalog with a single unauthenticated GET.
pub struct HttpSource {
    url: Url,
    http_client: Client,
}

impl HttpSource {
    /// Source for `DEFAULT_CATALOG_PATH` under `base_url`.
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        Self::with_path(base_url, DEFAULT_CATALOG_PATH)
    }

    /// Source for an explicit `path` under `base_url`.
    ///
    /// An absolute `path` replaces whatever path `base_url` carries.
    pub fn with_path(base_url: &str, path: &str) -> CatalogResult<Self> {
        let url = Url::parse(base_url)?.join(path)?;
        Ok(Self::from_url(url))
    }

    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            http_client: Client::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PokemonSource for HttpSource {
    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }

    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>> {
        debug!(url = %self.url, "Fetching catalog");
        let response = self.http_client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        decode(&body)
    }
}

// ============================================================================
// File
// ============================================================================

/// Reads the catalog from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PokemonSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>> {
        debug!(path = %self.path.display(), "Reading catalog file");
        let bytes = tokio::fs::read(&self.path).await?;
        decode(&bytes)
    }
}

// ============================================================================
// Static
// ============================================================================

/// Serves a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Pokemon>,
}

impl StaticSource {
    pub fn new(records: Vec<Pokemon>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl PokemonSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }

    async fn fetch(&self) -> CatalogResult<Vec<Pokemon>> {
        Ok(self.records.clone())
    }
}
