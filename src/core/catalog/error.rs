//! Catalog Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed catalog payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Source configuration error: {0}")]
    Config(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
