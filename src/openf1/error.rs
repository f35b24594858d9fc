use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    // Errors during parquet cache reads and writes (inside blocking task)
    #[error("I/O error accessing parquet cache file '{0}'")]
    CacheIo(PathBuf, #[source] std::io::Error),
    #[error("Failed to read parquet cache file '{0}'")]
    CacheRead(PathBuf, #[source] PolarsError),
    #[error("Encoding error writing parquet cache file '{0}'")]
    CacheWrite(PathBuf, #[source] PolarsError),

    #[error("Failed building {frame} frame for session {session_key}")]
    FrameBuild {
        frame: &'static str,
        session_key: i64,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
