use crate::openf1::error::ProviderError;
use crate::utils::write_parquet;
use log::{debug, info, warn};
use polars::prelude::*;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";

/// Issues OpenF1 requests and keeps finished session frames in a parquet cache.
pub struct OpenF1Loader {
    base_url: String,
    cache_dir: Option<PathBuf>,
    download_client: Client,
}

impl OpenF1Loader {
    pub fn new(base_url: &str, cache_dir: Option<&Path>) -> OpenF1Loader {
        OpenF1Loader {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_dir: cache_dir.map(Path::to_path_buf),
            download_client: Client::new(),
        }
    }

    /// Fetches all records of an endpoint matching the query.
    ///
    /// A `404 Not Found` is how OpenF1 reports an empty result, so it yields an
    /// empty vector rather than an error.
    pub async fn get_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Requesting {} with {:?}", url, query);

        let response = self
            .download_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.clone(), e))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("No records for {} with {:?}", url, query);
            return Ok(Vec::new());
        }

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ProviderError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ProviderError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.clone(), e))?;
        serde_json::from_slice(&body).map_err(|source| ProviderError::JsonParse { url, source })
    }

    /// Returns the frame cached under `name` for a session, building and caching
    /// it on a miss. With `cacheable` false, or without a cache directory, the
    /// frame is always built and never written.
    pub async fn cached_frame<F, Fut>(
        &self,
        name: &str,
        session_key: i64,
        cacheable: bool,
        build: F,
    ) -> Result<DataFrame, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DataFrame, ProviderError>>,
    {
        let cache_dir = match (&self.cache_dir, cacheable) {
            (Some(dir), true) => dir,
            _ => return build().await,
        };
        let parquet_path = cache_dir.join(format!("{}-{}.parquet", name, session_key));

        if fs::metadata(&parquet_path).await.is_ok() {
            info!(
                "Cache hit for {} of session {} at {:?}",
                name, session_key, parquet_path
            );
            return Self::read_cached(&parquet_path).await;
        }

        warn!(
            "Cache miss for {} of session {}. Downloading and processing.",
            name, session_key
        );
        let df = build().await?;

        fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| ProviderError::CacheDirCreation(cache_dir.clone(), e))?;
        write_parquet(
            df.clone(),
            &parquet_path,
            ProviderError::CacheIo,
            ProviderError::CacheWrite,
        )
        .await?;
        info!(
            "Cached {} of session {} to {:?}",
            name, session_key, parquet_path
        );
        Ok(df)
    }

    async fn read_cached(path: &Path) -> Result<DataFrame, ProviderError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::open(&path_buf)
                .map_err(|e| ProviderError::CacheIo(path_buf.clone(), e))?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| ProviderError::CacheRead(path_buf, e))
        })
        .await?
    }
}
