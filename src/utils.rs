use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task::{self, JoinError};

const CACHE_DIR_NAME: &str = "f1data_rs_cache";

pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join(CACHE_DIR_NAME))
}

pub(crate) fn millis(datetime: Option<DateTime<Utc>>) -> Option<i64> {
    datetime.map(|dt| dt.timestamp_millis())
}

pub(crate) fn seconds_to_millis(seconds: Option<f64>) -> Option<i64> {
    seconds.map(|s| (s * 1000.0).round() as i64)
}

/// Writes `df` to a Snappy-compressed parquet file on a blocking thread.
///
/// File creation and encoding failures are reported through `io_error` and
/// `encode_error`, which receive the path being written.
pub(crate) async fn write_parquet<E>(
    mut df: DataFrame,
    path: &Path,
    io_error: fn(PathBuf, std::io::Error) -> E,
    encode_error: fn(PathBuf, PolarsError) -> E,
) -> Result<(), E>
where
    E: From<JoinError> + Send + 'static,
{
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf).map_err(|e| io_error(path_buf.clone(), e))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| encode_error(path_buf, e))?;
        Ok::<(), E>(())
    })
    .await?
}
