use crate::openf1::error::ProviderError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum F1DataError {
    #[error("Invalid YEAR or ROUND_NUMBER provided (season {season}, round {round})")]
    InvalidSession { season: i32, round: u32 },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Session data '{0}' was not loaded")]
    DataNotLoaded(&'static str),

    #[error("No rounds with results available for season {0}")]
    NoRounds(i32),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing parquet file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
