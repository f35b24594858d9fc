use crate::error::F1DataError;
use crate::pipeline::round_table::SeasonTable;
use crate::utils::write_parquet;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// `<output_dir>/races_<season>.parquet`
pub fn output_path(output_dir: &Path, season: i32) -> PathBuf {
    output_dir.join(format!("races_{}.parquet", season))
}

/// Writes the season table to its parquet file, creating `output_dir` if
/// needed. Returns the path written.
pub async fn write_season(table: &SeasonTable, output_dir: &Path) -> Result<PathBuf, F1DataError> {
    let path = output_path(output_dir, table.season);
    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| F1DataError::OutputDirCreation(output_dir.to_path_buf(), e))?;

    write_parquet(
        table.frame.clone(),
        &path,
        F1DataError::ParquetWriteIo,
        F1DataError::ParquetWritePolars,
    )
    .await?;

    info!("Wrote {} rows to {}", table.frame.height(), path.display());
    Ok(path)
}
