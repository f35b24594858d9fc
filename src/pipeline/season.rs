//! Season-level orchestration: count the rounds, fetch them in order, export.

use crate::error::F1DataError;
use crate::pipeline::exporter::write_season;
use crate::pipeline::round_counter::completed_rounds;
use crate::pipeline::round_fetcher::fetch_round;
use crate::pipeline::round_table::SeasonTable;
use crate::provider::DataProvider;
use chrono::{DateTime, Datelike, Utc};
use log::info;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Number of schedule events to consider for `season`.
///
/// For the current season this is the number of events with results, for any
/// other season the full schedule size. Both counts include testing events.
pub async fn round_count<P: DataProvider>(
    provider: &P,
    season: i32,
    now: DateTime<Utc>,
) -> Result<usize, F1DataError> {
    if season == now.year() {
        completed_rounds(provider, now).await
    } else {
        Ok(provider.event_schedule(season).await?.len())
    }
}

/// Round numbers fetched for an event count: `1` up to but excluding `count`.
///
/// The count includes testing events (round 0), so with a single testing
/// event this covers every race round.
pub fn rounds_to_fetch(count: usize) -> Range<u32> {
    1..u32::try_from(count).unwrap_or(u32::MAX)
}

/// Fetches every round of `season` in ascending order and stacks them.
///
/// Any failure aborts the whole season; rounds fetched so far are discarded.
pub async fn collect_season<P: DataProvider>(
    provider: &P,
    season: i32,
    now: DateTime<Utc>,
) -> Result<SeasonTable, F1DataError> {
    let count = round_count(provider, season, now).await?;
    info!("Season {}: {} events", season, count);

    let mut rounds = Vec::new();
    for round in rounds_to_fetch(count) {
        info!("Getting round: {} ----------------", round);
        rounds.push(fetch_round(provider, season, round).await?);
    }
    if rounds.is_empty() {
        return Err(F1DataError::NoRounds(season));
    }

    let table = SeasonTable::concat(season, rounds)?;
    info!("Season {} table shape: {:?}", season, table.shape());
    Ok(table)
}

/// Collects `season` and writes it to `<output_dir>/races_<season>.parquet`.
pub async fn run_pipeline<P: DataProvider>(
    provider: &P,
    season: i32,
    now: DateTime<Utc>,
    output_dir: &Path,
) -> Result<PathBuf, F1DataError> {
    let table = collect_season(provider, season, now).await?;
    write_season(&table, output_dir).await
}
