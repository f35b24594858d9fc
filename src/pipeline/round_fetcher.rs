use crate::error::F1DataError;
use crate::pipeline::round_table::RoundTable;
use crate::provider::DataProvider;
use crate::types::session::{LoadOptions, SessionKind};

/// Loads the race of `season`/`round` and joins its laps with the weather
/// recorded for each lap. Telemetry is not loaded.
pub async fn fetch_round<P: DataProvider>(
    provider: &P,
    season: i32,
    round: u32,
) -> Result<RoundTable, F1DataError> {
    let session = provider
        .load_session(season, round, SessionKind::Race, LoadOptions::without_telemetry())
        .await?;

    let laps = session.laps()?;
    let weather = session.weather_per_lap()?;
    Ok(RoundTable::join(season, round, laps, &weather)?)
}
