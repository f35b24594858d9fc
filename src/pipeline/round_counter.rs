use crate::error::F1DataError;
use crate::provider::DataProvider;
use chrono::{DateTime, Datelike, Utc};
use log::debug;

/// Number of events of the current season (the year of `now`) that already
/// have results: the schedule size minus the events still to come.
pub async fn completed_rounds<P: DataProvider>(
    provider: &P,
    now: DateTime<Utc>,
) -> Result<usize, F1DataError> {
    let schedule = provider.event_schedule(now.year()).await?;
    let remaining = provider.events_remaining(now).await?;
    debug!(
        "Season {}: {} scheduled events, {} remaining",
        now.year(),
        schedule.len(),
        remaining.len()
    );
    Ok(schedule.len().saturating_sub(remaining.len()))
}
