//! The narrow interface the pipeline needs from a motorsport data provider.

use crate::error::F1DataError;
use crate::types::schedule::EventSchedule;
use crate::types::session::{LoadOptions, Session, SessionKind};
use chrono::{DateTime, Datelike, Utc};

/// Source of season schedules and session data.
///
/// [`crate::OpenF1Provider`] is the implementation backed by the OpenF1 API.
#[allow(async_fn_in_trait)]
pub trait DataProvider {
    /// All events of a season in date order, pre-season testing included.
    async fn event_schedule(&self, season: i32) -> Result<EventSchedule, F1DataError>;

    /// Loads one session of a race weekend.
    ///
    /// Returns [`F1DataError::InvalidSession`] when the season has no such
    /// round or the round has no session of the requested kind.
    async fn load_session(
        &self,
        season: i32,
        round: u32,
        kind: SessionKind,
        options: LoadOptions,
    ) -> Result<Session, F1DataError>;

    /// Events of the current season that have not taken place as of `now`.
    async fn events_remaining(&self, now: DateTime<Utc>) -> Result<EventSchedule, F1DataError> {
        Ok(self.event_schedule(now.year()).await?.remaining(now))
    }
}
