//! In-memory provider used by the pipeline tests.

use crate::error::F1DataError;
use crate::provider::DataProvider;
use crate::types::schedule::tests::sample_schedule;
use crate::types::schedule::EventSchedule;
use crate::types::session::tests::{datetime_column, laps_frame};
use crate::types::session::{LoadOptions, Session, SessionInfo, SessionKind, TIME_COLUMN};
use polars::prelude::*;
use std::sync::Mutex;

pub(crate) struct FakeProvider {
    schedule: EventSchedule,
    requests: Mutex<Vec<(u32, LoadOptions)>>,
}

impl FakeProvider {
    /// A season with one testing event followed by `race_rounds` races.
    pub(crate) fn new(season: i32, race_rounds: u32) -> Self {
        Self::with_schedule(sample_schedule(season, race_rounds))
    }

    pub(crate) fn with_schedule(schedule: EventSchedule) -> Self {
        Self {
            schedule,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Round `n` has `n + 1` laps, one every 90 seconds.
    pub(crate) fn laps_for(&self, round: u32) -> DataFrame {
        laps_frame((0..=round as i64).map(|i| Some(i * 90_000)).collect())
    }

    pub(crate) fn weather_for(&self, round: u32) -> DataFrame {
        let samples = round as i64 + 1;
        DataFrame::new(vec![
            datetime_column(
                TIME_COLUMN,
                (0..samples).map(|i| Some(i * 60_000)).collect(),
            ),
            Column::new(
                "AirTemp".into(),
                (0..samples).map(|i| 20.0 + i as f64).collect::<Vec<_>>(),
            ),
            Column::new("Rainfall".into(), vec![false; samples as usize]),
        ])
        .unwrap()
    }

    pub(crate) fn requested(&self) -> Vec<(u32, LoadOptions)> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requested_rounds(&self) -> Vec<u32> {
        self.requested().into_iter().map(|(round, _)| round).collect()
    }
}

impl DataProvider for FakeProvider {
    async fn event_schedule(&self, season: i32) -> Result<EventSchedule, F1DataError> {
        if season == self.schedule.season() {
            Ok(self.schedule.clone())
        } else {
            Ok(EventSchedule::new(season, Vec::new()))
        }
    }

    async fn load_session(
        &self,
        season: i32,
        round: u32,
        kind: SessionKind,
        options: LoadOptions,
    ) -> Result<Session, F1DataError> {
        let schedule = self.event_schedule(season).await?;
        let event = schedule
            .get_round(round)
            .ok_or(F1DataError::InvalidSession { season, round })?;
        self.requests.lock().unwrap().push((round, options));

        Ok(Session::new(
            SessionInfo {
                season,
                round,
                kind,
                event_name: event.name.clone(),
                meeting_key: event.meeting_key,
                session_key: 9000 + round as i64,
            },
            options.laps.then(|| self.laps_for(round)),
            options.weather.then(|| self.weather_for(round)),
            None,
        ))
    }
}
