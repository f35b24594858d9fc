//! Loaded session data and the options controlling what gets loaded.

use crate::error::F1DataError;
use polars::prelude::*;
use std::fmt;

/// Name of the timestamp column present in both lap and weather frames.
pub const TIME_COLUMN: &str = "Time";
/// Name of the lap start timestamp column in lap frames.
pub const LAP_START_COLUMN: &str = "LapStartDate";

/// An on-track session of a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Practice1,
    Practice2,
    Practice3,
    SprintQualifying,
    Sprint,
    Qualifying,
    Race,
}

impl SessionKind {
    /// The session name as used by the data provider.
    pub fn api_name(&self) -> &'static str {
        match self {
            SessionKind::Practice1 => "Practice 1",
            SessionKind::Practice2 => "Practice 2",
            SessionKind::Practice3 => "Practice 3",
            SessionKind::SprintQualifying => "Sprint Qualifying",
            SessionKind::Sprint => "Sprint",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Race => "Race",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Selects which parts of a session are loaded.
///
/// Telemetry is by far the largest part of a session, so callers that only
/// need timing data should leave it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub laps: bool,
    pub weather: bool,
    pub telemetry: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            laps: true,
            weather: true,
            telemetry: true,
        }
    }
}

impl LoadOptions {
    /// Laps and weather, no telemetry.
    pub fn without_telemetry() -> Self {
        Self {
            telemetry: false,
            ..Self::default()
        }
    }
}

/// Identifies a loaded session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub season: i32,
    pub round: u32,
    pub kind: SessionKind,
    pub event_name: String,
    pub meeting_key: i64,
    pub session_key: i64,
}

/// Data of one session, as returned by a [`crate::DataProvider`].
#[derive(Debug, Clone)]
pub struct Session {
    pub info: SessionInfo,
    laps: Option<DataFrame>,
    weather: Option<DataFrame>,
    telemetry: Option<DataFrame>,
}

impl Session {
    pub fn new(
        info: SessionInfo,
        laps: Option<DataFrame>,
        weather: Option<DataFrame>,
        telemetry: Option<DataFrame>,
    ) -> Self {
        Self {
            info,
            laps,
            weather,
            telemetry,
        }
    }

    /// One row per driver-lap.
    pub fn laps(&self) -> Result<&DataFrame, F1DataError> {
        self.laps.as_ref().ok_or(F1DataError::DataNotLoaded("laps"))
    }

    /// Raw weather samples, one row per sample.
    pub fn weather(&self) -> Result<&DataFrame, F1DataError> {
        self.weather
            .as_ref()
            .ok_or(F1DataError::DataNotLoaded("weather"))
    }

    pub fn telemetry(&self) -> Result<&DataFrame, F1DataError> {
        self.telemetry
            .as_ref()
            .ok_or(F1DataError::DataNotLoaded("telemetry"))
    }

    /// Weather samples assigned to laps, one row per lap in lap order.
    ///
    /// Each lap gets the first sample recorded at or after its start, or the
    /// last sample of the session when the lap started after it. Laps without
    /// a start time get a null row.
    pub fn weather_per_lap(&self) -> Result<DataFrame, F1DataError> {
        let laps = self.laps()?;
        let weather = self.weather()?;
        Ok(assign_weather_to_laps(laps, weather)?)
    }
}

fn timestamps(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

fn null_frame(template: &DataFrame, height: usize) -> PolarsResult<DataFrame> {
    let columns = template
        .get_columns()
        .iter()
        .map(|c| Column::full_null(c.name().clone(), height, c.dtype()))
        .collect();
    DataFrame::new(columns)
}

pub(crate) fn assign_weather_to_laps(
    laps: &DataFrame,
    weather: &DataFrame,
) -> PolarsResult<DataFrame> {
    let lap_starts = timestamps(laps, LAP_START_COLUMN)?;
    if weather.height() == 0 {
        return null_frame(weather, lap_starts.len());
    }

    let weather = weather.sort([TIME_COLUMN], SortMultipleOptions::default())?;
    // Nulls sort first, which matches the ordering of `Option`.
    let sample_times = timestamps(&weather, TIME_COLUMN)?;
    let last = sample_times.len() - 1;

    let indices = lap_starts.iter().map(|start| {
        start.map(|start| {
            let idx = sample_times.partition_point(|t| *t < Some(start));
            idx.min(last) as IdxSize
        })
    });
    let indices = IdxCa::from_iter_options("idx".into(), indices);
    weather.take(&indices)
}
