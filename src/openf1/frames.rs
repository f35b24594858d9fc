//! Conversion of raw OpenF1 records into schedules and polars frames.

use crate::openf1::records::{CarSample, Driver, Lap, Meeting, SessionEntry, Stint, WeatherSample};
use crate::types::schedule::{Event, EventSchedule};
use crate::types::session::{LAP_START_COLUMN, TIME_COLUMN};
use crate::utils::{millis, seconds_to_millis};
use polars::prelude::*;
use std::collections::HashMap;

fn datetime_column(name: &str, values: Vec<Option<i64>>) -> PolarsResult<Column> {
    Column::new(name.into(), values).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
}

fn duration_column(name: &str, values: Vec<Option<i64>>) -> PolarsResult<Column> {
    Column::new(name.into(), values).cast(&DataType::Duration(TimeUnit::Milliseconds))
}

/// Builds the season schedule. Testing meetings get round 0, the remaining
/// meetings are numbered from 1 in order of their start date.
///
/// `races` are the race sessions of the season; each meeting takes its race
/// date from the one with its meeting key.
pub fn schedule_from_meetings(
    season: i32,
    mut meetings: Vec<Meeting>,
    races: &[SessionEntry],
) -> EventSchedule {
    meetings.sort_by_key(|m| m.date_start);
    let race_dates: HashMap<i64, _> = races
        .iter()
        .filter_map(|s| s.finish_date().map(|date| (s.meeting_key, date)))
        .collect();
    let mut next_round = 1;
    let events = meetings
        .into_iter()
        .map(|m| {
            let is_testing = m.is_testing();
            let round = if is_testing {
                0
            } else {
                next_round += 1;
                next_round - 1
            };
            Event {
                round,
                is_testing,
                name: m.meeting_name,
                location: m.location,
                country: m.country_name,
                meeting_key: m.meeting_key,
                race_date: race_dates.get(&m.meeting_key).copied(),
                date_start: m.date_start,
                date_end: m.date_end,
            }
        })
        .collect();
    EventSchedule::new(season, events)
}

/// Builds the lap frame, enriched with driver and stint information.
///
/// Rows are ordered by driver number, then lap number.
pub fn laps_frame(
    mut laps: Vec<Lap>,
    stints: &[Stint],
    drivers: &[Driver],
) -> PolarsResult<DataFrame> {
    laps.sort_by_key(|l| (l.driver_number, l.lap_number));
    let drivers: HashMap<i64, &Driver> = drivers.iter().map(|d| (d.driver_number, d)).collect();

    let n = laps.len();
    let mut time = Vec::with_capacity(n);
    let mut driver = Vec::with_capacity(n);
    let mut driver_number = Vec::with_capacity(n);
    let mut team = Vec::with_capacity(n);
    let mut lap_time = Vec::with_capacity(n);
    let mut stint_number = Vec::with_capacity(n);
    let mut sector_1 = Vec::with_capacity(n);
    let mut sector_2 = Vec::with_capacity(n);
    let mut sector_3 = Vec::with_capacity(n);
    let mut compound = Vec::with_capacity(n);
    let mut tyre_life = Vec::with_capacity(n);
    let mut lap_start = Vec::with_capacity(n);

    for lap in &laps {
        let start = millis(lap.date_start);
        let duration = seconds_to_millis(lap.lap_duration);
        time.push(start.zip(duration).map(|(s, d)| s + d));
        lap_start.push(start);
        lap_time.push(duration);
        sector_1.push(seconds_to_millis(lap.duration_sector_1));
        sector_2.push(seconds_to_millis(lap.duration_sector_2));
        sector_3.push(seconds_to_millis(lap.duration_sector_3));

        let info = drivers.get(&lap.driver_number);
        driver.push(info.and_then(|d| d.name_acronym.clone()));
        team.push(info.and_then(|d| d.team_name.clone()));
        driver_number.push(lap.driver_number.to_string());

        let stint = stints
            .iter()
            .find(|s| s.covers(lap.driver_number, lap.lap_number));
        stint_number.push(stint.map(|s| s.stint_number));
        compound.push(stint.and_then(|s| s.compound.clone()));
        // Laps driven on the set, counting the current one.
        tyre_life.push(stint.and_then(|s| {
            s.lap_start
                .map(|start| s.tyre_age_at_start.unwrap_or(0) + lap.lap_number - start + 1)
        }));
    }

    DataFrame::new(vec![
        datetime_column(TIME_COLUMN, time)?,
        Column::new("Driver".into(), driver),
        Column::new("DriverNumber".into(), driver_number),
        Column::new("Team".into(), team),
        duration_column("LapTime", lap_time)?,
        Column::new(
            "LapNumber".into(),
            laps.iter().map(|l| l.lap_number).collect::<Vec<_>>(),
        ),
        Column::new("Stint".into(), stint_number),
        duration_column("Sector1Time", sector_1)?,
        duration_column("Sector2Time", sector_2)?,
        duration_column("Sector3Time", sector_3)?,
        Column::new(
            "SpeedI1".into(),
            laps.iter().map(|l| l.i1_speed).collect::<Vec<_>>(),
        ),
        Column::new(
            "SpeedI2".into(),
            laps.iter().map(|l| l.i2_speed).collect::<Vec<_>>(),
        ),
        Column::new(
            "SpeedST".into(),
            laps.iter().map(|l| l.st_speed).collect::<Vec<_>>(),
        ),
        Column::new(
            "IsPitOutLap".into(),
            laps.iter().map(|l| l.is_pit_out_lap).collect::<Vec<_>>(),
        ),
        Column::new("Compound".into(), compound),
        Column::new("TyreLife".into(), tyre_life),
        datetime_column(LAP_START_COLUMN, lap_start)?,
    ])
}

/// Builds the weather frame, one row per sample in time order.
pub fn weather_frame(mut samples: Vec<WeatherSample>) -> PolarsResult<DataFrame> {
    samples.sort_by_key(|s| s.date);
    DataFrame::new(vec![
        datetime_column(
            TIME_COLUMN,
            samples.iter().map(|s| Some(s.date.timestamp_millis())).collect(),
        )?,
        Column::new(
            "AirTemp".into(),
            samples.iter().map(|s| s.air_temperature).collect::<Vec<_>>(),
        ),
        Column::new(
            "Humidity".into(),
            samples.iter().map(|s| s.humidity).collect::<Vec<_>>(),
        ),
        Column::new(
            "Pressure".into(),
            samples.iter().map(|s| s.pressure).collect::<Vec<_>>(),
        ),
        Column::new(
            "Rainfall".into(),
            samples
                .iter()
                .map(|s| s.rainfall.map(|r| r > 0.0))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "TrackTemp".into(),
            samples.iter().map(|s| s.track_temperature).collect::<Vec<_>>(),
        ),
        Column::new(
            "WindDirection".into(),
            samples.iter().map(|s| s.wind_direction).collect::<Vec<_>>(),
        ),
        Column::new(
            "WindSpeed".into(),
            samples.iter().map(|s| s.wind_speed).collect::<Vec<_>>(),
        ),
    ])
}

/// Builds the car telemetry frame, ordered by driver number, then time.
pub fn telemetry_frame(mut samples: Vec<CarSample>) -> PolarsResult<DataFrame> {
    samples.sort_by_key(|s| (s.driver_number, s.date));
    DataFrame::new(vec![
        datetime_column(
            "Date",
            samples.iter().map(|s| Some(s.date.timestamp_millis())).collect(),
        )?,
        Column::new(
            "DriverNumber".into(),
            samples
                .iter()
                .map(|s| s.driver_number.to_string())
                .collect::<Vec<_>>(),
        ),
        Column::new("RPM".into(), samples.iter().map(|s| s.rpm).collect::<Vec<_>>()),
        Column::new(
            "Speed".into(),
            samples.iter().map(|s| s.speed).collect::<Vec<_>>(),
        ),
        Column::new(
            "nGear".into(),
            samples.iter().map(|s| s.n_gear).collect::<Vec<_>>(),
        ),
        Column::new(
            "Throttle".into(),
            samples.iter().map(|s| s.throttle).collect::<Vec<_>>(),
        ),
        Column::new(
            "Brake".into(),
            samples.iter().map(|s| s.brake).collect::<Vec<_>>(),
        ),
        Column::new("DRS".into(), samples.iter().map(|s| s.drs).collect::<Vec<_>>()),
    ])
}
