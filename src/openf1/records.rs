//! Raw records as returned by the OpenF1 REST API.
//!
//! Every endpoint returns a JSON array of flat objects. Only the fields this
//! crate uses are declared; unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub meeting_key: i64,
    pub meeting_name: String,
    pub location: Option<String>,
    pub country_name: Option<String>,
    pub date_start: DateTime<Utc>,
    #[serde(default)]
    pub date_end: Option<DateTime<Utc>>,
}

impl Meeting {
    pub fn is_testing(&self) -> bool {
        self.meeting_name.contains("Testing")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionEntry {
    pub session_key: i64,
    pub meeting_key: i64,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
}

impl SessionEntry {
    /// When the session is over: its end, or its start when no end is known.
    pub fn finish_date(&self) -> Option<DateTime<Utc>> {
        self.date_end.or(self.date_start)
    }

    /// Sessions without an end date are treated as unfinished.
    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.date_end.is_some_and(|end| end < now)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lap {
    pub driver_number: i64,
    pub lap_number: i64,
    pub date_start: Option<DateTime<Utc>>,
    pub lap_duration: Option<f64>,
    pub duration_sector_1: Option<f64>,
    pub duration_sector_2: Option<f64>,
    pub duration_sector_3: Option<f64>,
    pub i1_speed: Option<f64>,
    pub i2_speed: Option<f64>,
    pub st_speed: Option<f64>,
    pub is_pit_out_lap: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stint {
    pub driver_number: i64,
    pub stint_number: i64,
    pub lap_start: Option<i64>,
    pub lap_end: Option<i64>,
    pub compound: Option<String>,
    pub tyre_age_at_start: Option<i64>,
}

impl Stint {
    pub fn covers(&self, driver_number: i64, lap_number: i64) -> bool {
        self.driver_number == driver_number
            && self.lap_start.is_some_and(|start| start <= lap_number)
            && self.lap_end.map_or(true, |end| lap_number <= end)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Driver {
    pub driver_number: i64,
    pub name_acronym: Option<String>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSample {
    pub date: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub rainfall: Option<f64>,
    pub track_temperature: Option<f64>,
    pub wind_direction: Option<i64>,
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarSample {
    pub date: DateTime<Utc>,
    pub driver_number: i64,
    pub rpm: Option<i64>,
    pub speed: Option<i64>,
    pub n_gear: Option<i64>,
    pub throttle: Option<i64>,
    pub brake: Option<i64>,
    pub drs: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_meeting_with_offset_dates() {
        let json = r#"[{
            "meeting_key": 1229,
            "meeting_name": "Bahrain Grand Prix",
            "meeting_official_name": "FORMULA 1 GULF AIR BAHRAIN GRAND PRIX 2024",
            "location": "Sakhir",
            "country_name": "Bahrain",
            "circuit_short_name": "Sakhir",
            "date_start": "2024-02-29T11:30:00+00:00",
            "gmt_offset": "03:00:00",
            "year": 2024
        }]"#;
        let meetings: Vec<Meeting> = serde_json::from_str(json).unwrap();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].meeting_key, 1229);
        assert_eq!(
            meetings[0].date_start,
            Utc.with_ymd_and_hms(2024, 2, 29, 11, 30, 0).unwrap()
        );
        assert!(meetings[0].date_end.is_none());
        assert!(!meetings[0].is_testing());
    }

    #[test]
    fn test_parse_lap_with_nulls() {
        let json = r#"{
            "meeting_key": 1229, "session_key": 9472, "driver_number": 1,
            "i1_speed": null, "i2_speed": 258, "st_speed": 282,
            "date_start": null, "lap_duration": null,
            "is_pit_out_lap": false,
            "duration_sector_1": null, "duration_sector_2": 38.947, "duration_sector_3": 26.105,
            "segments_sector_1": [null, 2049, 2049], "lap_number": 1
        }"#;
        let lap: Lap = serde_json::from_str(json).unwrap();
        assert_eq!(lap.lap_number, 1);
        assert_eq!(lap.i2_speed, Some(258.0));
        assert!(lap.date_start.is_none());
        assert_eq!(lap.is_pit_out_lap, Some(false));
    }

    #[test]
    fn test_stint_covers() {
        let stint = Stint {
            driver_number: 44,
            stint_number: 2,
            lap_start: Some(18),
            lap_end: Some(40),
            compound: Some("HARD".to_string()),
            tyre_age_at_start: Some(0),
        };
        assert!(stint.covers(44, 18));
        assert!(stint.covers(44, 40));
        assert!(!stint.covers(44, 41));
        assert!(!stint.covers(1, 20));
    }

    #[test]
    fn test_session_finished() {
        let json = r#"{"session_key": 9472, "session_name": "Race", "meeting_key": 1229,
            "date_start": "2024-03-02T15:00:00+00:00", "date_end": "2024-03-02T17:00:00+00:00"}"#;
        let entry: SessionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.meeting_key, 1229);
        assert_eq!(
            entry.finish_date(),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 17, 0, 0).unwrap())
        );
        assert!(entry.is_finished(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap()));
        assert!(!entry.is_finished(Utc.with_ymd_and_hms(2024, 3, 2, 16, 0, 0).unwrap()));
    }
}
