//! Season schedule types.
//!
//! A schedule lists every event of a season in date order, pre-season testing
//! included. Testing events carry round `0`; race weekends are numbered from `1`.

use chrono::{DateTime, Duration, Utc};

/// Days from the start of a race weekend until its race is certainly over.
const WEEKEND_SPAN_DAYS: i64 = 3;

/// A single event (race weekend or testing) of a season.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Round number within the season. `0` for testing events.
    pub round: u32,
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
    /// Provider identifier of the event.
    pub meeting_key: i64,
    pub date_start: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
    /// End of the race session, or its start when no end is published.
    pub race_date: Option<DateTime<Utc>>,
    pub is_testing: bool,
}

impl Event {
    /// The moment after which the event has results.
    ///
    /// This is the race date when known, then the event end. Events with
    /// neither are assumed to finish three days after they start.
    pub fn event_date(&self) -> DateTime<Utc> {
        self.race_date
            .or(self.date_end)
            .unwrap_or(self.date_start + Duration::days(WEEKEND_SPAN_DAYS))
    }
}

/// All events of one season, ordered by start date.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSchedule {
    season: i32,
    events: Vec<Event>,
}

impl EventSchedule {
    pub fn new(season: i32, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.date_start);
        Self { season, events }
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Number of events, testing included.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Looks up a race weekend by round number. Testing events are never returned.
    pub fn get_round(&self, round: u32) -> Option<&Event> {
        if round == 0 {
            return None;
        }
        self.events
            .iter()
            .find(|e| !e.is_testing && e.round == round)
    }

    /// Round numbers of all race weekends in the schedule.
    pub fn race_rounds(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter(|e| !e.is_testing)
            .map(|e| e.round)
            .collect()
    }

    /// Events whose event date is at or after `now`.
    pub fn remaining(&self, now: DateTime<Utc>) -> EventSchedule {
        EventSchedule {
            season: self.season,
            events: self
                .events
                .iter()
                .filter(|e| e.event_date() >= now)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn event(round: u32, start: DateTime<Utc>, is_testing: bool) -> Event {
        Event {
            round,
            name: if is_testing {
                "Pre-Season Testing".to_string()
            } else {
                format!("Grand Prix {round}")
            },
            location: None,
            country: None,
            meeting_key: 1000 + round as i64,
            date_start: start,
            date_end: Some(start + Duration::days(2)),
            race_date: None,
            is_testing,
        }
    }

    pub(crate) fn sample_schedule(season: i32, race_rounds: u32) -> EventSchedule {
        let start = Utc.with_ymd_and_hms(season, 2, 20, 10, 0, 0).unwrap();
        let mut events = vec![event(0, start, true)];
        for round in 1..=race_rounds {
            events.push(event(round, start + Duration::weeks(round as i64 + 1), false));
        }
        EventSchedule::new(season, events)
    }

    #[test]
    fn test_len_includes_testing() {
        let schedule = sample_schedule(2024, 5);
        assert_eq!(schedule.len(), 6);
        assert_eq!(schedule.race_rounds(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_get_round_skips_testing() {
        let schedule = sample_schedule(2024, 3);
        assert!(schedule.get_round(0).is_none());
        assert_eq!(schedule.get_round(2).map(|e| e.round), Some(2));
        assert!(schedule.get_round(4).is_none());
    }

    #[test]
    fn test_events_sorted_by_start() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let schedule = EventSchedule::new(
            2024,
            vec![
                event(2, base + Duration::weeks(2), false),
                event(1, base, false),
            ],
        );
        let rounds: Vec<u32> = schedule.events().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![1, 2]);
    }

    #[test]
    fn test_remaining_uses_event_end() {
        let schedule = sample_schedule(2024, 4);
        // Saturday of round 2: its race (end date) is still ahead.
        let round_two = schedule.get_round(2).unwrap().clone();
        let now = round_two.date_start + Duration::days(1);
        let remaining = schedule.remaining(now);
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining.events()[0].round, 2);
        assert!(remaining.len() <= schedule.len());
    }

    #[test]
    fn test_remaining_after_season_is_empty() {
        let schedule = sample_schedule(2024, 4);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(schedule.remaining(now).is_empty());
    }

    #[test]
    fn test_event_date_prefers_race_date() {
        let start = Utc.with_ymd_and_hms(2025, 3, 21, 1, 30, 0).unwrap();
        let race_end = Utc.with_ymd_and_hms(2025, 3, 23, 9, 0, 0).unwrap();
        let mut gp = event(2, start, false);
        gp.race_date = Some(race_end);
        assert_eq!(gp.event_date(), race_end);

        gp.race_date = None;
        assert_eq!(gp.event_date(), start + Duration::days(2));

        gp.date_end = None;
        assert_eq!(gp.event_date(), start + Duration::days(3));
    }

    #[test]
    fn test_remaining_without_end_date_keeps_weekend_in_progress() {
        let start = Utc.with_ymd_and_hms(2025, 3, 21, 1, 30, 0).unwrap();
        let mut gp = event(2, start, false);
        gp.date_end = None;
        let schedule = EventSchedule::new(2025, vec![gp]);

        // Friday and Sunday morning of the weekend: the race has not finished.
        for now in [
            Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 23, 6, 0, 0).unwrap(),
        ] {
            assert_eq!(schedule.remaining(now).len(), 1);
        }
        let monday = Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap();
        assert!(schedule.remaining(monday).is_empty());
    }
}
