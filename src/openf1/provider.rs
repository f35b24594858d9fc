//! [`DataProvider`] implementation backed by the OpenF1 REST API.

use crate::error::F1DataError;
use crate::openf1::error::ProviderError;
use crate::openf1::frames::{laps_frame, schedule_from_meetings, telemetry_frame, weather_frame};
use crate::openf1::loader::{OpenF1Loader, DEFAULT_BASE_URL};
use crate::openf1::records::{CarSample, Driver, Lap, Meeting, SessionEntry, Stint, WeatherSample};
use crate::provider::DataProvider;
use crate::types::schedule::EventSchedule;
use crate::types::session::{LoadOptions, Session, SessionInfo, SessionKind};
use crate::utils::get_cache_dir;
use bon::bon;
use chrono::Utc;
use log::{debug, info};
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Provider client for <https://openf1.org>.
///
/// The schedule and race sessions of a season are requested once per provider
/// and kept in memory. Lap, weather and telemetry frames of finished sessions
/// are cached as parquet files.
///
/// # Examples
///
/// ```no_run
/// # use f1data::{DataProvider, F1DataError, OpenF1Provider};
/// # #[tokio::main]
/// # async fn main() -> Result<(), F1DataError> {
/// let provider = OpenF1Provider::builder().build()?;
/// let schedule = provider.event_schedule(2024).await?;
/// println!("{} events in 2024", schedule.len());
/// # Ok(())
/// # }
/// ```
pub struct OpenF1Provider {
    loader: OpenF1Loader,
    seasons: Mutex<HashMap<i32, SeasonIndex>>,
}

/// Schedule of a season together with its race sessions.
#[derive(Debug, Clone)]
struct SeasonIndex {
    schedule: EventSchedule,
    races: Vec<SessionEntry>,
}

impl SeasonIndex {
    fn new(season: i32, meetings: Vec<Meeting>, races: Vec<SessionEntry>) -> Self {
        Self {
            schedule: schedule_from_meetings(season, meetings, &races),
            races,
        }
    }

    fn race_session(&self, meeting_key: i64) -> Option<&SessionEntry> {
        self.races.iter().find(|s| s.meeting_key == meeting_key)
    }
}

#[bon]
impl OpenF1Provider {
    /// Creates a provider.
    ///
    /// * `.base_url(..)`: API root, defaults to `https://api.openf1.org/v1`.
    /// * `.cache_dir(..)`: parquet cache location, defaults to the system cache
    ///   directory.
    /// * `.use_cache(..)`: disable the parquet cache with `false`. Defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`F1DataError::CacheDirResolution`] if caching is enabled, no
    /// cache directory is given and the system one cannot be determined.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        cache_dir: Option<PathBuf>,
        #[builder(default = true)] use_cache: bool,
    ) -> Result<Self, F1DataError> {
        let cache_dir = if use_cache {
            Some(
                cache_dir
                    .or_else(get_cache_dir)
                    .ok_or(F1DataError::CacheDirResolution)?,
            )
        } else {
            None
        };
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            loader: OpenF1Loader::new(&base_url, cache_dir.as_deref()),
            seasons: Mutex::new(HashMap::new()),
        })
    }

    async fn season_index(&self, season: i32) -> Result<SeasonIndex, ProviderError> {
        {
            let seasons = self.seasons.lock().await;
            if let Some(index) = seasons.get(&season) {
                return Ok(index.clone());
            }
        }

        let year = [("year", season.to_string())];
        let meetings: Vec<Meeting> = self.loader.get_records("meetings", &year).await?;
        let races: Vec<SessionEntry> = self
            .loader
            .get_records(
                "sessions",
                &[
                    ("year", season.to_string()),
                    ("session_name", SessionKind::Race.api_name().to_string()),
                ],
            )
            .await?;
        debug!(
            "Season {}: {} meetings, {} race sessions",
            season,
            meetings.len(),
            races.len()
        );
        let index = SeasonIndex::new(season, meetings, races);

        let mut seasons = self.seasons.lock().await;
        match seasons.entry(season) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => Ok(entry.insert(index).clone()),
        }
    }

    async fn session_entry(
        &self,
        index: &SeasonIndex,
        meeting_key: i64,
        kind: SessionKind,
    ) -> Result<Option<SessionEntry>, ProviderError> {
        if kind == SessionKind::Race {
            return Ok(index.race_session(meeting_key).cloned());
        }
        let sessions: Vec<SessionEntry> = self
            .loader
            .get_records(
                "sessions",
                &[
                    ("meeting_key", meeting_key.to_string()),
                    ("session_name", kind.api_name().to_string()),
                ],
            )
            .await?;
        Ok(sessions.into_iter().next())
    }

    async fn load_laps(&self, session_key: i64, cacheable: bool) -> Result<DataFrame, ProviderError> {
        let loader = &self.loader;
        let query = session_query(session_key);
        loader
            .cached_frame("laps", session_key, cacheable, move || async move {
                let laps: Vec<Lap> = loader.get_records("laps", &query).await?;
                let stints: Vec<Stint> = loader.get_records("stints", &query).await?;
                let drivers: Vec<Driver> = loader.get_records("drivers", &query).await?;
                laps_frame(laps, &stints, &drivers).map_err(|source| ProviderError::FrameBuild {
                    frame: "laps",
                    session_key,
                    source,
                })
            })
            .await
    }

    async fn load_weather(&self, session_key: i64, cacheable: bool) -> Result<DataFrame, ProviderError> {
        let loader = &self.loader;
        let query = session_query(session_key);
        loader
            .cached_frame("weather", session_key, cacheable, move || async move {
                let samples: Vec<WeatherSample> = loader.get_records("weather", &query).await?;
                weather_frame(samples).map_err(|source| ProviderError::FrameBuild {
                    frame: "weather",
                    session_key,
                    source,
                })
            })
            .await
    }

    async fn load_telemetry(&self, session_key: i64, cacheable: bool) -> Result<DataFrame, ProviderError> {
        let loader = &self.loader;
        let query = session_query(session_key);
        loader
            .cached_frame("car-data", session_key, cacheable, move || async move {
                let samples: Vec<CarSample> = loader.get_records("car_data", &query).await?;
                telemetry_frame(samples).map_err(|source| ProviderError::FrameBuild {
                    frame: "telemetry",
                    session_key,
                    source,
                })
            })
            .await
    }
}

fn session_query(session_key: i64) -> Vec<(&'static str, String)> {
    vec![("session_key", session_key.to_string())]
}

impl DataProvider for OpenF1Provider {
    async fn event_schedule(&self, season: i32) -> Result<EventSchedule, F1DataError> {
        Ok(self.season_index(season).await?.schedule)
    }

    async fn load_session(
        &self,
        season: i32,
        round: u32,
        kind: SessionKind,
        options: LoadOptions,
    ) -> Result<Session, F1DataError> {
        let invalid = || F1DataError::InvalidSession { season, round };

        let index = self.season_index(season).await?;
        let event = index.schedule.get_round(round).ok_or_else(invalid)?;
        let entry = self
            .session_entry(&index, event.meeting_key, kind)
            .await?
            .ok_or_else(invalid)?;
        let session_key = entry.session_key;
        let cacheable = entry.is_finished(Utc::now());

        info!(
            "Loading {} {} (season {}, round {}, session {})",
            event.name, kind, season, round, session_key
        );

        let laps = if options.laps {
            Some(self.load_laps(session_key, cacheable).await?)
        } else {
            None
        };
        let weather = if options.weather {
            Some(self.load_weather(session_key, cacheable).await?)
        } else {
            None
        };
        let telemetry = if options.telemetry {
            Some(self.load_telemetry(session_key, cacheable).await?)
        } else {
            None
        };

        Ok(Session::new(
            SessionInfo {
                season,
                round,
                kind,
                event_name: event.name.clone(),
                meeting_key: event.meeting_key,
                session_key,
            },
            laps,
            weather,
            telemetry,
        ))
    }
}
