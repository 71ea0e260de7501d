//! OpenF1 telemetry client.
//!
//! Fetches meetings, sessions, laps and driver identities from the public
//! OpenF1 API and derives per-driver session performance. Responses are
//! TTL-cached; the fetch loop retries with backoff.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use super::{FetchError, TelemetryProvider};
use crate::cache::TtlCache;
use crate::models::{Driver, DriverPerformance, Lap, Meeting, SectorTimes, Session};

const BASE_URL: &str = "https://api.openf1.org/v1";

/// Practice sessions considered for analysis, in weekend order
const PRACTICE_SESSIONS: [&str; 3] = ["Practice 1", "Practice 2", "Practice 3"];

/// OpenF1 client configuration
#[derive(Debug, Clone)]
pub struct OpenF1Config {
    pub base_url: String,
    /// Championship season to query meetings for
    pub season: u16,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Max retry attempts per request
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for OpenF1Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            season: 2026,
            timeout_secs: 30,
            max_retries: 3,
            retry_delay_ms: 500,
        }
    }
}

/// OpenF1 HTTP client with response caching
pub struct OpenF1Client {
    client: reqwest::Client,
    config: OpenF1Config,
    meetings: TtlCache<Vec<Meeting>>,
    sessions: TtlCache<Vec<Session>>,
    laps: TtlCache<Vec<Lap>>,
    drivers: TtlCache<Vec<Driver>>,
}

impl OpenF1Client {
    pub fn new(config: OpenF1Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            meetings: TtlCache::new(),
            sessions: TtlCache::new(),
            laps: TtlCache::new(),
            drivers: TtlCache::new(),
        })
    }

    /// Fetch a JSON endpoint with retry and backoff
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.config.base_url, path);

        let mut last_status = None;
        for attempt in 0..self.config.max_retries {
            match self.client.get(&url).query(params).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json::<T>().await?);
                    }
                    tracing::warn!(
                        "OpenF1 returned {} for {} (attempt {}/{})",
                        status,
                        path,
                        attempt + 1,
                        self.config.max_retries
                    );
                    last_status = Some(status);
                }
                Err(e) => {
                    if attempt + 1 == self.config.max_retries {
                        return Err(FetchError::Request(e));
                    }
                    tracing::warn!(
                        "OpenF1 request failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.config.max_retries,
                        e
                    );
                }
            }

            if attempt + 1 < self.config.max_retries {
                let backoff = Duration::from_millis(self.config.retry_delay_ms * (attempt as u64 + 1));
                tokio::time::sleep(backoff).await;
            }
        }

        Err(FetchError::Status {
            status: last_status.unwrap_or(reqwest::StatusCode::BAD_GATEWAY),
            url,
        })
    }

    async fn season_meetings(&self) -> Result<Vec<Meeting>, FetchError> {
        self.meetings
            .get_or_fetch("meetings:latest", || async move {
                self.fetch_json("/meetings", &[("year", self.config.season.to_string())])
                    .await
            })
            .await
    }

    async fn session_laps(&self, session_key: u32) -> Result<Vec<Lap>, FetchError> {
        self.laps
            .get_or_fetch(&format!("laps:{}", session_key), || async move {
                self.fetch_json("/laps", &[("session_key", session_key.to_string())])
                    .await
            })
            .await
    }

    async fn session_drivers(&self, session_key: u32) -> Result<Vec<Driver>, FetchError> {
        self.drivers
            .get_or_fetch(&format!("drivers:{}", session_key), || async move {
                self.fetch_json("/drivers", &[("session_key", session_key.to_string())])
                    .await
            })
            .await
    }

    async fn session_name(&self, session_key: u32) -> Result<String, FetchError> {
        let sessions = self
            .sessions
            .get_or_fetch(&format!("session-info:{}", session_key), || async move {
                self.fetch_json("/sessions", &[("session_key", session_key.to_string())])
                    .await
            })
            .await?;

        Ok(sessions
            .first()
            .map(|s| s.session_name.clone())
            .unwrap_or_else(|| "Unknown".to_string()))
    }
}

impl TelemetryProvider for OpenF1Client {
    async fn latest_meeting(&self) -> Result<Option<Meeting>, FetchError> {
        let meetings = self.season_meetings().await?;
        Ok(select_latest_meeting(&meetings, Utc::now()).cloned())
    }

    async fn practice_sessions(&self, meeting_key: u32) -> Result<Vec<Session>, FetchError> {
        let sessions = self
            .sessions
            .get_or_fetch(&format!("sessions:{}", meeting_key), || async move {
                let all: Vec<Session> = self
                    .fetch_json("/sessions", &[("meeting_key", meeting_key.to_string())])
                    .await?;
                Ok::<_, FetchError>(all
                    .into_iter()
                    .filter(|s| PRACTICE_SESSIONS.contains(&s.session_name.as_str()))
                    .collect())
            })
            .await?;

        Ok(sessions)
    }

    async fn driver_performances(
        &self,
        session_key: u32,
    ) -> Result<Vec<DriverPerformance>, FetchError> {
        let (laps, drivers) = tokio::try_join!(
            self.session_laps(session_key),
            self.session_drivers(session_key),
        )?;
        let session_name = self.session_name(session_key).await?;

        let mut laps_by_driver: HashMap<u8, Vec<&Lap>> = HashMap::new();
        for lap in &laps {
            laps_by_driver.entry(lap.driver_number).or_default().push(lap);
        }

        Ok(drivers
            .into_iter()
            .map(|driver| {
                let driver_laps = laps_by_driver
                    .get(&driver.driver_number)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                DriverPerformance {
                    best_lap_time: find_best_lap(driver_laps),
                    best_sectors: find_best_sectors(driver_laps),
                    top_speed: find_top_speed(driver_laps),
                    lap_count: driver_laps.iter().filter(|l| !l.is_pit_out_lap).count() as u32,
                    session_name: session_name.clone(),
                    driver,
                }
            })
            .collect())
    }
}

/// Pick the most recent past-or-current meeting by start date, falling back
/// to the first scheduled one before the season starts
fn select_latest_meeting(meetings: &[Meeting], now: DateTime<Utc>) -> Option<&Meeting> {
    if meetings.is_empty() {
        return None;
    }

    meetings
        .iter()
        .filter(|m| matches!(parse_start_date(&m.date_start), Some(d) if d <= now))
        .next_back()
        .or_else(|| meetings.first())
}

/// Parse upstream date strings: RFC 3339 first, bare dates second
fn parse_start_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = raw.parse::<chrono::NaiveDateTime>() {
        return Some(dt.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Fastest completed non-pit-out lap
fn find_best_lap(laps: &[&Lap]) -> Option<f64> {
    laps.iter()
        .filter(|l| !l.is_pit_out_lap)
        .filter_map(|l| l.lap_duration)
        .reduce(f64::min)
}

/// Best individual sector times over non-pit-out laps
fn find_best_sectors(laps: &[&Lap]) -> SectorTimes {
    let valid: Vec<&&Lap> = laps.iter().filter(|l| !l.is_pit_out_lap).collect();

    SectorTimes {
        sector1: valid.iter().filter_map(|l| l.duration_sector_1).reduce(f64::min),
        sector2: valid.iter().filter_map(|l| l.duration_sector_2).reduce(f64::min),
        sector3: valid.iter().filter_map(|l| l.duration_sector_3).reduce(f64::min),
    }
}

/// Highest speed across all speed traps, pit-out laps included
fn find_top_speed(laps: &[&Lap]) -> Option<f64> {
    laps.iter()
        .flat_map(|l| [l.i1_speed, l.i2_speed, l.st_speed])
        .flatten()
        .reduce(f64::max)
}
