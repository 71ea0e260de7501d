//! Fantasy pricing client.
//!
//! Pulls the official fantasy feed for the current round and turns its
//! loosely-typed payload (string-encoded numbers, PascalCase keys with feed
//! typos) into typed price records at this boundary. The round number comes
//! from the Ergast race calendar.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::{index_constructors, index_drivers, FetchError, PricingProvider};
use crate::cache::TtlCache;
use crate::models::{FantasyConstructor, FantasyData, FantasyDriver};

const FANTASY_FEED_URL: &str = "https://fantasy.formula1.com/feeds/drivers";
const CALENDAR_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Player skill codes in the fantasy feed
const SKILL_DRIVER: u8 = 1;
const SKILL_CONSTRUCTOR: u8 = 2;

/// Fantasy client configuration
#[derive(Debug, Clone)]
pub struct FantasyConfig {
    pub feed_url: String,
    pub calendar_url: String,
    /// Championship season for the race calendar
    pub season: u16,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FantasyConfig {
    fn default() -> Self {
        Self {
            feed_url: FANTASY_FEED_URL.to_string(),
            calendar_url: CALENDAR_URL.to_string(),
            season: 2026,
            timeout_secs: 30,
        }
    }
}

/// Raw fantasy feed player record. Field names follow the feed verbatim,
/// typos included.
#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "PlayerId")]
    player_id: String,
    #[serde(rename = "Skill")]
    skill: u8,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "OldPlayerValue")]
    old_player_value: f64,
    #[serde(rename = "FUllName")]
    full_name: String,
    #[serde(rename = "TeamName", default)]
    team_name: String,
    #[serde(rename = "IsActive")]
    is_active: String,
    #[serde(rename = "OverallPpints")]
    overall_points: String,
    #[serde(rename = "GamedayPoints")]
    gameday_points: String,
    #[serde(rename = "SelectedPercentage")]
    selected_percentage: String,
    #[serde(rename = "FirstName", default)]
    first_name: String,
    #[serde(rename = "LastName", default)]
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct RawFeedData {
    #[serde(rename = "Value")]
    value: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(rename = "Data")]
    data: RawFeedData,
}

#[derive(Debug, Deserialize)]
struct ErgastRace {
    round: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct ErgastRaceTable {
    #[serde(rename = "Races")]
    races: Vec<ErgastRace>,
}

#[derive(Debug, Deserialize)]
struct ErgastData {
    #[serde(rename = "RaceTable")]
    race_table: ErgastRaceTable,
}

#[derive(Debug, Deserialize)]
struct ErgastResponse {
    #[serde(rename = "MRData")]
    mr_data: ErgastData,
}

/// Fantasy feed HTTP client with response caching
pub struct FantasyClient {
    client: reqwest::Client,
    config: FantasyConfig,
    round: TtlCache<u32>,
    data: TtlCache<FantasyData>,
}

impl FantasyClient {
    pub fn new(config: FantasyConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            round: TtlCache::new(),
            data: TtlCache::new(),
        })
    }

    /// Current pricing round from the race calendar. A calendar outage
    /// degrades to round 1 rather than failing the whole analysis.
    async fn current_round(&self) -> Result<u32, FetchError> {
        self.round
            .get_or_fetch("fantasy:current-round", || async move {
                let url = format!("{}/{}.json", self.config.calendar_url, self.config.season);
                let response = match self.client.get(&url).send().await {
                    Ok(r) if r.status().is_success() => r,
                    Ok(r) => {
                        tracing::warn!("calendar returned {}, defaulting to round 1", r.status());
                        return Ok(1);
                    }
                    Err(e) => {
                        tracing::warn!("calendar fetch failed ({}), defaulting to round 1", e);
                        return Ok(1);
                    }
                };

                let calendar: ErgastResponse = response.json().await?;
                let today = Utc::now().date_naive();
                Ok(round_for_date(&calendar.mr_data.race_table.races, today))
            })
            .await
    }
}

impl PricingProvider for FantasyClient {
    async fn fantasy_data(&self) -> Result<FantasyData, FetchError> {
        let round = self.current_round().await?;

        self.data
            .get_or_fetch(&format!("fantasy:data:{}", round), || async move {
                let url = format!("{}/{}_en.json", self.config.feed_url, round);
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status { status, url });
                }

                let feed: RawFeed = response.json().await?;
                Ok(parse_feed(feed, round))
            })
            .await
    }

    async fn driver_price_index(&self) -> Result<HashMap<String, FantasyDriver>, FetchError> {
        Ok(index_drivers(&self.fantasy_data().await?))
    }

    async fn constructor_price_index(
        &self,
    ) -> Result<HashMap<String, FantasyConstructor>, FetchError> {
        Ok(index_constructors(&self.fantasy_data().await?))
    }
}

/// Next upcoming round, or the final round once the season is over.
/// On race day the feed already prices the following round, so the race
/// day itself counts as past.
fn round_for_date(races: &[ErgastRace], today: NaiveDate) -> u32 {
    for race in races {
        let (Ok(date), Ok(round)) = (race.date.parse::<NaiveDate>(), race.round.parse::<u32>())
        else {
            continue;
        };
        if date > today {
            return round;
        }
    }

    races
        .last()
        .and_then(|r| r.round.parse().ok())
        .unwrap_or(1)
}

/// Convert the raw feed into typed records, keeping active players only
fn parse_feed(feed: RawFeed, round: u32) -> FantasyData {
    let active: Vec<RawPlayer> = feed
        .data
        .value
        .into_iter()
        .filter(|p| p.is_active == "1")
        .collect();

    let mut drivers = Vec::new();
    let mut constructors = Vec::new();

    for raw in active {
        match raw.skill {
            SKILL_DRIVER => {
                if let Some(driver) = parse_driver(&raw) {
                    drivers.push(driver);
                }
            }
            SKILL_CONSTRUCTOR => {
                if let Some(constructor) = parse_constructor(&raw) {
                    constructors.push(constructor);
                }
            }
            other => {
                tracing::debug!("skipping feed player {} with skill {}", raw.player_id, other);
            }
        }
    }

    FantasyData {
        drivers,
        constructors,
        round,
    }
}

/// Parse a string-encoded number from the feed; a malformed field drops the
/// whole record so NaN never reaches the analysis core
fn feed_number(player_id: &str, field: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(
                "dropping feed record {}: unparseable {} {:?}",
                player_id,
                field,
                raw
            );
            None
        }
    }
}

fn parse_driver(raw: &RawPlayer) -> Option<FantasyDriver> {
    Some(FantasyDriver {
        id: raw.player_id.trim().parse().ok()?,
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        team_name: raw.team_name.clone(),
        price: raw.value,
        selected_percentage: feed_number(&raw.player_id, "SelectedPercentage", &raw.selected_percentage)?,
        overall_points: feed_number(&raw.player_id, "OverallPpints", &raw.overall_points)?,
        gameday_points: feed_number(&raw.player_id, "GamedayPoints", &raw.gameday_points)?,
        price_change: raw.value - raw.old_player_value,
    })
}

fn parse_constructor(raw: &RawPlayer) -> Option<FantasyConstructor> {
    Some(FantasyConstructor {
        id: raw.player_id.trim().parse().ok()?,
        name: raw.full_name.clone(),
        price: raw.value,
        selected_percentage: feed_number(&raw.player_id, "SelectedPercentage", &raw.selected_percentage)?,
        overall_points: feed_number(&raw.player_id, "OverallPpints", &raw.overall_points)?,
        gameday_points: feed_number(&raw.player_id, "GamedayPoints", &raw.gameday_points)?,
        price_change: raw.value - raw.old_player_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_player(id: &str, skill: u8) -> RawPlayer {
        RawPlayer {
            player_id: id.to_string(),
            skill,
            value: 30.5,
            old_player_value: 30.2,
            full_name: "Red Bull Racing".to_string(),
            team_name: "Red Bull Racing".to_string(),
            is_active: "1".to_string(),
            overall_points: "187".to_string(),
            gameday_points: "0".to_string(),
            selected_percentage: "62.1".to_string(),
            first_name: "Max".to_string(),
            last_name: "Verstappen".to_string(),
        }
    }

    #[test]
    fn test_parse_driver() {
        let driver = parse_driver(&raw_player("7", SKILL_DRIVER)).unwrap();
        assert_eq!(driver.id, 7);
        assert_eq!(driver.last_name, "Verstappen");
        assert!((driver.price - 30.5).abs() < 1e-9);
        assert!((driver.price_change - 0.3).abs() < 1e-9);
        assert!((driver.selected_percentage - 62.1).abs() < 1e-9);
    }

    #[test]
    fn test_parse_constructor_uses_full_name() {
        let constructor = parse_constructor(&raw_player("101", SKILL_CONSTRUCTOR)).unwrap();
        assert_eq!(constructor.name, "Red Bull Racing");
    }

    #[test]
    fn test_malformed_number_drops_record() {
        let mut raw = raw_player("7", SKILL_DRIVER);
        raw.selected_percentage = "n/a".to_string();
        assert!(parse_driver(&raw).is_none());
    }

    #[test]
    fn test_parse_feed_partitions_and_filters() {
        let mut inactive = raw_player("9", SKILL_DRIVER);
        inactive.is_active = "0".to_string();

        let feed = RawFeed {
            data: RawFeedData {
                value: vec![
                    raw_player("7", SKILL_DRIVER),
                    raw_player("101", SKILL_CONSTRUCTOR),
                    inactive,
                ],
            },
        };

        let data = parse_feed(feed, 3);
        assert_eq!(data.round, 3);
        assert_eq!(data.drivers.len(), 1);
        assert_eq!(data.constructors.len(), 1);
    }

    #[test]
    fn test_round_for_date_upcoming() {
        let races = vec![
            ErgastRace {
                round: "1".to_string(),
                date: "2026-03-08".to_string(),
            },
            ErgastRace {
                round: "2".to_string(),
                date: "2026-03-22".to_string(),
            },
        ];

        let today = "2026-03-10".parse().unwrap();
        assert_eq!(round_for_date(&races, today), 2);
    }

    #[test]
    fn test_round_for_date_rolls_over_on_race_day() {
        let races = vec![
            ErgastRace {
                round: "1".to_string(),
                date: "2026-03-08".to_string(),
            },
            ErgastRace {
                round: "2".to_string(),
                date: "2026-03-22".to_string(),
            },
        ];

        // Round 1 race day: pricing already targets round 2
        let race_day = "2026-03-08".parse().unwrap();
        assert_eq!(round_for_date(&races, race_day), 2);

        let day_before = "2026-03-07".parse().unwrap();
        assert_eq!(round_for_date(&races, day_before), 1);
    }

    #[test]
    fn test_round_for_date_season_over() {
        let races = vec![
            ErgastRace {
                round: "1".to_string(),
                date: "2026-03-08".to_string(),
            },
            ErgastRace {
                round: "24".to_string(),
                date: "2026-12-06".to_string(),
            },
        ];

        let today = "2027-01-01".parse().unwrap();
        assert_eq!(round_for_date(&races, today), 24);
    }

    #[test]
    fn test_round_for_date_empty_calendar() {
        let today = "2026-03-10".parse().unwrap();
        assert_eq!(round_for_date(&[], today), 1);
    }
}
