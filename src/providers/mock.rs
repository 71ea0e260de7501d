//! Offline fixture data implementing both provider traits.
//!
//! Used when `USE_MOCK_DATA=1` (server) or `--mock` (CLI) is set, and by
//! tests that need a full grid without network access. The fixture covers a
//! 20-driver field across 10 teams plus matching fantasy pricing.

use super::{index_constructors, index_drivers, FetchError, PricingProvider, TelemetryProvider};
use crate::models::{
    Driver, DriverPerformance, FantasyConstructor, FantasyData, FantasyDriver, Meeting,
    SectorTimes, Session,
};
use std::collections::HashMap;

const SESSION_NAME: &str = "Practice 2";

struct MockDriver {
    number: u8,
    first: &'static str,
    last: &'static str,
    acronym: &'static str,
    team: &'static str,
    colour: &'static str,
    lap: f64,
    sectors: (f64, f64, f64),
    top_speed: f64,
    lap_count: u32,
    price: f64,
    price_change: f64,
    selected: f64,
    points: f64,
}

const MOCK_DRIVERS: &[MockDriver] = &[
    MockDriver { number: 1, first: "Max", last: "Verstappen", acronym: "VER", team: "Red Bull Racing", colour: "3671C6", lap: 90.456, sectors: (28.812, 33.201, 28.443), top_speed: 328.0, lap_count: 24, price: 30.5, price_change: 0.3, selected: 62.1, points: 187.0 },
    MockDriver { number: 4, first: "Lando", last: "Norris", acronym: "NOR", team: "McLaren", colour: "FF8000", lap: 90.612, sectors: (28.901, 33.198, 28.513), top_speed: 331.0, lap_count: 27, price: 26.0, price_change: 0.5, selected: 48.3, points: 156.0 },
    MockDriver { number: 16, first: "Charles", last: "Leclerc", acronym: "LEC", team: "Ferrari", colour: "E8002D", lap: 90.789, sectors: (28.956, 33.312, 28.521), top_speed: 330.0, lap_count: 22, price: 25.0, price_change: -0.2, selected: 41.7, points: 143.0 },
    MockDriver { number: 44, first: "Lewis", last: "Hamilton", acronym: "HAM", team: "Ferrari", colour: "E8002D", lap: 90.923, sectors: (29.012, 33.389, 28.522), top_speed: 329.0, lap_count: 25, price: 27.0, price_change: -0.5, selected: 38.9, points: 134.0 },
    MockDriver { number: 63, first: "George", last: "Russell", acronym: "RUS", team: "Mercedes", colour: "27F4D2", lap: 91.034, sectors: (29.102, 33.456, 28.476), top_speed: 327.0, lap_count: 26, price: 22.5, price_change: 0.0, selected: 35.2, points: 128.0 },
    MockDriver { number: 81, first: "Oscar", last: "Piastri", acronym: "PIA", team: "McLaren", colour: "FF8000", lap: 91.201, sectors: (29.189, 33.498, 28.514), top_speed: 330.0, lap_count: 23, price: 21.0, price_change: 0.8, selected: 33.1, points: 119.0 },
    MockDriver { number: 14, first: "Fernando", last: "Alonso", acronym: "ALO", team: "Aston Martin", colour: "229971", lap: 91.345, sectors: (29.234, 33.567, 28.544), top_speed: 325.0, lap_count: 28, price: 18.5, price_change: -0.3, selected: 22.4, points: 98.0 },
    MockDriver { number: 12, first: "Andrea Kimi", last: "Antonelli", acronym: "ANT", team: "Mercedes", colour: "27F4D2", lap: 91.456, sectors: (29.278, 33.601, 28.577), top_speed: 326.0, lap_count: 20, price: 15.0, price_change: 0.4, selected: 19.8, points: 76.0 },
    MockDriver { number: 30, first: "Liam", last: "Lawson", acronym: "LAW", team: "Red Bull Racing", colour: "3671C6", lap: 91.567, sectors: (29.345, 33.612, 28.610), top_speed: 326.0, lap_count: 21, price: 14.0, price_change: 0.2, selected: 18.6, points: 72.0 },
    MockDriver { number: 10, first: "Pierre", last: "Gasly", acronym: "GAS", team: "Alpine", colour: "FF87BC", lap: 91.678, sectors: (29.401, 33.689, 28.588), top_speed: 324.0, lap_count: 25, price: 13.5, price_change: 0.0, selected: 15.3, points: 64.0 },
    MockDriver { number: 22, first: "Yuki", last: "Tsunoda", acronym: "TSU", team: "RB", colour: "6692FF", lap: 91.712, sectors: (29.423, 33.701, 28.588), top_speed: 325.0, lap_count: 26, price: 12.0, price_change: 0.1, selected: 14.2, points: 58.0 },
    MockDriver { number: 18, first: "Lance", last: "Stroll", acronym: "STR", team: "Aston Martin", colour: "229971", lap: 91.890, sectors: (29.501, 33.745, 28.644), top_speed: 323.0, lap_count: 22, price: 11.0, price_change: -0.2, selected: 10.5, points: 45.0 },
    MockDriver { number: 55, first: "Carlos", last: "Sainz", acronym: "SAI", team: "Williams", colour: "64C4FF", lap: 91.956, sectors: (29.512, 33.789, 28.655), top_speed: 322.0, lap_count: 24, price: 16.5, price_change: -0.4, selected: 21.0, points: 87.0 },
    MockDriver { number: 31, first: "Esteban", last: "Ocon", acronym: "OCO", team: "Haas", colour: "B6BABD", lap: 92.012, sectors: (29.534, 33.801, 28.677), top_speed: 324.0, lap_count: 23, price: 10.5, price_change: 0.0, selected: 9.8, points: 41.0 },
    MockDriver { number: 27, first: "Nico", last: "Huelkenberg", acronym: "HUL", team: "Kick Sauber", colour: "52E252", lap: 92.123, sectors: (29.556, 33.834, 28.733), top_speed: 321.0, lap_count: 24, price: 9.0, price_change: -0.3, selected: 8.4, points: 35.0 },
    MockDriver { number: 20, first: "Isack", last: "Hadjar", acronym: "HAD", team: "RB", colour: "6692FF", lap: 92.134, sectors: (29.567, 33.823, 28.744), top_speed: 323.0, lap_count: 19, price: 8.5, price_change: 0.0, selected: 8.7, points: 32.0 },
    MockDriver { number: 87, first: "Oliver", last: "Bearman", acronym: "BEA", team: "Haas", colour: "B6BABD", lap: 92.289, sectors: (29.612, 33.878, 28.799), top_speed: 322.0, lap_count: 20, price: 8.0, price_change: 0.2, selected: 7.1, points: 27.0 },
    MockDriver { number: 7, first: "Jack", last: "Doohan", acronym: "DOO", team: "Alpine", colour: "FF87BC", lap: 92.345, sectors: (29.634, 33.889, 28.822), top_speed: 323.0, lap_count: 18, price: 7.5, price_change: 0.0, selected: 6.2, points: 22.0 },
    MockDriver { number: 2, first: "Logan", last: "Sargeant", acronym: "SAR", team: "Williams", colour: "64C4FF", lap: 92.456, sectors: (29.678, 33.912, 28.866), top_speed: 321.0, lap_count: 21, price: 7.0, price_change: -0.1, selected: 5.3, points: 18.0 },
    MockDriver { number: 5, first: "Gabriel", last: "Bortoleto", acronym: "BOR", team: "Kick Sauber", colour: "52E252", lap: 92.567, sectors: (29.712, 33.945, 28.910), top_speed: 320.0, lap_count: 17, price: 6.5, price_change: 0.0, selected: 4.8, points: 15.0 },
];

/// name, colour, price, price_change, selected, points
const MOCK_CONSTRUCTORS: &[(&str, &str, f64, f64, f64, f64)] = &[
    ("Red Bull Racing", "3671C6", 32.0, 0.5, 55.2, 245.0),
    ("McLaren", "FF8000", 28.5, 0.8, 47.8, 218.0),
    ("Ferrari", "E8002D", 30.0, -0.3, 43.1, 201.0),
    ("Mercedes", "27F4D2", 24.0, 0.2, 36.4, 172.0),
    ("Aston Martin", "229971", 18.0, -0.2, 19.5, 112.0),
    ("Alpine", "FF87BC", 12.5, 0.0, 11.3, 65.0),
    ("RB", "6692FF", 11.0, 0.1, 10.1, 58.0),
    ("Williams", "64C4FF", 14.0, -0.3, 13.7, 78.0),
    ("Haas", "B6BABD", 9.5, 0.1, 7.9, 42.0),
    ("Kick Sauber", "52E252", 8.0, -0.1, 5.6, 31.0),
];

/// Fixture provider for offline mode and tests
#[derive(Debug, Default, Clone)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn meeting() -> Meeting {
        Meeting {
            meeting_key: 9999,
            meeting_name: "Bahrain Grand Prix".to_string(),
            meeting_official_name: "Formula 1 Gulf Air Bahrain Grand Prix 2026".to_string(),
            date_start: "2026-03-06".to_string(),
            year: 2026,
            country_name: "Bahrain".to_string(),
            circuit_short_name: "Sakhir".to_string(),
        }
    }

    fn sessions() -> Vec<Session> {
        let times = [
            (9001, "Practice 1", "2026-03-06T11:30:00", "2026-03-06T12:30:00"),
            (9002, "Practice 2", "2026-03-06T15:00:00", "2026-03-06T16:00:00"),
            (9003, "Practice 3", "2026-03-07T12:30:00", "2026-03-07T13:30:00"),
        ];

        times
            .into_iter()
            .map(|(key, name, start, end)| Session {
                session_key: key,
                session_name: name.to_string(),
                session_type: "Practice".to_string(),
                date_start: start.to_string(),
                date_end: end.to_string(),
                meeting_key: 9999,
                year: 2026,
                country_name: "Bahrain".to_string(),
                circuit_short_name: "Sakhir".to_string(),
            })
            .collect()
    }

    fn performances(session_key: u32) -> Vec<DriverPerformance> {
        MOCK_DRIVERS
            .iter()
            .map(|d| DriverPerformance {
                driver: Driver {
                    driver_number: d.number,
                    first_name: d.first.to_string(),
                    last_name: d.last.to_string(),
                    full_name: format!("{} {}", d.first, d.last),
                    name_acronym: d.acronym.to_string(),
                    team_name: d.team.to_string(),
                    team_colour: d.colour.to_string(),
                    country_code: "".to_string(),
                    headshot_url: None,
                    session_key,
                },
                best_lap_time: Some(d.lap),
                best_sectors: SectorTimes {
                    sector1: Some(d.sectors.0),
                    sector2: Some(d.sectors.1),
                    sector3: Some(d.sectors.2),
                },
                top_speed: Some(d.top_speed),
                lap_count: d.lap_count,
                session_name: SESSION_NAME.to_string(),
            })
            .collect()
    }

    fn pricing() -> FantasyData {
        let drivers = MOCK_DRIVERS
            .iter()
            .enumerate()
            .map(|(i, d)| FantasyDriver {
                id: i as u32 + 1,
                first_name: d.first.to_string(),
                last_name: d.last.to_string(),
                team_name: d.team.to_string(),
                price: d.price,
                selected_percentage: d.selected,
                overall_points: d.points,
                gameday_points: 0.0,
                price_change: d.price_change,
            })
            .collect();

        let constructors = MOCK_CONSTRUCTORS
            .iter()
            .enumerate()
            .map(
                |(i, (name, _colour, price, price_change, selected, points))| FantasyConstructor {
                    id: 100 + i as u32,
                    name: name.to_string(),
                    price: *price,
                    selected_percentage: *selected,
                    overall_points: *points,
                    gameday_points: 0.0,
                    price_change: *price_change,
                },
            )
            .collect();

        FantasyData {
            drivers,
            constructors,
            round: 1,
        }
    }
}

impl TelemetryProvider for MockProvider {
    async fn latest_meeting(&self) -> Result<Option<Meeting>, FetchError> {
        Ok(Some(Self::meeting()))
    }

    async fn practice_sessions(&self, _meeting_key: u32) -> Result<Vec<Session>, FetchError> {
        Ok(Self::sessions())
    }

    async fn driver_performances(
        &self,
        session_key: u32,
    ) -> Result<Vec<DriverPerformance>, FetchError> {
        Ok(Self::performances(session_key))
    }
}

impl PricingProvider for MockProvider {
    async fn fantasy_data(&self) -> Result<FantasyData, FetchError> {
        Ok(Self::pricing())
    }

    async fn driver_price_index(&self) -> Result<HashMap<String, FantasyDriver>, FetchError> {
        Ok(index_drivers(&Self::pricing()))
    }

    async fn constructor_price_index(
        &self,
    ) -> Result<HashMap<String, FantasyConstructor>, FetchError> {
        Ok(index_constructors(&Self::pricing()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_grid() {
        let mock = MockProvider::new();
        let performances = mock.driver_performances(9002).await.unwrap();
        assert_eq!(performances.len(), 20);

        let data = mock.fantasy_data().await.unwrap();
        assert_eq!(data.drivers.len(), 20);
        assert_eq!(data.constructors.len(), 10);
    }

    #[tokio::test]
    async fn test_three_practice_sessions_in_order() {
        let mock = MockProvider::new();
        let sessions = mock.practice_sessions(9999).await.unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions.last().unwrap().session_name, "Practice 3");
    }

    #[tokio::test]
    async fn test_driver_index_contains_verstappen() {
        let mock = MockProvider::new();
        let index = mock.driver_price_index().await.unwrap();
        let max = index.get("VERSTAPPEN").unwrap();
        assert!((max.price - 30.5).abs() < 1e-9);
    }
}
