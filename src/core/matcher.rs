//! Matching telemetry identities to fantasy price records.
//!
//! The two feeds share no stable identifier, so drivers are joined on
//! upper-cased last name and constructors on team name. Matching is exact
//! case-insensitive equality with narrow fallbacks; no fuzzy matching.

use std::collections::HashMap;

use crate::models::{DriverPerformance, FantasyConstructor, FantasyDriver};

/// Resolve the fantasy price record for a driver performance.
///
/// Primary path: exact lookup of the upper-cased last name against the index
/// key. Fallback: linear scan comparing upper-cased last names, which covers
/// indexes keyed under a different variant of the name.
pub fn match_driver<'a>(
    performance: &DriverPerformance,
    index: &'a HashMap<String, FantasyDriver>,
) -> Option<&'a FantasyDriver> {
    let last_name = performance.driver.last_name.to_uppercase();

    if let Some(driver) = index.get(&last_name) {
        return Some(driver);
    }

    index
        .values()
        .find(|fd| fd.last_name.to_uppercase() == last_name)
}

/// Resolve the fantasy price record for a team name.
///
/// Primary path: exact upper-cased name lookup. Fallback: bidirectional
/// case-insensitive substring containment, which covers abbreviated vs full
/// team names ("Red Bull" vs "Red Bull Racing"). When several records satisfy
/// containment the first one in index iteration order wins; `HashMap`
/// iteration order is unspecified, so that pick is not deterministic.
pub fn match_constructor<'a>(
    team_name: &str,
    index: &'a HashMap<String, FantasyConstructor>,
) -> Option<&'a FantasyConstructor> {
    let upper = team_name.to_uppercase();

    if let Some(constructor) = index.get(&upper) {
        return Some(constructor);
    }

    index.values().find(|fc| {
        let name = fc.name.to_uppercase();
        upper.contains(&name) || name.contains(&upper)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, DriverPerformance, SectorTimes};

    fn performance(last_name: &str) -> DriverPerformance {
        DriverPerformance {
            driver: Driver {
                driver_number: 1,
                first_name: "Max".to_string(),
                last_name: last_name.to_string(),
                full_name: format!("Max {}", last_name),
                name_acronym: "VER".to_string(),
                team_name: "Red Bull Racing".to_string(),
                team_colour: "3671C6".to_string(),
                country_code: "NED".to_string(),
                headshot_url: None,
                session_key: 9002,
            },
            best_lap_time: Some(90.456),
            best_sectors: SectorTimes::default(),
            top_speed: Some(328.0),
            lap_count: 24,
            session_name: "Practice 2".to_string(),
        }
    }

    fn fantasy_driver(last_name: &str) -> FantasyDriver {
        FantasyDriver {
            id: 1,
            first_name: "Max".to_string(),
            last_name: last_name.to_string(),
            team_name: "Red Bull Racing".to_string(),
            price: 30.5,
            selected_percentage: 62.1,
            overall_points: 187.0,
            gameday_points: 0.0,
            price_change: 0.3,
        }
    }

    fn constructor(name: &str) -> FantasyConstructor {
        FantasyConstructor {
            id: 100,
            name: name.to_string(),
            price: 32.0,
            selected_percentage: 55.2,
            overall_points: 245.0,
            gameday_points: 0.0,
            price_change: 0.5,
        }
    }

    #[test]
    fn test_driver_exact_key_match() {
        let mut index = HashMap::new();
        index.insert("VERSTAPPEN".to_string(), fantasy_driver("Verstappen"));

        let matched = match_driver(&performance("Verstappen"), &index).unwrap();
        assert_eq!(matched.price, 30.5);
    }

    #[test]
    fn test_driver_fallback_scan() {
        // Index keyed by something other than the upper-cased last name
        let mut index = HashMap::new();
        index.insert("M. VERSTAPPEN".to_string(), fantasy_driver("Verstappen"));

        let matched = match_driver(&performance("VERSTAPPEN"), &index);
        assert!(matched.is_some());
    }

    #[test]
    fn test_driver_no_match() {
        let mut index = HashMap::new();
        index.insert("NORRIS".to_string(), fantasy_driver("Norris"));

        assert!(match_driver(&performance("Verstappen"), &index).is_none());
    }

    #[test]
    fn test_constructor_exact_match() {
        let mut index = HashMap::new();
        index.insert("MCLAREN".to_string(), constructor("McLaren"));

        let matched = match_constructor("McLaren", &index).unwrap();
        assert_eq!(matched.name, "McLaren");
    }

    #[test]
    fn test_constructor_substring_abbreviated() {
        // Telemetry says "Red Bull Racing", fantasy feed says "Red Bull"
        let mut index = HashMap::new();
        index.insert("RED BULL".to_string(), constructor("Red Bull"));

        assert!(match_constructor("Red Bull Racing", &index).is_some());
    }

    #[test]
    fn test_constructor_substring_full() {
        // Reverse direction: telemetry abbreviated, feed full
        let mut index = HashMap::new();
        index.insert(
            "RED BULL RACING".to_string(),
            constructor("Red Bull Racing"),
        );

        assert!(match_constructor("Red Bull", &index).is_some());
    }

    #[test]
    fn test_constructor_no_match() {
        let mut index = HashMap::new();
        index.insert("FERRARI".to_string(), constructor("Ferrari"));

        assert!(match_constructor("Williams", &index).is_none());
    }
}
