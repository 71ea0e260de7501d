use serde::{Deserialize, Serialize};

/// Race weekend grouping multiple sessions (OpenF1 "meeting")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub meeting_key: u32,
    pub meeting_name: String,
    pub meeting_official_name: String,
    pub date_start: String,
    pub year: u16,
    pub country_name: String,
    pub circuit_short_name: String,
}

/// Single timed on-track activity within a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_key: u32,
    pub session_name: String,
    pub session_type: String,
    pub date_start: String,
    pub date_end: String,
    pub meeting_key: u32,
    pub year: u16,
    pub country_name: String,
    pub circuit_short_name: String,
}

/// One completed lap's timing/speed data for one driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lap {
    pub session_key: u32,
    pub driver_number: u8,
    pub lap_number: u32,
    pub lap_duration: Option<f64>,
    pub duration_sector_1: Option<f64>,
    pub duration_sector_2: Option<f64>,
    pub duration_sector_3: Option<f64>,
    pub i1_speed: Option<f64>,
    pub i2_speed: Option<f64>,
    pub st_speed: Option<f64>,
    pub is_pit_out_lap: bool,
    pub date_start: Option<String>,
}

/// Driver identity for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub driver_number: u8,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub name_acronym: String,
    pub team_name: String,
    pub team_colour: String,
    pub country_code: String,
    pub headshot_url: Option<String>,
    pub session_key: u32,
}

/// Best sector times over a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorTimes {
    pub sector1: Option<f64>,
    pub sector2: Option<f64>,
    pub sector3: Option<f64>,
}

/// Per-driver session performance derived from lap data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverPerformance {
    pub driver: Driver,
    pub best_lap_time: Option<f64>,
    pub best_sectors: SectorTimes,
    pub top_speed: Option<f64>,
    pub lap_count: u32,
    pub session_name: String,
}

/// Fantasy driver price record for the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FantasyDriver {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub team_name: String,
    pub price: f64,
    pub selected_percentage: f64,
    pub overall_points: f64,
    pub gameday_points: f64,
    pub price_change: f64,
}

/// Fantasy constructor price record for the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FantasyConstructor {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub selected_percentage: f64,
    pub overall_points: f64,
    pub gameday_points: f64,
    pub price_change: f64,
}

/// Full fantasy pricing snapshot for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FantasyData {
    pub drivers: Vec<FantasyDriver>,
    pub constructors: Vec<FantasyConstructor>,
    pub round: u32,
}

/// Unified per-driver analysis: telemetry performance joined with pricing.
///
/// Price fields are absent when no fantasy record matched; `value_score` is
/// present only when both `best_lap_time` and a non-zero `price` are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverAnalysis {
    pub driver_number: u8,
    pub first_name: String,
    pub last_name: String,
    pub name_acronym: String,
    pub team_name: String,
    pub team_colour: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headshot_url: Option<String>,
    pub best_lap_time: Option<f64>,
    pub best_sectors: SectorTimes,
    pub top_speed: Option<f64>,
    pub lap_count: u32,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub selected_percentage: Option<f64>,
    pub overall_points: Option<f64>,
    pub value_score: Option<f64>,
    pub session_name: String,
}

/// Team-level aggregate over driver analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorAnalysis {
    pub name: String,
    pub team_colour: String,
    pub best_lap_time: Option<f64>,
    pub avg_lap_time: Option<f64>,
    /// Member driver acronyms, in input order
    pub drivers: Vec<String>,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub selected_percentage: Option<f64>,
    pub overall_points: Option<f64>,
    pub value_score: Option<f64>,
}

/// Recommended driver swap within budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRecommendation {
    pub driver_out: DriverAnalysis,
    pub driver_in: DriverAnalysis,
    pub time_delta: f64,
    pub price_delta: f64,
    pub value_score_delta: f64,
    pub reason: String,
}

/// Recommended constructor swap within budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorSwapRecommendation {
    pub constructor_out: ConstructorAnalysis,
    pub constructor_in: ConstructorAnalysis,
    pub time_delta: f64,
    pub price_delta: f64,
    pub value_score_delta: f64,
    pub reason: String,
}

/// Drivers endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct DriversResponse {
    pub drivers: Vec<DriverAnalysis>,
}

/// Sessions endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub meeting: Meeting,
    pub sessions: Vec<Session>,
}

/// Recommendations endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub budget: f64,
    pub recommendations: Vec<SwapRecommendation>,
    pub constructor_recommendations: Vec<ConstructorSwapRecommendation>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mock_data: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(headshot_url: Option<String>) -> DriverAnalysis {
        DriverAnalysis {
            driver_number: 16,
            first_name: "Charles".to_string(),
            last_name: "Leclerc".to_string(),
            name_acronym: "LEC".to_string(),
            team_name: "Ferrari".to_string(),
            team_colour: "E8002D".to_string(),
            headshot_url,
            best_lap_time: Some(90.789),
            best_sectors: SectorTimes::default(),
            top_speed: Some(332.0),
            lap_count: 24,
            price: Some(25.0),
            price_change: Some(-0.2),
            selected_percentage: Some(41.7),
            overall_points: Some(143.0),
            value_score: Some(0.4406),
            session_name: "Practice 2".to_string(),
        }
    }

    #[test]
    fn test_driver_analysis_omits_absent_headshot() {
        let json = serde_json::to_value(analysis(None)).unwrap();
        assert!(json.get("headshot_url").is_none());
        // Other absent fields stay as explicit nulls
        let no_price = DriverAnalysis {
            price: None,
            ..analysis(None)
        };
        let json = serde_json::to_value(no_price).unwrap();
        assert_eq!(json["price"], serde_json::Value::Null);
    }

    #[test]
    fn test_driver_analysis_serializes_present_headshot() {
        let url = "https://example.com/lec.png".to_string();
        let json = serde_json::to_value(analysis(Some(url.clone()))).unwrap();
        assert_eq!(json["headshot_url"], serde_json::Value::String(url));
        assert_eq!(json["name_acronym"], "LEC");
    }

    #[test]
    fn test_recommendations_response_round_trip() {
        let response = RecommendationsResponse {
            budget: 2.5,
            recommendations: vec![SwapRecommendation {
                driver_out: analysis(None),
                driver_in: analysis(None),
                time_delta: 0.345,
                price_delta: -1.0,
                value_score_delta: 0.02,
                reason: "LEC is 0.345s faster and 1.0M cheaper".to_string(),
            }],
            constructor_recommendations: Vec::new(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let back: RecommendationsResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(back.budget, 2.5);
        assert_eq!(back.recommendations.len(), 1);
        assert_eq!(back.recommendations[0].reason, response.recommendations[0].reason);
        assert!(back.constructor_recommendations.is_empty());
    }
}
