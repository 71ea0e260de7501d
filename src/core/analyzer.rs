//! Driver and constructor analysis pipeline.
//!
//! Joins one session's telemetry performance records with the current fantasy
//! pricing round, derives value scores, and aggregates team-level analyses.

use std::cmp::Ordering;

use crate::core::matcher::{match_constructor, match_driver};
use crate::core::value::value_score;
use crate::models::{ConstructorAnalysis, DriverAnalysis, DriverPerformance, FantasyDriver};
use crate::providers::{FetchError, PricingProvider, TelemetryProvider};

/// Merge a performance record with its matched price record.
///
/// Pure field mapping; a missing price match degrades to absent price fields.
pub fn build_driver_analysis(
    performance: &DriverPerformance,
    fantasy: Option<&FantasyDriver>,
) -> DriverAnalysis {
    let best_lap_time = performance.best_lap_time;

    DriverAnalysis {
        driver_number: performance.driver.driver_number,
        first_name: performance.driver.first_name.clone(),
        last_name: performance.driver.last_name.clone(),
        name_acronym: performance.driver.name_acronym.clone(),
        team_name: performance.driver.team_name.clone(),
        team_colour: performance.driver.team_colour.clone(),
        headshot_url: performance.driver.headshot_url.clone(),
        best_lap_time,
        best_sectors: performance.best_sectors.clone(),
        top_speed: performance.top_speed,
        lap_count: performance.lap_count,
        price: fantasy.map(|f| f.price),
        price_change: fantasy.map(|f| f.price_change),
        selected_percentage: fantasy.map(|f| f.selected_percentage),
        overall_points: fantasy.map(|f| f.overall_points),
        value_score: value_score(best_lap_time, fantasy.map(|f| f.price)),
        session_name: performance.session_name.clone(),
    }
}

/// Ascending by lap time, entries without a lap time last
fn lap_time_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// Analyze all drivers for a session.
///
/// With no `session_key`, resolves the latest meeting and takes its
/// chronologically last practice session; no meeting or no sessions is a
/// valid off-season state and yields an empty list. Telemetry and pricing
/// are fetched concurrently; either failure propagates as [`FetchError`].
pub async fn analyze_drivers<T, P>(
    telemetry: &T,
    pricing: &P,
    session_key: Option<u32>,
) -> Result<Vec<DriverAnalysis>, FetchError>
where
    T: TelemetryProvider,
    P: PricingProvider,
{
    let session_key = match session_key {
        Some(key) => key,
        None => {
            let Some(meeting) = telemetry.latest_meeting().await? else {
                return Ok(Vec::new());
            };
            let sessions = telemetry.practice_sessions(meeting.meeting_key).await?;
            let Some(latest) = sessions.last() else {
                return Ok(Vec::new());
            };
            latest.session_key
        }
    };

    let (performances, price_index) = tokio::try_join!(
        telemetry.driver_performances(session_key),
        pricing.driver_price_index(),
    )?;

    let mut analyses: Vec<DriverAnalysis> = performances
        .iter()
        .map(|p| build_driver_analysis(p, match_driver(p, &price_index)))
        .collect();

    analyses.sort_by(|a, b| lap_time_order(a.best_lap_time, b.best_lap_time));

    Ok(analyses)
}

/// Aggregate driver analyses into per-team constructor analyses.
///
/// Groups by exact team name (the telemetry feed is internally consistent),
/// takes best/average lap over members with a lap time, and joins the
/// constructor price index independently of the driver one.
pub async fn analyze_constructors<P>(
    drivers: &[DriverAnalysis],
    pricing: &P,
) -> Result<Vec<ConstructorAnalysis>, FetchError>
where
    P: PricingProvider,
{
    let price_index = pricing.constructor_price_index().await?;

    // Group in first-appearance order
    let mut groups: Vec<(&str, Vec<&DriverAnalysis>)> = Vec::new();
    for driver in drivers {
        match groups.iter().position(|(name, _)| *name == driver.team_name) {
            Some(i) => groups[i].1.push(driver),
            None => groups.push((driver.team_name.as_str(), vec![driver])),
        }
    }

    let mut analyses: Vec<ConstructorAnalysis> = groups
        .into_iter()
        .map(|(name, members)| {
            let laps: Vec<f64> = members.iter().filter_map(|d| d.best_lap_time).collect();
            let best_lap_time = laps.iter().copied().reduce(f64::min);
            let avg_lap_time = if laps.is_empty() {
                None
            } else {
                Some(laps.iter().sum::<f64>() / laps.len() as f64)
            };

            let fantasy = match_constructor(name, &price_index);

            ConstructorAnalysis {
                name: name.to_string(),
                // Colour assumed consistent within a team; take the first member's
                team_colour: members[0].team_colour.clone(),
                best_lap_time,
                avg_lap_time,
                drivers: members.iter().map(|d| d.name_acronym.clone()).collect(),
                price: fantasy.map(|f| f.price),
                price_change: fantasy.map(|f| f.price_change),
                selected_percentage: fantasy.map(|f| f.selected_percentage),
                overall_points: fantasy.map(|f| f.overall_points),
                value_score: value_score(best_lap_time, fantasy.map(|f| f.price)),
            }
        })
        .collect();

    analyses.sort_by(|a, b| lap_time_order(a.best_lap_time, b.best_lap_time));

    Ok(analyses)
}
