//! Budget-constrained swap enumeration and ranking.
//!
//! Drivers and constructors run through the same algorithm: take every
//! ordered pair from the eligible set (lap time and price both present),
//! keep pairs where the incoming entity is strictly faster and the price
//! difference fits the budget, then rank by time gained.

use std::cmp::Ordering;

use crate::models::{
    ConstructorAnalysis, ConstructorSwapRecommendation, DriverAnalysis, SwapRecommendation,
};

/// Two time deltas within this band count as tied and fall through to the
/// value-score tie-break.
const TIME_DELTA_TOLERANCE: f64 = 0.01;

/// Price delta at or below this still reads as "similar price" in the reason
const SIMILAR_PRICE_BAND: f64 = 0.5;

/// Anything the swap engine can trade in and out
trait SwapCandidate {
    fn same_entity(&self, other: &Self) -> bool;
    fn display_name(&self) -> &str;
    fn lap_time(&self) -> Option<f64>;
    fn price(&self) -> Option<f64>;
    fn value_score(&self) -> Option<f64>;
}

impl SwapCandidate for DriverAnalysis {
    fn same_entity(&self, other: &Self) -> bool {
        self.driver_number == other.driver_number
    }

    fn display_name(&self) -> &str {
        &self.name_acronym
    }

    fn lap_time(&self) -> Option<f64> {
        self.best_lap_time
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn value_score(&self) -> Option<f64> {
        self.value_score
    }
}

impl SwapCandidate for ConstructorAnalysis {
    fn same_entity(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn lap_time(&self) -> Option<f64> {
        self.best_lap_time
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn value_score(&self) -> Option<f64> {
        self.value_score
    }
}

/// Accepted swap, indices into the input slice
struct Swap {
    out: usize,
    input: usize,
    time_delta: f64,
    price_delta: f64,
    value_score_delta: f64,
    reason: String,
}

fn swap_reason(name: &str, time_delta: f64, price_delta: f64) -> String {
    if price_delta <= 0.0 {
        format!(
            "{} is {:.3}s faster and {:.1}M cheaper",
            name,
            time_delta,
            price_delta.abs()
        )
    } else if price_delta <= SIMILAR_PRICE_BAND {
        format!(
            "{} is {:.3}s faster at similar price (+{:.1}M)",
            name, time_delta, price_delta
        )
    } else {
        format!("{} is {:.3}s faster for +{:.1}M", name, time_delta, price_delta)
    }
}

/// Ranking comparator: time gained descending, with deltas inside the
/// tolerance band tied and broken by value-score delta descending.
///
/// The tolerance check is applied pairwise, so the relation is not transitive
/// for chains of deltas spaced under 0.01s. Kept that way on purpose; do not
/// replace with a derived sort key.
fn rank(a: &Swap, b: &Swap) -> Ordering {
    if (a.time_delta - b.time_delta).abs() > TIME_DELTA_TOLERANCE {
        b.time_delta.total_cmp(&a.time_delta)
    } else {
        b.value_score_delta.total_cmp(&a.value_score_delta)
    }
}

fn enumerate_swaps<T: SwapCandidate>(candidates: &[T], budget: f64) -> Vec<Swap> {
    let eligible: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].lap_time().is_some() && candidates[i].price().is_some())
        .collect();

    let mut swaps = Vec::new();

    for &out in &eligible {
        for &input in &eligible {
            let cand_out = &candidates[out];
            let cand_in = &candidates[input];

            if cand_out.same_entity(cand_in) {
                continue;
            }

            // Eligible set guarantees both values are present
            let (Some(out_lap), Some(in_lap)) = (cand_out.lap_time(), cand_in.lap_time()) else {
                continue;
            };
            let (Some(out_price), Some(in_price)) = (cand_out.price(), cand_in.price()) else {
                continue;
            };

            // Incoming entity must be strictly faster
            if in_lap >= out_lap {
                continue;
            }

            // Positive delta costs budget; negative or zero is always affordable
            let price_delta = in_price - out_price;
            if price_delta > budget {
                continue;
            }

            let time_delta = out_lap - in_lap;
            let value_score_delta =
                cand_in.value_score().unwrap_or(0.0) - cand_out.value_score().unwrap_or(0.0);

            swaps.push(Swap {
                out,
                input,
                time_delta,
                price_delta,
                value_score_delta,
                reason: swap_reason(cand_in.display_name(), time_delta, price_delta),
            });
        }
    }

    swaps.sort_by(rank);
    swaps
}

/// Generate ranked driver swap recommendations within `budget`.
///
/// Pure: identical inputs always yield the identical list. The budget is
/// assumed finite and non-negative; validation belongs to the caller.
pub fn generate_recommendations(
    drivers: &[DriverAnalysis],
    budget: f64,
) -> Vec<SwapRecommendation> {
    enumerate_swaps(drivers, budget)
        .into_iter()
        .map(|s| SwapRecommendation {
            driver_out: drivers[s.out].clone(),
            driver_in: drivers[s.input].clone(),
            time_delta: s.time_delta,
            price_delta: s.price_delta,
            value_score_delta: s.value_score_delta,
            reason: s.reason,
        })
        .collect()
}

/// Generate ranked constructor swap recommendations within `budget`.
pub fn generate_constructor_recommendations(
    constructors: &[ConstructorAnalysis],
    budget: f64,
) -> Vec<ConstructorSwapRecommendation> {
    enumerate_swaps(constructors, budget)
        .into_iter()
        .map(|s| ConstructorSwapRecommendation {
            constructor_out: constructors[s.out].clone(),
            constructor_in: constructors[s.input].clone(),
            time_delta: s.time_delta,
            price_delta: s.price_delta,
            value_score_delta: s.value_score_delta,
            reason: s.reason,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value_score;
    use crate::models::SectorTimes;

    fn driver(number: u8, acronym: &str, lap: Option<f64>, price: Option<f64>) -> DriverAnalysis {
        DriverAnalysis {
            driver_number: number,
            first_name: "Test".to_string(),
            last_name: acronym.to_string(),
            name_acronym: acronym.to_string(),
            team_name: "Team".to_string(),
            team_colour: "FFFFFF".to_string(),
            headshot_url: None,
            best_lap_time: lap,
            best_sectors: SectorTimes::default(),
            top_speed: None,
            lap_count: 20,
            price,
            price_change: None,
            selected_percentage: None,
            overall_points: None,
            value_score: value_score(lap, price),
            session_name: "Practice 2".to_string(),
        }
    }

    fn constructor(name: &str, lap: Option<f64>, price: Option<f64>) -> ConstructorAnalysis {
        ConstructorAnalysis {
            name: name.to_string(),
            team_colour: "FFFFFF".to_string(),
            best_lap_time: lap,
            avg_lap_time: lap,
            drivers: vec![],
            price,
            price_change: None,
            selected_percentage: None,
            overall_points: None,
            value_score: value_score(lap, price),
        }
    }

    #[test]
    fn test_directionality_and_budget() {
        let drivers = vec![
            driver(1, "VER", Some(90.456), Some(30.5)),
            driver(4, "NOR", Some(90.612), Some(26.0)),
            driver(16, "LEC", Some(90.789), Some(25.0)),
            driver(63, "RUS", Some(91.034), Some(22.5)),
        ];

        let budget = 2.0;
        let recs = generate_recommendations(&drivers, budget);
        assert!(!recs.is_empty());

        for rec in &recs {
            assert!(rec.driver_in.best_lap_time.unwrap() < rec.driver_out.best_lap_time.unwrap());
            assert!(rec.time_delta > 0.0);
            assert!(rec.price_delta <= budget);
        }
    }

    #[test]
    fn test_no_self_pairing() {
        let drivers = vec![
            driver(1, "VER", Some(90.456), Some(30.5)),
            driver(4, "NOR", Some(90.612), Some(26.0)),
        ];

        for rec in generate_recommendations(&drivers, 100.0) {
            assert_ne!(rec.driver_out.driver_number, rec.driver_in.driver_number);
        }
    }

    #[test]
    fn test_budget_boundary() {
        let drivers = vec![
            driver(1, "OUT", Some(91.0), Some(30.5)),
            driver(2, "IN", Some(90.5), Some(31.0)),
        ];

        // priceDelta = 0.5, exactly on budget: accepted
        let recs = generate_recommendations(&drivers, 0.5);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].driver_in.name_acronym, "IN");

        // Just under: rejected
        let recs = generate_recommendations(&drivers, 0.4);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_cheaper_swap_always_affordable() {
        let drivers = vec![
            driver(1, "OUT", Some(91.0), Some(30.0)),
            driver(2, "IN", Some(90.0), Some(20.0)),
        ];

        let recs = generate_recommendations(&drivers, 0.0);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].price_delta - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_reason_tiering() {
        assert_eq!(
            swap_reason("LEC", 0.5, -1.0),
            "LEC is 0.500s faster and 1.0M cheaper"
        );
        assert_eq!(
            swap_reason("LEC", 0.5, 0.3),
            "LEC is 0.500s faster at similar price (+0.3M)"
        );
        assert_eq!(swap_reason("LEC", 0.5, 2.0), "LEC is 0.500s faster for +2.0M");
    }

    #[test]
    fn test_reason_zero_delta_reads_cheaper() {
        // priceDelta == 0 falls in the cheaper tier, citing 0.0M savings
        assert_eq!(
            swap_reason("NOR", 0.123, 0.0),
            "NOR is 0.123s faster and 0.0M cheaper"
        );
    }

    #[test]
    fn test_ranking_time_delta_descending() {
        let drivers = vec![
            driver(1, "SLOW", Some(92.0), Some(10.0)),
            driver(2, "MID", Some(91.0), Some(10.0)),
            driver(3, "FAST", Some(90.0), Some(10.0)),
        ];

        let recs = generate_recommendations(&drivers, 5.0);
        // Largest time gain first: SLOW -> FAST (2.0s)
        assert_eq!(recs[0].driver_out.name_acronym, "SLOW");
        assert_eq!(recs[0].driver_in.name_acronym, "FAST");
        for pair in recs.windows(2) {
            // Outside the tolerance band, ordering is strictly by time delta
            if (pair[0].time_delta - pair[1].time_delta).abs() > 0.01 {
                assert!(pair[0].time_delta > pair[1].time_delta);
            }
        }
    }

    #[test]
    fn test_tolerance_band_tie_break() {
        // Two swaps gaining nearly identical time; value score decides
        let drivers = vec![
            driver(1, "OUT1", Some(91.000), Some(20.0)),
            driver(2, "IN1", Some(90.500), Some(19.0)),
            driver(3, "OUT2", Some(91.004), Some(20.0)),
            driver(4, "IN2", Some(90.499), Some(5.0)),
        ];

        let recs = generate_recommendations(&drivers, 0.0);
        let top = &recs[0];
        // IN2 is far cheaper so its value score delta dominates the tie
        assert_eq!(top.driver_in.name_acronym, "IN2");
    }

    #[test]
    fn test_ineligible_entries_excluded() {
        let drivers = vec![
            driver(1, "NOLAP", None, Some(30.0)),
            driver(2, "NOPRICE", Some(90.0), None),
            driver(3, "OK1", Some(91.0), Some(20.0)),
            driver(4, "OK2", Some(90.5), Some(19.0)),
        ];

        let recs = generate_recommendations(&drivers, 10.0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].driver_out.name_acronym, "OK1");
        assert_eq!(recs[0].driver_in.name_acronym, "OK2");
    }

    #[test]
    fn test_idempotence() {
        let drivers = vec![
            driver(1, "VER", Some(90.456), Some(30.5)),
            driver(4, "NOR", Some(90.612), Some(26.0)),
            driver(16, "LEC", Some(90.789), Some(25.0)),
            driver(63, "RUS", Some(91.034), Some(22.5)),
            driver(81, "PIA", Some(91.201), Some(21.0)),
        ];

        let a = generate_recommendations(&drivers, 3.0);
        let b = generate_recommendations(&drivers, 3.0);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.driver_out.driver_number, y.driver_out.driver_number);
            assert_eq!(x.driver_in.driver_number, y.driver_in.driver_number);
            assert_eq!(x.reason, y.reason);
        }
    }

    #[test]
    fn test_constructor_variant() {
        let constructors = vec![
            constructor("Red Bull Racing", Some(90.456), Some(32.0)),
            constructor("McLaren", Some(90.612), Some(28.5)),
            constructor("Kick Sauber", Some(92.123), Some(8.0)),
        ];

        let recs = generate_constructor_recommendations(&constructors, 0.0);
        assert!(!recs.is_empty());
        for rec in &recs {
            assert_ne!(rec.constructor_out.name, rec.constructor_in.name);
            assert!(rec.time_delta > 0.0);
            assert!(rec.price_delta <= 0.0);
            assert!(rec.reason.contains("faster"));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_recommendations(&[], 10.0).is_empty());
        assert!(generate_constructor_recommendations(&[], 10.0).is_empty());
    }
}
