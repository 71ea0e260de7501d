//! Value score: lap pace per unit of fantasy price.
//!
//! The score inverts lap time so faster laps score higher, then divides by
//! price so cheaper entries score higher:
//!
//! ```text
//! score = (1 / lap_time) * 1000 / price
//! ```
//!
//! Higher = better value.

/// Compute the value score for a lap time (seconds) and price (millions).
///
/// Returns `None` when either input is absent or the price is zero.
///
/// # Examples
/// ```
/// use gridvalue::core::value_score;
/// let score = value_score(Some(90.0), Some(25.0)).unwrap();
/// assert!((score - 0.4444).abs() < 0.001);
/// assert_eq!(value_score(None, Some(25.0)), None);
/// ```
pub fn value_score(lap_time: Option<f64>, price: Option<f64>) -> Option<f64> {
    let lap_time = lap_time?;
    let price = price?;

    if price == 0.0 {
        return None;
    }

    Some((1.0 / lap_time) * 1000.0 / price)
}
