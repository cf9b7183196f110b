//! Rating aggregation

use super::McpRating;

/// Lowest accepted rating value
pub const MIN_RATING: f64 = 1.0;

/// Highest accepted rating value
pub const MAX_RATING: f64 = 5.0;

/// Arithmetic mean of the ratings, rounded to one decimal.
///
/// An MCP without ratings averages to `0.0`.
pub fn average_rating(ratings: &[McpRating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|r| r.value).sum();
    let mean = sum / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}
