//! Analysis and recommendation core

pub mod analyzer;
pub mod matcher;
pub mod recommender;
pub mod value;

// Re-export commonly used functions
pub use analyzer::{analyze_constructors, analyze_drivers, build_driver_analysis};
pub use matcher::{match_constructor, match_driver};
pub use recommender::{generate_constructor_recommendations, generate_recommendations};
pub use value::value_score;
