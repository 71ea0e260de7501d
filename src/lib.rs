//! Gridvalue - F1 fantasy value analyzer
//!
//! This library provides:
//! - Per-driver session analysis joining OpenF1 telemetry with fantasy pricing
//! - Constructor (team) aggregation over driver analyses
//! - Budget-constrained swap recommendations for drivers and constructors
//! - Upstream clients with TTL response caching, plus offline mock fixtures
//!
//! # Example
//!
//! ```no_run
//! use gridvalue::core::{analyze_drivers, generate_recommendations};
//! use gridvalue::providers::MockProvider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = MockProvider::new();
//!
//!     // Analyze the latest practice session and look for swaps under 2.5M
//!     let drivers = analyze_drivers(&provider, &provider, None).await?;
//!     let recommendations = generate_recommendations(&drivers, 2.5);
//!     println!("{} candidate swaps", recommendations.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod core;
pub mod error;
pub mod models;
pub mod providers;

// Re-export commonly used types
pub use crate::core::{
    analyze_constructors, analyze_drivers, generate_constructor_recommendations,
    generate_recommendations,
};
pub use models::{
    ConstructorAnalysis, ConstructorSwapRecommendation, DriverAnalysis, DriverPerformance,
    FantasyConstructor, FantasyData, FantasyDriver, Meeting, Session, SwapRecommendation,
};
pub use providers::{FetchError, MockProvider, PricingProvider, TelemetryProvider};
