//! Upstream data providers: telemetry (OpenF1) and fantasy pricing.
//!
//! The analysis core only sees these two traits; the live HTTP clients and
//! the offline mock fixtures both implement them.

mod fantasy;
mod mock;
mod openf1;

pub use fantasy::{FantasyClient, FantasyConfig};
pub use mock::MockProvider;
pub use openf1::{OpenF1Client, OpenF1Config};

use std::collections::HashMap;
use thiserror::Error;

use crate::models::{
    DriverPerformance, FantasyConstructor, FantasyData, FantasyDriver, Meeting, Session,
};

/// Upstream fetch errors. Never retried by the analysis core; the caller
/// owns retry/backoff policy.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to parse upstream payload: {0}")]
    Parse(String),
}

/// Telemetry collaborator: meetings, sessions and per-driver performance
pub trait TelemetryProvider {
    /// Most recent meeting of the season, if any
    fn latest_meeting(&self) -> impl std::future::Future<Output = Result<Option<Meeting>, FetchError>> + Send;

    /// Practice sessions for a meeting, in upstream (chronological) order
    fn practice_sessions(
        &self,
        meeting_key: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, FetchError>> + Send;

    /// Per-driver performance records for a session
    fn driver_performances(
        &self,
        session_key: u32,
    ) -> impl std::future::Future<Output = Result<Vec<DriverPerformance>, FetchError>> + Send;
}

/// Pricing collaborator: fantasy feed for the current round
pub trait PricingProvider {
    /// Full pricing snapshot (drivers + constructors + round)
    fn fantasy_data(&self) -> impl std::future::Future<Output = Result<FantasyData, FetchError>> + Send;

    /// Driver prices indexed by upper-cased last name
    fn driver_price_index(
        &self,
    ) -> impl std::future::Future<Output = Result<HashMap<String, FantasyDriver>, FetchError>> + Send;

    /// Constructor prices indexed by upper-cased name
    fn constructor_price_index(
        &self,
    ) -> impl std::future::Future<Output = Result<HashMap<String, FantasyConstructor>, FetchError>> + Send;
}

/// Build the driver price index from a pricing snapshot
pub(crate) fn index_drivers(data: &FantasyData) -> HashMap<String, FantasyDriver> {
    data.drivers
        .iter()
        .map(|d| (d.last_name.to_uppercase(), d.clone()))
        .collect()
}

/// Build the constructor price index from a pricing snapshot
pub(crate) fn index_constructors(data: &FantasyData) -> HashMap<String, FantasyConstructor> {
    data.constructors
        .iter()
        .map(|c| (c.name.to_uppercase(), c.clone()))
        .collect()
}
