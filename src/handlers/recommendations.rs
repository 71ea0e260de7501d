use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use gridvalue::core::{
    analyze_constructors, analyze_drivers, generate_constructor_recommendations,
    generate_recommendations,
};
use gridvalue::error::{validate_budget, AppError};
use gridvalue::models::RecommendationsResponse;
use gridvalue::providers::{PricingProvider, TelemetryProvider};

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub budget: Option<f64>,
    pub session_key: Option<u32>,
}

/// Ranked swap recommendations for drivers and constructors
pub async fn list_recommendations(
    state: web::Data<Arc<AppState>>,
    query: web::Query<RecommendationsQuery>,
) -> Result<HttpResponse, AppError> {
    let budget = query.budget.unwrap_or(0.0);
    validate_budget(budget)?;

    let response = if state.use_mock {
        recommend(&state.mock, &state.mock, query.session_key, budget).await?
    } else {
        recommend(&state.openf1, &state.fantasy, query.session_key, budget).await?
    };

    Ok(HttpResponse::Ok().json(response))
}

async fn recommend<T, P>(
    telemetry: &T,
    pricing: &P,
    session_key: Option<u32>,
    budget: f64,
) -> Result<RecommendationsResponse, AppError>
where
    T: TelemetryProvider,
    P: PricingProvider,
{
    let drivers = analyze_drivers(telemetry, pricing, session_key).await?;
    let constructors = analyze_constructors(&drivers, pricing).await?;

    Ok(RecommendationsResponse {
        budget,
        recommendations: generate_recommendations(&drivers, budget),
        constructor_recommendations: generate_constructor_recommendations(&constructors, budget),
    })
}
