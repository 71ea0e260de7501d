use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use gridvalue::core::analyze_drivers;
use gridvalue::error::AppError;
use gridvalue::models::DriversResponse;

#[derive(Debug, Deserialize)]
pub struct DriversQuery {
    pub session_key: Option<u32>,
}

/// Analyze all drivers for a session (latest practice when unspecified)
pub async fn list_drivers(
    state: web::Data<Arc<AppState>>,
    query: web::Query<DriversQuery>,
) -> Result<HttpResponse, AppError> {
    let drivers = if state.use_mock {
        analyze_drivers(&state.mock, &state.mock, query.session_key).await?
    } else {
        analyze_drivers(&state.openf1, &state.fantasy, query.session_key).await?
    };

    Ok(HttpResponse::Ok().json(DriversResponse { drivers }))
}
