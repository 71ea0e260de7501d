use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::AppState;
use gridvalue::error::AppError;
use gridvalue::providers::PricingProvider;

/// Current fantasy pricing snapshot
pub async fn list_prices(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let data = if state.use_mock {
        state.mock.fantasy_data().await?
    } else {
        state.fantasy.fantasy_data().await?
    };

    Ok(HttpResponse::Ok().json(data))
}
