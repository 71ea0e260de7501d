use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::AppState;
use gridvalue::error::AppError;
use gridvalue::models::SessionsResponse;
use gridvalue::providers::TelemetryProvider;

/// Latest meeting and its practice sessions
pub async fn list_sessions(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = if state.use_mock {
        resolve(&state.mock).await?
    } else {
        resolve(&state.openf1).await?
    };

    Ok(HttpResponse::Ok().json(response))
}

async fn resolve<T: TelemetryProvider>(telemetry: &T) -> Result<SessionsResponse, AppError> {
    let meeting = telemetry
        .latest_meeting()
        .await?
        .ok_or_else(|| AppError::NotFound("No meeting found".to_string()))?;

    let sessions = telemetry.practice_sessions(meeting.meeting_key).await?;

    Ok(SessionsResponse { meeting, sessions })
}
