use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod handlers;

use gridvalue::providers::{FantasyClient, FantasyConfig, MockProvider, OpenF1Client, OpenF1Config};
use handlers::{drivers, health, prices, recommendations, sessions};

/// Application state shared across handlers
pub struct AppState {
    pub openf1: OpenF1Client,
    pub fantasy: FantasyClient,
    pub mock: MockProvider,
    pub use_mock: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let use_mock = std::env::var("USE_MOCK_DATA").map(|v| v == "1").unwrap_or(false);
    if use_mock {
        warn!("USE_MOCK_DATA=1: serving fixture data, no upstream calls will be made");
    }

    let openf1 = OpenF1Client::new(OpenF1Config::default())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let fantasy = FantasyClient::new(FantasyConfig::default())
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let app_state = Arc::new(AppState {
        openf1,
        fantasy,
        mock: MockProvider::new(),
        use_mock,
    });

    info!("Starting gridvalue API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/api/sessions", web::get().to(sessions::list_sessions))
            .route("/api/drivers", web::get().to(drivers::list_drivers))
            .route("/api/prices", web::get().to(prices::list_prices))
            .route(
                "/api/recommendations",
                web::get().to(recommendations::list_recommendations),
            )
    })
    .bind(&addr)?
    .run()
    .await
}
