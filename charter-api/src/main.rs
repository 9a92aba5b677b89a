use charter_api::{app, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charter_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = charter_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Charter API on port {}", config.server.port);

    if config.crm.token.is_none() || config.crm.location_id.is_none() {
        tracing::warn!("CRM credentials not configured; /api/contacts will fail closed");
    }
    if config.airportdb.api_token.is_none() {
        tracing::warn!("AirportDB token not configured; airport search uses the local list only");
    }

    let app = app(AppState::new(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
