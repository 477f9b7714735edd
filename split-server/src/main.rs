use std::net::SocketAddr;

use split_server::booking::{BookingClient, BookingConfig};
use split_server::split::{AnalysisConfig, JourneySearch};
use split_server::vendo::{MockVendoClient, VendoClient, VendoConfig};
use split_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Booking resolver
    let mut booking_config = BookingConfig::new();
    if let Ok(url) = std::env::var("BOOKING_BASE_URL") {
        booking_config = booking_config.with_base_url(url);
    }
    let resolver = BookingClient::new(booking_config).expect("Failed to create booking client");

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be a socket address");

    // Journey search: recorded responses if a mock directory is given
    if let Ok(dir) = std::env::var("VENDO_MOCK_DIR") {
        let mock = MockVendoClient::from_dir(&dir).expect("Failed to load mock journeys");
        warn!(%dir, routes = mock.available_routes().len(), "using mock journey search");
        serve(mock, resolver, addr).await;
    } else {
        let mut vendo_config = VendoConfig::new();
        if let Ok(url) = std::env::var("VENDO_BASE_URL") {
            vendo_config = vendo_config.with_base_url(url);
        }
        if let Some(n) = std::env::var("VENDO_MAX_CONCURRENT")
            .ok()
            .and_then(|n| n.parse().ok())
        {
            vendo_config = vendo_config.with_max_concurrent(n);
        }
        info!(base_url = %vendo_config.base_url, "using live journey search");
        let client = VendoClient::new(vendo_config).expect("Failed to create journey search client");
        serve(client, resolver, addr).await;
    }
}

async fn serve<S: JourneySearch + 'static>(search: S, resolver: BookingClient, addr: SocketAddr) {
    let state = AppState::new(search, resolver, AnalysisConfig::default());
    let app = create_router(state);

    info!("Split-ticket finder listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health       - Health check");
    info!("  POST /api/analyze  - Analyze a journey (SSE)");
    info!("  POST /api/combi    - Analyze a booked connection (SSE)");
    info!("  POST /api/journey  - List fares of a booked connection");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
