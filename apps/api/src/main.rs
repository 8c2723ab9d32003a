use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use booking_cell::{BookingService, InMemoryAppointmentStore, SystemClock};
use dashboard_cell::spawn_aggregator;
use live_sync_cell::SyncHub;
use location_cell::seeded_directory;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HCMS API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());

    // Reference catalog, immutable after seeding
    let directory = Arc::new(seeded_directory());

    // Live sync hub and the dashboard aggregator feeding it
    let hub = Arc::new(SyncHub::new(config.subscriber_buffer_size));
    let dashboard = spawn_aggregator(
        hub.clone(),
        directory.hospital_count() as u64,
        directory.doctor_count() as u64,
        config.event_channel_size,
    );

    // Booking orchestrator over the in-memory store
    let store = Arc::new(InMemoryAppointmentStore::new());
    let booking = Arc::new(BookingService::new(
        directory.clone(),
        store,
        Arc::new(SystemClock),
        dashboard.events_sender(),
    ));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(config.clone(), directory, booking, hub, dashboard)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
