use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use nanoedit::{
    analytics::PageViewTracker,
    config::Config,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nanoedit=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Analytics providers are initialised once for the whole process
    let mut tracker = PageViewTracker::from_config(&config.analytics);
    tracker.init();
    let tracker = Arc::new(tracker);

    let state = AppState::new(config, tracker.clone())
        .expect("Failed to build generation client");
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server");
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    tracker.shutdown();
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
