use std::panic;

use inkdraft::config::Config;
use inkdraft::state::AppState;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "inkdraft=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    if config.openai_api_key.is_none() {
        warn!("No OPENAI_API_KEY configured - AI endpoints will answer 503");
    }

    let state = AppState::new(&config);
    let app = inkdraft::app(&config, state);

    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("Server running on http://{}", config.server_address());
    info!(
        "Collaboration socket available at ws://{}/ws",
        config.server_address()
    );
    info!(
        "Swagger UI available at http://{}/swagger",
        config.server_address()
    );

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
