mod metrics;
mod record;
mod rest;

use std::env;

use tracing::{error, info};

#[tokio::main]
async fn main() {
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting upload receiver");

    // Initialize metrics
    metrics::init_metrics();

    let app = rest::create_router();

    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", http_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}
