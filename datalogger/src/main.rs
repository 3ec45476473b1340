mod config;
mod errors;
mod model;
mod pipeline;
mod scheduler;
mod sensors;
mod sim;
mod storage;
mod upload;
mod validate;

use chrono::Utc;
use tracing::{error, info, warn};

use config::Config;
use pipeline::Pipeline;
use sensors::{ClimateSensor, MoistureSensor};
use sim::{SimulatedClimate, SimulatedMoistureProbe};
use storage::{BlockStorage, FsStorage};
use upload::HttpClient;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    info!("Starting datalogger (device id {})", config.device_id);
    info!("Server endpoint: {}", config.server_url);
    info!(
        "Sample interval: {}s, upload interval: {}s",
        config.sample_interval_secs, config.upload_interval_secs
    );

    // No degraded mode without storage: an unmountable card is fatal.
    let mut storage = FsStorage::new(&config.storage_root);
    if let Err(e) = storage.mount().await {
        error!("Failed to mount storage at {}: {}", config.storage_root, e);
        std::process::exit(1);
    }
    match storage.list_dir().await {
        Ok(entries) => info!("Storage contents: {:?}", entries),
        Err(e) => warn!("Failed to list storage contents: {}", e),
    }

    let transport = match HttpClient::new() {
        Ok(transport) => transport,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let climate = ClimateSensor::new(SimulatedClimate);
    let moisture = MoistureSensor::new(
        SimulatedMoistureProbe::new(config.moisture_dry_adc, config.moisture_wet_adc),
        config.moisture_dry_adc,
        config.moisture_wet_adc,
    );

    let mut pipeline = Pipeline::new(
        &config,
        climate,
        moisture,
        storage,
        transport,
        Utc::now().timestamp(),
    );

    tokio::select! {
        _ = pipeline.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping data collection");
        }
    }

    pipeline.shutdown().await;
    info!("Shutting down");
}
