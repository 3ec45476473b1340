use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::model::{StoredRecord, RECORD_LEN};
use crate::scheduler::Schedule;
use crate::sensors::{ClimateReader, MoistureReader};
use crate::storage::BlockStorage;
use crate::upload::HttpTransport;
use crate::validate::moisture_to_byte;

/// How often the loop re-checks both schedules. Intervals are whole
/// seconds, so a sub-second poll never misses a due tick.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owns the two scheduled actions and the shared storage handle, and
/// drives the main loop. A failure inside one action is logged and
/// contained at that action's boundary; it never crosses into the other
/// action or ends the loop.
pub struct Pipeline<C, M, S, H> {
    device_id: u32,
    data_file: String,
    server_url: String,
    climate: C,
    moisture: M,
    storage: S,
    transport: H,
    collect_schedule: Schedule,
    upload_schedule: Schedule,
}

impl<C, M, S, H> Pipeline<C, M, S, H>
where
    C: ClimateReader,
    M: MoistureReader,
    S: BlockStorage,
    H: HttpTransport,
{
    pub fn new(
        config: &Config,
        climate: C,
        moisture: M,
        storage: S,
        transport: H,
        now: i64,
    ) -> Self {
        Self {
            device_id: config.device_id,
            data_file: config.data_file.clone(),
            server_url: config.server_url.clone(),
            climate,
            moisture,
            storage,
            transport,
            // First sample immediately; first upload a full interval in.
            collect_schedule: Schedule::new(config.sample_interval_secs, true, now),
            upload_schedule: Schedule::new(config.upload_interval_secs, false, now),
        }
    }

    /// Read both sensors and append one record. All-or-nothing: any
    /// sensor, validation or storage failure leaves the file untouched
    /// and the next scheduled tick retries independently.
    pub async fn collect_and_store(&mut self, now: i64) -> Result<()> {
        let reading = self.climate.read().await?;
        let moisture = self.moisture.read().await?;
        let moisture_pct = moisture_to_byte(moisture.percentage as i16)?;

        let record = StoredRecord {
            device_id: self.device_id,
            temperature: reading.temperature as f32,
            humidity: reading.humidity as f32,
            moisture_pct,
            timestamp: now as u32,
        };
        self.storage
            .append(&self.data_file, &record.encode())
            .await?;
        info!(
            "Stored record: temperature={}°C humidity={}% moisture={}% raw_adc={}",
            reading.temperature, reading.humidity, moisture_pct, moisture.raw_adc
        );
        Ok(())
    }

    /// Upload the accumulated file and purge it on confirmed success.
    /// Anything but HTTP 200 leaves the file intact for the next tick.
    pub async fn upload_and_purge(&mut self) -> Result<()> {
        let data = self.storage.read_all(&self.data_file).await?;
        if data.is_empty() {
            debug!("No data to upload");
            return Ok(());
        }

        // A torn trailing record from an interrupted append would poison
        // every retry if sent verbatim; upload only the aligned prefix.
        let aligned = data.len() - data.len() % RECORD_LEN;
        if aligned != data.len() {
            warn!(
                "{} has {} trailing bytes, uploading the first {} of {}",
                self.data_file,
                data.len() - aligned,
                aligned,
                data.len()
            );
        }
        if aligned == 0 {
            warn!("{} holds no complete record yet, skipping upload", self.data_file);
            return Ok(());
        }

        let status = self
            .transport
            .post(&self.server_url, data[..aligned].to_vec())
            .await?;
        if status != 200 {
            return Err(Error::Upload(format!("Server returned status {}", status)));
        }

        info!(
            "Upload successful ({} bytes, {} records), deleting {}",
            aligned,
            aligned / RECORD_LEN,
            self.data_file
        );
        self.storage.delete(&self.data_file).await?;
        Ok(())
    }

    /// Main loop: poll both schedules in fixed order, collect first.
    pub async fn run(&mut self) {
        info!("Starting data acquisition loop");
        loop {
            let now = Utc::now().timestamp();
            if self.collect_schedule.tick(now) {
                if let Err(e) = self.collect_and_store(now).await {
                    error!("Collect tick failed: {}", e);
                }
            }
            if self.upload_schedule.tick(now) {
                if let Err(e) = self.upload_and_purge().await {
                    error!("Upload tick failed: {}", e);
                }
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Best-effort unmount for graceful shutdown. In-flight writes are
    /// not guaranteed durable.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.storage.unmount().await {
            error!("Unmount failed: {}", e);
        }
    }
}
