use std::env;

/// Startup configuration. Values are read once from the environment with
/// fixed defaults; nothing is reloaded at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    pub device_id: u32,
    pub sample_interval_secs: i64,
    pub upload_interval_secs: i64,
    pub server_url: String,
    pub storage_root: String,
    pub data_file: String,
    /// ADC reading when the probe is dry (maps to 0 %).
    pub moisture_dry_adc: u16,
    /// ADC reading when the probe is wet (maps to 100 %).
    pub moisture_wet_adc: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let device_id: u32 = env::var("DEVICE_ID")
            .unwrap_or_else(|_| "12345".to_string())
            .parse()
            .unwrap_or(12345);
        let sample_interval_secs: i64 = env::var("SAMPLE_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let upload_interval_secs: i64 = env::var("UPLOAD_INTERVAL_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let server_url = env::var("SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000/api/v1/readings".to_string());
        let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "sdcard".to_string());
        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "sensor_data.bin".to_string());
        let moisture_dry_adc: u16 = env::var("MOISTURE_DRY_ADC")
            .unwrap_or_else(|_| "54500".to_string())
            .parse()
            .unwrap_or(54500);
        let moisture_wet_adc: u16 = env::var("MOISTURE_WET_ADC")
            .unwrap_or_else(|_| "22500".to_string())
            .parse()
            .unwrap_or(22500);

        Self {
            device_id,
            sample_interval_secs,
            upload_interval_secs,
            server_url,
            storage_root,
            data_file,
            moisture_dry_adc,
            moisture_wet_adc,
        }
    }
}
