use serde::Serialize;
use tracing::warn;

/// Length of one uploaded record.
pub const RECORD_LEN: usize = 17;

/// One decoded 17-byte sensor record as uploaded by a field unit:
/// device id, temperature, humidity, moisture percentage byte, unix
/// timestamp. Little-endian, no padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRecord {
    pub device_id: u32,
    pub temperature: f32,
    pub humidity: f32,
    pub moisture_pct: u8,
    pub timestamp: u32,
}

impl SensorRecord {
    /// Decode one record; None if the slice is not exactly one record.
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() != RECORD_LEN {
            warn!("Invalid record slice: len={}", data.len());
            return None;
        }
        Some(Self {
            device_id: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
            temperature: f32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            humidity: f32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            moisture_pct: data[12],
            timestamp: u32::from_le_bytes([data[13], data[14], data[15], data[16]]),
        })
    }
}

/// Split an upload body into records. The caller has already verified
/// the length is a positive multiple of RECORD_LEN.
pub fn decode_all(body: &[u8]) -> Vec<SensorRecord> {
    body.chunks_exact(RECORD_LEN)
        .filter_map(SensorRecord::decode)
        .collect()
}

/// JSON acknowledgement returned for an accepted upload.
#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub accepted: usize,
    pub bytes: usize,
}
