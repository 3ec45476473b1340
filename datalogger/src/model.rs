use crate::errors::{Error, Result};

/// Length of the intermediate temperature/humidity pair encoding.
pub const READING_LEN: usize = 4;

/// Length of one on-disk record.
pub const RECORD_LEN: usize = 17;

/// One temperature/humidity measurement in the sensor's native units.
/// Valid only immediately after a successful read; never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub temperature: i16,
    pub humidity: i16,
}

impl Reading {
    /// Pack as two little-endian signed 16-bit integers, temperature first.
    pub fn to_bytes(&self) -> [u8; READING_LEN] {
        let mut buf = [0u8; READING_LEN];
        buf[0..2].copy_from_slice(&self.temperature.to_le_bytes());
        buf[2..4].copy_from_slice(&self.humidity.to_le_bytes());
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != READING_LEN {
            return Err(Error::Decode(format!(
                "Reading expects {} bytes, got {}",
                READING_LEN,
                data.len()
            )));
        }
        Ok(Self {
            temperature: i16::from_le_bytes([data[0], data[1]]),
            humidity: i16::from_le_bytes([data[2], data[3]]),
        })
    }
}

/// Soil moisture sample: raw ADC value plus the calibrated percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistureReading {
    pub raw_adc: u16,
    /// In [0, 100], clamped at the calibration thresholds.
    pub percentage: f32,
}

impl MoistureReading {
    /// Pack the truncated percentage as a little-endian signed 16-bit integer.
    pub fn percentage_to_bytes(&self) -> [u8; 2] {
        (self.percentage as i16).to_le_bytes()
    }

    pub fn percentage_from_bytes(data: &[u8]) -> Result<i16> {
        if data.len() != 2 {
            return Err(Error::Decode(format!(
                "Moisture percentage expects 2 bytes, got {}",
                data.len()
            )));
        }
        Ok(i16::from_le_bytes([data[0], data[1]]))
    }
}

/// On-disk record: device id, temperature, humidity, moisture percentage
/// byte, unix timestamp. Little-endian, no padding, exactly 17 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredRecord {
    pub device_id: u32,
    pub temperature: f32,
    pub humidity: f32,
    pub moisture_pct: u8,
    pub timestamp: u32,
}

impl StoredRecord {
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&self.device_id.to_le_bytes());
        buf[4..8].copy_from_slice(&self.temperature.to_le_bytes());
        buf[8..12].copy_from_slice(&self.humidity.to_le_bytes());
        buf[12] = self.moisture_pct;
        buf[13..17].copy_from_slice(&self.timestamp.to_le_bytes());
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != RECORD_LEN {
            return Err(Error::Decode(format!(
                "StoredRecord expects {} bytes, got {}",
                RECORD_LEN,
                data.len()
            )));
        }
        Ok(Self {
            device_id: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
            temperature: f32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            humidity: f32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            moisture_pct: data[12],
            timestamp: u32::from_le_bytes([data[13], data[14], data[15], data[16]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_round_trip() {
        let reading = Reading {
            temperature: -12,
            humidity: 87,
        };
        let bytes = reading.to_bytes();
        assert_eq!(bytes.len(), READING_LEN);
        assert_eq!(Reading::from_bytes(&bytes).unwrap(), reading);
    }

    #[test]
    fn test_reading_extremes_round_trip() {
        for (t, h) in [(i16::MIN, i16::MAX), (0, 0), (i16::MAX, i16::MIN)] {
            let reading = Reading {
                temperature: t,
                humidity: h,
            };
            assert_eq!(Reading::from_bytes(&reading.to_bytes()).unwrap(), reading);
        }
    }

    #[test]
    fn test_reading_rejects_wrong_length() {
        assert!(Reading::from_bytes(&[0u8; 3]).is_err());
        assert!(Reading::from_bytes(&[0u8; 5]).is_err());
    }

    #[test]
    fn test_moisture_percentage_round_trip() {
        let moisture = MoistureReading {
            raw_adc: 40000,
            percentage: 63.7,
        };
        let bytes = moisture.percentage_to_bytes();
        // Truncated toward zero, as the record format requires.
        assert_eq!(MoistureReading::percentage_from_bytes(&bytes).unwrap(), 63);
    }

    #[test]
    fn test_stored_record_round_trip() {
        let record = StoredRecord {
            device_id: 12345,
            temperature: 21.5,
            humidity: 48.0,
            moisture_pct: 55,
            timestamp: 1_700_000_000,
        };
        let bytes = record.encode();
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(StoredRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn test_stored_record_layout_is_little_endian() {
        let record = StoredRecord {
            device_id: 1,
            temperature: 0.0,
            humidity: 0.0,
            moisture_pct: 0xAB,
            timestamp: 2,
        };
        let bytes = record.encode();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(bytes[12], 0xAB);
        assert_eq!(&bytes[13..17], &[2, 0, 0, 0]);
    }

    #[test]
    fn test_stored_record_rejects_wrong_length() {
        assert!(StoredRecord::decode(&[0u8; 16]).is_err());
        assert!(StoredRecord::decode(&[0u8; 18]).is_err());
        assert!(StoredRecord::decode(&[]).is_err());
    }
}
