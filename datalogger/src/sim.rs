use rand::Rng;

use crate::errors::{Error, Result};
use crate::model::Reading;
use crate::sensors::{MoistureSource, TemperatureHumiditySource};

/// Probability of a simulated transient read failure per attempt.
const FAULT_RATE: f64 = 0.02;

/// Stand-in for the DHT11 driver: plausible greenhouse climate with
/// occasional outliers, and the odd transient failure to exercise the
/// retry path.
pub struct SimulatedClimate;

impl TemperatureHumiditySource for SimulatedClimate {
    async fn measure(&mut self) -> Result<Reading> {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(FAULT_RATE) {
            return Err(Error::Sensor("Simulated checksum failure".to_string()));
        }

        let temperature: i16 = if rng.gen_bool(0.05) {
            rng.gen_range(-10..45) // 5% outliers
        } else {
            rng.gen_range(15..35) // Normal range
        };
        let humidity: i16 = rng.gen_range(30..80);

        Ok(Reading {
            temperature,
            humidity,
        })
    }
}

/// Stand-in for the moisture probe ADC: raw values spanning slightly
/// past both calibration thresholds so the clamps get exercised.
pub struct SimulatedMoistureProbe {
    dry_adc: u16,
    wet_adc: u16,
}

impl SimulatedMoistureProbe {
    pub fn new(dry_adc: u16, wet_adc: u16) -> Self {
        Self { dry_adc, wet_adc }
    }
}

impl MoistureSource for SimulatedMoistureProbe {
    async fn read_raw(&mut self) -> Result<u16> {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(FAULT_RATE) {
            return Err(Error::Sensor("Simulated ADC glitch".to_string()));
        }

        let low = self.wet_adc.saturating_sub(2000);
        let high = self.dry_adc.saturating_add(2000);
        Ok(rng.gen_range(low..high))
    }
}
