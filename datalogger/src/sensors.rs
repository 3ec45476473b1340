use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::errors::{Error, Result};
use crate::model::{MoistureReading, Reading};

const MAX_RETRIES: u32 = 5;
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Driver side of the temperature/humidity sensor: trigger one
/// measurement and return both values in the sensor's native units.
pub trait TemperatureHumiditySource {
    async fn measure(&mut self) -> Result<Reading>;
}

/// Driver side of the soil moisture probe: one raw ADC sample.
pub trait MoistureSource {
    async fn read_raw(&mut self) -> Result<u16>;
}

/// What the pipeline consumes: a validated climate reading, retried
/// internally until it succeeds or the attempt budget is spent.
pub trait ClimateReader {
    async fn read(&mut self) -> Result<Reading>;
}

/// What the pipeline consumes for moisture: raw ADC already remapped to
/// a calibrated percentage.
pub trait MoistureReader {
    async fn read(&mut self) -> Result<MoistureReading>;
}

/// Temperature/humidity reader with bounded retry.
pub struct ClimateSensor<S> {
    source: S,
}

impl<S: TemperatureHumiditySource> ClimateSensor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: TemperatureHumiditySource> ClimateReader for ClimateSensor<S> {
    async fn read(&mut self) -> Result<Reading> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.measure().await {
                Ok(reading) => return Ok(reading),
                Err(e) => {
                    if attempt >= MAX_RETRIES {
                        return Err(Error::Sensor(format!(
                            "Climate read failed after {} attempts: {}",
                            attempt, e
                        )));
                    }
                    warn!(
                        "Climate read failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, MAX_RETRIES, e, RETRY_BACKOFF
                    );
                    sleep(RETRY_BACKOFF).await;
                }
            }
        }
    }
}

/// Moisture reader with bounded retry and the ADC-to-percentage remap.
/// `dry_adc` and `wet_adc` are fixed calibration constants with
/// `dry_adc > wet_adc`; readings at or beyond either end are clamped.
pub struct MoistureSensor<S> {
    source: S,
    dry_adc: u16,
    wet_adc: u16,
}

impl<S: MoistureSource> MoistureSensor<S> {
    pub fn new(source: S, dry_adc: u16, wet_adc: u16) -> Self {
        Self {
            source,
            dry_adc,
            wet_adc,
        }
    }
}

impl<S: MoistureSource> MoistureReader for MoistureSensor<S> {
    async fn read(&mut self) -> Result<MoistureReading> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.read_raw().await {
                Ok(raw) => {
                    return Ok(MoistureReading {
                        raw_adc: raw,
                        percentage: remap(raw, self.dry_adc, self.wet_adc),
                    })
                }
                Err(e) => {
                    if attempt >= MAX_RETRIES {
                        return Err(Error::Sensor(format!(
                            "Moisture read failed after {} attempts: {}",
                            attempt, e
                        )));
                    }
                    warn!(
                        "Moisture read failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, MAX_RETRIES, e, RETRY_BACKOFF
                    );
                    sleep(RETRY_BACKOFF).await;
                }
            }
        }
    }
}

/// Piecewise-linear remap of a raw ADC value to a moisture percentage
/// between the dry (0 %) and wet (100 %) calibration points.
fn remap(raw: u16, dry: u16, wet: u16) -> f32 {
    if raw > dry {
        0.0
    } else if raw < wet {
        100.0
    } else {
        100.0 - (raw - wet) as f32 / (dry - wet) as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRY: u16 = 54500;
    const WET: u16 = 22500;

    #[test]
    fn test_remap_clamps_at_dry_end() {
        assert_eq!(remap(DRY, DRY, WET), 0.0);
        assert_eq!(remap(DRY + 1, DRY, WET), 0.0);
        assert_eq!(remap(u16::MAX, DRY, WET), 0.0);
    }

    #[test]
    fn test_remap_clamps_at_wet_end() {
        assert_eq!(remap(WET, DRY, WET), 100.0);
        assert_eq!(remap(WET - 1, DRY, WET), 100.0);
        assert_eq!(remap(0, DRY, WET), 100.0);
    }

    #[test]
    fn test_remap_midpoint_is_half() {
        let mid = ((DRY as u32 + WET as u32) / 2) as u16;
        assert!((remap(mid, DRY, WET) - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_remap_monotonic_non_increasing() {
        let mut previous = 100.0f32;
        for raw in (0..=u16::MAX).step_by(500) {
            let pct = remap(raw, DRY, WET);
            assert!(
                pct <= previous,
                "remap({}) = {} rose above {}",
                raw,
                pct,
                previous
            );
            previous = pct;
        }
    }

    struct FlakyClimate {
        failures: u32,
        calls: u32,
    }

    impl TemperatureHumiditySource for FlakyClimate {
        async fn measure(&mut self) -> Result<Reading> {
            self.calls += 1;
            if self.calls <= self.failures {
                return Err(Error::Sensor("transient fault".to_string()));
            }
            Ok(Reading {
                temperature: 21,
                humidity: 40,
            })
        }
    }

    struct FlakyProbe {
        failures: u32,
        calls: u32,
    }

    impl MoistureSource for FlakyProbe {
        async fn read_raw(&mut self) -> Result<u16> {
            self.calls += 1;
            if self.calls <= self.failures {
                return Err(Error::Sensor("ADC glitch".to_string()));
            }
            Ok(((DRY as u32 + WET as u32) / 2) as u16)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_climate_retries_transient_failures() {
        let mut sensor = ClimateSensor::new(FlakyClimate {
            failures: 2,
            calls: 0,
        });
        let reading = sensor.read().await.unwrap();
        assert_eq!(reading.temperature, 21);
        assert_eq!(sensor.source.calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_climate_gives_up_after_retry_budget() {
        let mut sensor = ClimateSensor::new(FlakyClimate {
            failures: u32::MAX,
            calls: 0,
        });
        assert!(sensor.read().await.is_err());
        assert_eq!(sensor.source.calls, MAX_RETRIES);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moisture_reader_remaps_after_retry() {
        let mut sensor = MoistureSensor::new(
            FlakyProbe {
                failures: 1,
                calls: 0,
            },
            DRY,
            WET,
        );
        let moisture = sensor.read().await.unwrap();
        assert_eq!(moisture.raw_adc, ((DRY as u32 + WET as u32) / 2) as u16);
        assert!((moisture.percentage - 50.0).abs() < 0.01);
    }
}
