// src/config.rs
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::telemetry::StationError;

/// Environment variable naming an optional JSON override file.
pub const CONFIG_ENV: &str = "GROUND_STATION_CONFIG";

static CONFIG: OnceCell<SimulationConfig> = OnceCell::new();

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AxisMargin {
    /// Fixed padding in axis units: `x_max = latest + x`, `y = [min - y, max + y]`.
    Additive { x: f64, y: f64 },
    /// Padding relative to the data: `x_max = (1 + x) * latest`,
    /// `y = [min - y * |min|, max + y * |max|]`.
    Proportional { x: f64, y: f64 },
}

impl Default for AxisMargin {
    fn default() -> Self {
        AxisMargin::Additive { x: 0.5, y: 0.2 }
    }
}

impl AxisMargin {
    fn is_valid(&self) -> bool {
        let (AxisMargin::Additive { x, y } | AxisMargin::Proportional { x, y }) = *self;
        x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0
    }
}

/// Which optional window features are shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationProfile {
    pub chat_echo: bool,
    pub indicator_lamps: bool,
    /// Oldest log lines are dropped beyond this many.
    pub log_capacity: usize,
}

impl Default for StationProfile {
    fn default() -> Self {
        Self {
            chat_echo: false,
            indicator_lamps: true,
            log_capacity: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub total_duration_secs: f64,
    pub generator_period_ms: u64,
    pub refresher_period_ms: u64,
    pub frequency_hz: f64,
    pub start_delay_ms: u64,
    pub noise_amplitude: f64,
    /// How close to a whole second a sample must land to trigger a count report.
    pub report_tolerance_secs: f64,
    pub axis_margin: AxisMargin,
    pub profile: StationProfile,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_duration_secs: 15.0,
            generator_period_ms: 20,
            refresher_period_ms: 30,
            frequency_hz: 0.5,
            start_delay_ms: 1000,
            noise_amplitude: 0.1,
            report_tolerance_secs: 0.02,
            axis_margin: AxisMargin::default(),
            profile: StationProfile::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), StationError> {
        if self.total_duration_secs <= 0.0
            || Duration::try_from_secs_f64(self.total_duration_secs).is_err()
        {
            return Err(StationError::InvalidDuration(self.total_duration_secs));
        }
        if self.generator_period_ms == 0 {
            return Err(StationError::InvalidTickPeriod { name: "generator" });
        }
        if self.refresher_period_ms == 0 {
            return Err(StationError::InvalidTickPeriod { name: "refresher" });
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(StationError::InvalidFrequency(self.frequency_hz));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(StationError::InvalidNoiseAmplitude(self.noise_amplitude));
        }
        if !self.report_tolerance_secs.is_finite() || self.report_tolerance_secs < 0.0 {
            return Err(StationError::InvalidReportTolerance(
                self.report_tolerance_secs,
            ));
        }
        if !self.axis_margin.is_valid() {
            return Err(StationError::InvalidMargin);
        }
        Ok(())
    }

    /// `Duration::MAX` when the configured value is out of range; `validate` rejects that case.
    pub fn total_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.total_duration_secs).unwrap_or(Duration::MAX)
    }

    pub fn generator_period(&self) -> Duration {
        Duration::from_millis(self.generator_period_ms)
    }

    pub fn refresher_period(&self) -> Duration {
        Duration::from_millis(self.refresher_period_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// Samples one full run produces when no tick is missed.
    pub fn expected_samples(&self) -> usize {
        (self.total_duration_secs * 1000.0 / self.generator_period_ms as f64).ceil() as usize
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("malformed configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Defaults, overridden by the file named in `GROUND_STATION_CONFIG` when set.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::from_file(Path::new(&path))?;
                log::info!("Loaded configuration from {}", Path::new(&path).display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Loads the process-wide configuration once; later calls return the same value.
pub fn global() -> Result<&'static SimulationConfig> {
    CONFIG.get_or_try_init(SimulationConfig::from_env)
}
