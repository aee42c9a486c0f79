//! Run configuration.
//!
//! Every value has a built-in default matching the board firmware, so the tool
//! runs with no arguments. A JSON file may override any subset of keys.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::drivers::DEFAULT_WINDOW;

#[cfg(windows)]
const DEFAULT_PORT: &str = "COM5";
#[cfg(not(windows))]
const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Where lines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Serial,
    Simulation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Serial device name.
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    /// Synthetic time step assigned to each accepted sample (seconds).
    pub sampling_period_secs: f64,
    /// Wall-clock length of the capture (seconds).
    pub duration_secs: f64,
    pub smoothing_window: usize,
    pub source: SourceKind,
    /// Line-drop rate for the simulated device.
    pub simulation_glitch_rate: f64,
    /// Optional CSV dump of the recording.
    pub csv_output: Option<PathBuf>,
    /// Optional PNG export of the figure.
    pub png_output: Option<PathBuf>,
    /// Open the plot window after capture.
    pub show_viewer: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 1,
            sampling_period_secs: 0.01,
            duration_secs: 30.0,
            smoothing_window: DEFAULT_WINDOW,
            source: SourceKind::Serial,
            simulation_glitch_rate: 0.01,
            csv_output: None,
            png_output: None,
            show_viewer: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.baud_rate > 0, "baud_rate must be positive");
        ensure!(
            self.sampling_period_secs.is_finite() && self.sampling_period_secs > 0.0,
            "sampling_period_secs must be positive"
        );
        ensure!(
            self.duration_secs.is_finite() && self.duration_secs > 0.0,
            "duration_secs must be positive"
        );
        ensure!(self.smoothing_window >= 1, "smoothing_window must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.simulation_glitch_rate),
            "simulation_glitch_rate must be within [0, 1]"
        );
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs)
    }
}
