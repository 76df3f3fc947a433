//! Player configuration from environment.

use flightviz_core::AnimationConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// File path or http(s) URL of the flight-data JSON
    pub data_source: String,
    pub map_path: PathBuf,
    pub drone_path: PathBuf,
    pub marker_path: PathBuf,
    /// Where the current frame is written as PNG
    pub output_path: PathBuf,
    /// An asset not decoded within this window is treated as failed
    pub asset_timeout: Duration,
    pub animation: AnimationConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_source: env::var("FLIGHTVIZ_DATA")
                .unwrap_or_else(|_| "flightData.json".to_string()),
            map_path: env::var("FLIGHTVIZ_MAP")
                .unwrap_or_else(|_| "map.png".to_string())
                .into(),
            drone_path: env::var("FLIGHTVIZ_DRONE")
                .unwrap_or_else(|_| "drone.png".to_string())
                .into(),
            marker_path: env::var("FLIGHTVIZ_MARKER")
                .unwrap_or_else(|_| "boom.png".to_string())
                .into(),
            output_path: env::var("FLIGHTVIZ_OUTPUT")
                .unwrap_or_else(|_| "frame.png".to_string())
                .into(),
            asset_timeout: Duration::from_millis(
                env::var("FLIGHTVIZ_ASSET_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
            ),
            animation: AnimationConfig::default(),
        }
    }
}
