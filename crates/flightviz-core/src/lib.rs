//! Flight replay core: turns speed/heading samples into a pixel path and
//! composes frames of the drone flying it over a map.
//!
//! Nothing in this crate does I/O or keeps time; see `flightviz-player` for
//! loading and playback.

pub mod assets;
pub mod config;
pub mod error;
pub mod models;
pub mod raster;
pub mod render;
pub mod surface;
pub mod trajectory;

pub use assets::{AssetKind, AssetSet, AssetState, Sprite};
pub use config::{AnimationConfig, Color, Stroke};
pub use error::{AssetError, DataError, RenderError};
pub use models::{parse_lenient, AnimationState, AnimationStatus, FlightSample, Position};
pub use raster::RasterSurface;
pub use render::{render_frame, Frame};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use trajectory::{build_trajectory, halfway_index};

/// Decode a flight-data document: a JSON array of samples.
pub fn parse_flight_data(json: &str) -> Result<Vec<FlightSample>, DataError> {
    Ok(serde_json::from_str(json)?)
}
