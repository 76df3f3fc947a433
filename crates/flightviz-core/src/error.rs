//! Error types for flight replay rendering and data handling.

use thiserror::Error;

/// Flight data could not be decoded.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid flight data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A frame could not be drawn. Nothing is drawn when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("No trajectory to draw")]
    EmptyTrajectory,

    #[error("Frame index {index} out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An image asset could not be made ready.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Asset load task failed: {0}")]
    Task(String),

    #[error("Timed out after {0}ms")]
    Timeout(u64),
}
