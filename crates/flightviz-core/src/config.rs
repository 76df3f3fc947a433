//! Playback and drawing parameters.

use crate::models::Position;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Line style for the trajectory polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 3.0,
        }
    }
}

/// Configuration for a flight replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Wall time for a full replay, regardless of sample count
    pub total_duration: Duration,
    /// How long the impact marker stays on screen
    pub marker_hold: Duration,
    /// Drawing surface width in pixels
    pub surface_width: u32,
    /// Drawing surface height in pixels
    pub surface_height: u32,
    /// Pixels per distance unit
    pub scale: f64,
    pub stroke: Stroke,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            total_duration: Duration::from_millis(20_000),
            marker_hold: Duration::from_millis(2_000),
            surface_width: 400,
            surface_height: 400,
            scale: 0.5,
            stroke: Stroke::default(),
        }
    }
}

impl AnimationConfig {
    /// Delay from start until the marker appears.
    pub fn marker_delay(&self) -> Duration {
        self.total_duration / 2
    }

    /// Time between ticks for a flight of `sample_count` samples.
    ///
    /// Returns `None` for an empty flight. Never returns a zero interval.
    pub fn step_interval(&self, sample_count: usize) -> Option<Duration> {
        if sample_count == 0 {
            return None;
        }
        let step = match u32::try_from(sample_count) {
            Ok(n) => self.total_duration / n,
            Err(_) => self.total_duration.div_f64(sample_count as f64),
        };
        Some(step.max(Duration::from_nanos(1)))
    }

    /// The trajectory starts at the centre of the surface.
    pub fn origin(&self) -> Position {
        Position::new(
            f64::from(self.surface_width) / 2.0,
            f64::from(self.surface_height) / 2.0,
        )
    }
}
