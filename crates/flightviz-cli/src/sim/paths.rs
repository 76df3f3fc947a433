//! Flight path implementations.

use flightviz_core::FlightSample;
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Trait for flight path implementations.
///
/// Headings are degrees in the math convention (0 = east, 90 = north),
/// speeds are distance units per hour and `t` is seconds from the start.
pub trait FlightPath: Send + Sync {
    /// Heading at time t, normalized to [0, 360).
    fn heading_deg(&self, t: f64) -> f64;

    /// Speed at time t.
    fn speed(&self, t: f64) -> f64;
}

/// Constant-rate turn around a circle.
pub struct CircularPath {
    pub radius: f64,
    pub speed: f64,
    pub start_heading_deg: f64,
    pub clockwise: bool,
    period_s: f64,
}

impl CircularPath {
    /// Create a new circular flight path.
    ///
    /// # Arguments
    /// * `radius` - Circle radius in distance units
    /// * `speed` - Speed in distance units per hour
    /// * `start_heading_deg` - Heading at t = 0
    /// * `clockwise` - Direction of the turn
    pub fn new(radius: f64, speed: f64, start_heading_deg: f64, clockwise: bool) -> Self {
        let period_s = if speed > 0.0 {
            TAU * radius / speed * 3600.0
        } else {
            f64::INFINITY
        };

        Self {
            radius,
            speed,
            start_heading_deg,
            clockwise,
            period_s,
        }
    }

    /// Seconds for one full lap.
    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}

impl FlightPath for CircularPath {
    fn heading_deg(&self, t: f64) -> f64 {
        let turned = if self.period_s.is_finite() {
            360.0 * t / self.period_s
        } else {
            0.0
        };
        let heading = if self.clockwise {
            self.start_heading_deg - turned
        } else {
            self.start_heading_deg + turned
        };
        heading.rem_euclid(360.0)
    }

    fn speed(&self, _t: f64) -> f64 {
        self.speed
    }
}

/// Straight flight that stops after covering `distance`.
pub struct LinearPath {
    pub heading_deg: f64,
    pub speed: f64,
    pub distance: f64,
    duration_s: f64,
}

impl LinearPath {
    pub fn new(heading_deg: f64, speed: f64, distance: f64) -> Self {
        let duration_s = if speed > 0.0 {
            distance / speed * 3600.0
        } else {
            0.0
        };

        Self {
            heading_deg: heading_deg.rem_euclid(360.0),
            speed,
            distance,
            duration_s,
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }
}

impl FlightPath for LinearPath {
    fn heading_deg(&self, _t: f64) -> f64 {
        self.heading_deg
    }

    fn speed(&self, t: f64) -> f64 {
        if t < self.duration_s {
            self.speed
        } else {
            0.0
        }
    }
}

/// Sample `path` every `interval_s` seconds, `count` times.
pub fn sample_path(
    path: &dyn FlightPath,
    count: usize,
    interval_s: f64,
    start_timestamp: f64,
) -> Vec<FlightSample> {
    (0..count)
        .map(|i| {
            let t = i as f64 * interval_s;
            FlightSample::new(start_timestamp + t, path.speed(t), path.heading_deg(t))
        })
        .collect()
}

/// Render samples as flight-data JSON.
///
/// With `string_encoded`, speed and direction are written as strings, the
/// way drone logs commonly export them.
pub fn to_json(samples: &[FlightSample], string_encoded: bool) -> Value {
    let records: Vec<Value> = samples
        .iter()
        .map(|s| {
            if string_encoded {
                json!({
                    "timestamp": s.timestamp,
                    "speed": format!("{:.2}", s.speed),
                    "direction": format!("{:.2}", s.direction),
                })
            } else {
                json!({
                    "timestamp": s.timestamp,
                    "speed": s.speed,
                    "direction": s.direction,
                })
            }
        })
        .collect();
    Value::Array(records)
}
