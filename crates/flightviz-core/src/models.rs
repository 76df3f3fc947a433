//! Core data models for flight replays.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// One timestamped speed/heading reading from a drone.
///
/// The source data encodes `speed` and `direction` either as JSON numbers or
/// as numeric strings. Both are accepted. Anything else (strings that do not
/// start with a number, `null`, booleans, nested values, a missing field)
/// decodes to NaN rather than failing the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSample {
    /// Seconds (or any unit where 3600 units make an hour)
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub timestamp: f64,
    /// Speed in distance units per hour
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub speed: f64,
    /// Heading in degrees, 0 = +X, counter-clockwise
    #[serde(deserialize_with = "lenient_f64", default = "nan")]
    pub direction: f64,
}

impl FlightSample {
    pub fn new(timestamp: f64, speed: f64, direction: f64) -> Self {
        Self {
            timestamp,
            speed,
            direction,
        }
    }
}

/// A point in drawing-surface coordinates (Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStatus {
    #[default]
    Idle,
    Running,
}

/// Mutable playback state, owned by the animation controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnimationState {
    /// Next trajectory index to draw, in `[0, positions.len()]`
    pub current_index: usize,
    pub running: bool,
    pub marker_visible: bool,
    /// Set when the marker is shown; kept after it hides until the next stop
    pub marker_position: Option<Position>,
}

impl AnimationState {
    pub fn status(&self) -> AnimationStatus {
        if self.running {
            AnimationStatus::Running
        } else {
            AnimationStatus::Idle
        }
    }

    /// Return to the rest state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn nan() -> f64 {
    f64::NAN
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => n,
        RawNumber::Text(s) => parse_lenient(&s),
        RawNumber::Other(_) => f64::NAN,
    })
}

/// Decode the longest numeric prefix of `text`, or NaN when there is none.
///
/// `" 12.5km"` decodes to 12.5, `"-3e2"` to -300, `"abc"` to NaN.
pub fn parse_lenient(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let rest = &text[end..];
    if rest.starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Only consume an exponent if at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].trim_end_matches('.').parse().unwrap_or(f64::NAN)
}
