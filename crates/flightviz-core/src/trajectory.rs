//! Dead-reckoning from speed/heading samples to surface positions.

use crate::models::{FlightSample, Position};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Build the pixel path for a flight.
///
/// Each sample's speed and heading hold until the next sample's timestamp,
/// so position `i` is reached by travelling from position `i - 1` with the
/// readings of sample `i - 1`. The first position is always `origin`; the
/// result has one position per sample (or just `origin` for an empty flight).
///
/// Headings follow the math convention (0° = +X, 90° = up). Surface Y grows
/// downward, so the vertical component is subtracted.
///
/// Malformed readings are not rejected: a NaN speed or heading yields NaN
/// positions from that point on.
pub fn build_trajectory(samples: &[FlightSample], origin: Position, scale: f64) -> Vec<Position> {
    let mut positions = Vec::with_capacity(samples.len().max(1));
    let mut current = origin;
    positions.push(current);

    for pair in samples.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        current = advance(current, prev, curr.timestamp - prev.timestamp, scale);
        positions.push(current);
    }

    positions
}

/// Move `from` along `reading` for `elapsed` seconds.
fn advance(from: Position, reading: &FlightSample, elapsed: f64, scale: f64) -> Position {
    let hours = elapsed / SECONDS_PER_HOUR;
    let heading = reading.direction.to_radians();
    let distance = reading.speed * hours * scale;

    Position {
        x: from.x + distance * heading.cos(),
        y: from.y - distance * heading.sin(),
    }
}

/// Index of the trajectory midpoint, where the impact marker is placed.
pub fn halfway_index(position_count: usize) -> usize {
    position_count / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Position = Position::new(200.0, 200.0);

    fn assert_close(actual: Position, x: f64, y: f64) {
        assert!((actual.x - x).abs() < 1e-9, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < 1e-9, "y: {} != {}", actual.y, y);
    }

    #[test]
    fn test_empty_flight_is_origin_only() {
        assert_eq!(build_trajectory(&[], ORIGIN, 0.5), vec![ORIGIN]);
    }

    #[test]
    fn test_single_sample_is_origin_only() {
        let samples = [FlightSample::new(0.0, 50.0, 30.0)];
        assert_eq!(build_trajectory(&samples, ORIGIN, 0.5), vec![ORIGIN]);
    }

    #[test]
    fn test_first_leg_uses_first_sample_speed() {
        let samples = [
            FlightSample::new(0.0, 0.0, 0.0),
            FlightSample::new(3600.0, 10.0, 0.0),
        ];
        let positions = build_trajectory(&samples, ORIGIN, 0.5);

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], ORIGIN);
        // First leg uses the first sample's speed, which is zero.
        assert_close(positions[1], 200.0, 200.0);
    }

    #[test]
    fn test_leg_uses_previous_sample_reading() {
        let samples = [
            FlightSample::new(0.0, 10.0, 0.0),
            FlightSample::new(3600.0, 99.0, 180.0),
        ];
        let positions = build_trajectory(&samples, ORIGIN, 0.5);
        assert_close(positions[1], 205.0, 200.0);
    }

    #[test]
    fn test_heading_north_moves_up() {
        let samples = [
            FlightSample::new(0.0, 10.0, 90.0),
            FlightSample::new(3600.0, 10.0, 90.0),
        ];
        let positions = build_trajectory(&samples, ORIGIN, 0.5);
        assert_close(positions[1], 200.0, 195.0);
    }

    #[test]
    fn test_positions_accumulate() {
        let samples = [
            FlightSample::new(0.0, 20.0, 0.0),
            FlightSample::new(1800.0, 20.0, 270.0),
            FlightSample::new(3600.0, 20.0, 180.0),
            FlightSample::new(5400.0, 0.0, 0.0),
        ];
        let positions = build_trajectory(&samples, ORIGIN, 1.0);

        assert_eq!(positions.len(), samples.len());
        assert_close(positions[1], 210.0, 200.0);
        assert_close(positions[2], 210.0, 210.0);
        assert_close(positions[3], 200.0, 210.0);
    }

    #[test]
    fn test_nan_reading_propagates() {
        let samples = [
            FlightSample::new(0.0, f64::NAN, 0.0),
            FlightSample::new(60.0, 10.0, 0.0),
            FlightSample::new(120.0, 10.0, 0.0),
        ];
        let positions = build_trajectory(&samples, ORIGIN, 0.5);

        assert_eq!(positions.len(), 3);
        assert!(positions[0].is_finite());
        assert!(!positions[1].is_finite());
        assert!(!positions[2].is_finite());
    }

    #[test]
    fn test_deterministic() {
        let samples: Vec<FlightSample> = (0..50)
            .map(|i| FlightSample::new(i as f64 * 7.0, 30.0 + i as f64, i as f64 * 13.0))
            .collect();
        assert_eq!(
            build_trajectory(&samples, ORIGIN, 0.5),
            build_trajectory(&samples, ORIGIN, 0.5)
        );
    }

    #[test]
    fn test_halfway_index() {
        assert_eq!(halfway_index(0), 0);
        assert_eq!(halfway_index(1), 0);
        assert_eq!(halfway_index(5), 2);
        assert_eq!(halfway_index(100), 50);
    }
}
