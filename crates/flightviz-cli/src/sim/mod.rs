//! Synthetic flights.
//!
//! Paths describe how speed and heading evolve over time; sampling them
//! yields the same speed/heading records a real drone log contains.

mod paths;

pub use paths::{sample_path, to_json, CircularPath, FlightPath, LinearPath};
