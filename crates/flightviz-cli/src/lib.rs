//! flightviz CLI - tools for producing flight data.
//!
//! - generate_flight: writes a synthetic flight in the player's JSON format

pub mod sim;

pub use sim::{sample_path, to_json, CircularPath, FlightPath, LinearPath};
