//! Flight replay player: loads a flight and its assets, then replays the
//! trajectory on a timer with start/stop controls.

pub mod config;
pub mod control;
pub mod controller;
pub mod loader;
pub mod output;
pub mod player;
pub mod source;

pub use config::Config;
pub use control::Control;
pub use controller::{AnimationController, AnimationEvent, StartBlocked};
pub use output::PngSurface;
pub use player::{run_player, PlayerOptions};
