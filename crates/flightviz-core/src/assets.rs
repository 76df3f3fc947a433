//! Image asset readiness.
//!
//! Assets are loaded elsewhere; this module only tracks where each one is in
//! its `Unloaded -> Loading -> Ready | Failed` lifecycle so the controller can
//! decide whether playback may start.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Background map, stretched to the surface
    Map,
    /// Drone icon drawn at the current position
    Drone,
    /// Impact marker shown at the trajectory midpoint
    Marker,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Map, AssetKind::Drone, AssetKind::Marker];
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Map => write!(f, "map"),
            AssetKind::Drone => write!(f, "drone"),
            AssetKind::Marker => write!(f, "marker"),
        }
    }
}

/// A decoded image with its intrinsic size.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub kind: AssetKind,
    pixels: Arc<RgbaImage>,
}

impl Sprite {
    pub fn new(kind: AssetKind, pixels: RgbaImage) -> Self {
        Self {
            kind,
            pixels: Arc::new(pixels),
        }
    }

    /// A fully transparent sprite of the given size.
    pub fn blank(kind: AssetKind, width: u32, height: u32) -> Self {
        Self::new(kind, RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[derive(Debug, Clone, Default)]
pub enum AssetState {
    #[default]
    Unloaded,
    Loading,
    Ready(Sprite),
    Failed(String),
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        match self {
            AssetState::Ready(sprite) => Some(sprite),
            _ => None,
        }
    }

    /// Short label for status reporting.
    pub fn label(&self) -> &'static str {
        match self {
            AssetState::Unloaded => "unloaded",
            AssetState::Loading => "loading",
            AssetState::Ready(_) => "ready",
            AssetState::Failed(_) => "failed",
        }
    }
}

/// The three assets a replay needs.
#[derive(Debug, Clone, Default)]
pub struct AssetSet {
    map: AssetState,
    drone: AssetState,
    marker: AssetState,
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three assets ready, typically for tests.
    pub fn ready(map: Sprite, drone: Sprite, marker: Sprite) -> Self {
        Self {
            map: AssetState::Ready(map),
            drone: AssetState::Ready(drone),
            marker: AssetState::Ready(marker),
        }
    }

    pub fn get(&self, kind: AssetKind) -> &AssetState {
        match kind {
            AssetKind::Map => &self.map,
            AssetKind::Drone => &self.drone,
            AssetKind::Marker => &self.marker,
        }
    }

    pub fn set(&mut self, kind: AssetKind, state: AssetState) {
        let slot = match kind {
            AssetKind::Map => &mut self.map,
            AssetKind::Drone => &mut self.drone,
            AssetKind::Marker => &mut self.marker,
        };
        *slot = state;
    }

    pub fn sprite(&self, kind: AssetKind) -> Option<&Sprite> {
        self.get(kind).sprite()
    }

    pub fn all_ready(&self) -> bool {
        AssetKind::ALL.iter().all(|kind| self.get(*kind).is_ready())
    }

    /// Assets that are not ready yet, with their current state.
    pub fn missing(&self) -> Vec<(AssetKind, &AssetState)> {
        AssetKind::ALL
            .iter()
            .map(|kind| (*kind, self.get(*kind)))
            .filter(|(_, state)| !state.is_ready())
            .collect()
    }

    /// True once no asset can still become ready.
    pub fn any_failed(&self) -> bool {
        AssetKind::ALL
            .iter()
            .any(|kind| matches!(self.get(*kind), AssetState::Failed(_)))
    }
}
