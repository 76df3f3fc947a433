//! PNG frame output.
//!
//! Frames are composed on the event loop but encoded and written by a
//! background writer, so a slow disk never holds up the playback timers.
//! The writer only ever sees the latest presented frame: frames presented
//! while a write is in progress collapse into the newest one.

use flightviz_core::{Color, Position, RasterSurface, Sprite, Stroke, Surface};
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Raster surface that publishes every completed frame to a PNG file.
///
/// Each frame replaces the previous one, so the file always holds the
/// latest frame. Writes go through a temporary file and a rename so readers
/// never see a partial image.
pub struct PngSurface {
    raster: RasterSurface,
    frames: watch::Sender<Option<RgbaImage>>,
    writer: JoinHandle<u64>,
}

impl PngSurface {
    /// Must be called from inside a tokio runtime; the writer runs as a task on it.
    pub fn new(width: u32, height: u32, path: impl Into<PathBuf>) -> Self {
        let (frames, rx) = watch::channel(None);
        let writer = tokio::spawn(write_frames(path.into(), rx));
        Self {
            raster: RasterSurface::with_background(width, height, Color::WHITE),
            frames,
            writer,
        }
    }

    /// Flush the last presented frame and return how many frames reached disk.
    pub async fn finish(self) -> u64 {
        drop(self.frames);
        match self.writer.await {
            Ok(written) => written,
            Err(e) => {
                tracing::error!("Frame writer failed: {}", e);
                0
            }
        }
    }
}

impl Surface for PngSurface {
    fn size(&self) -> (u32, u32) {
        self.raster.size()
    }

    fn clear(&mut self) {
        self.raster.clear();
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f64, y: f64, width: f64, height: f64) {
        self.raster.draw_image(sprite, x, y, width, height);
    }

    fn draw_line(&mut self, from: Position, to: Position, stroke: Stroke) {
        self.raster.draw_line(from, to, stroke);
    }

    fn present(&mut self) {
        self.frames.send_replace(Some(self.raster.image().clone()));
    }
}

async fn write_frames(path: PathBuf, mut frames: watch::Receiver<Option<RgbaImage>>) -> u64 {
    let mut written = 0;
    // Yields every unseen frame before reporting the sender gone.
    while frames.changed().await.is_ok() {
        let Some(image) = frames.borrow_and_update().clone() else {
            continue;
        };
        let target = path.clone();
        match tokio::task::spawn_blocking(move || write_png(&image, &target)).await {
            Ok(Ok(())) => written += 1,
            Ok(Err(e)) => tracing::warn!("Failed to write frame to {}: {:#}", path.display(), e),
            Err(e) => tracing::warn!("Frame write to {} aborted: {}", path.display(), e),
        }
    }
    tracing::debug!("Frame writer done after {} frames", written);
    written
}

fn write_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    image.save_with_format(&tmp, ImageFormat::Png)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
