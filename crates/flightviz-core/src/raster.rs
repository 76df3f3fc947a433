//! In-memory RGBA canvas.

use crate::assets::Sprite;
use crate::config::{Color, Stroke};
use crate::models::Position;
use crate::surface::Surface;
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use std::path::Path;

/// A [`Surface`] backed by an `RgbaImage`.
pub struct RasterSurface {
    canvas: RgbaImage,
    background: Color,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let mut surface = Self {
            canvas: RgbaImage::new(width, height),
            background,
        };
        surface.clear();
        surface
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.canvas.width() || y >= self.canvas.height() {
            return None;
        }
        let [r, g, b, a] = self.canvas.get_pixel(x, y).0;
        Some(Color { r, g, b, a })
    }

    /// Write the canvas as an image file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.canvas.save(path)
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn clear(&mut self) {
        let fill = rgba(self.background);
        for pixel in self.canvas.pixels_mut() {
            *pixel = fill;
        }
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f64, y: f64, width: f64, height: f64) {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return;
        }
        let (w, h) = (width.round(), height.round());
        if w < 1.0 || h < 1.0 || w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
            return;
        }
        let (w, h) = (w as u32, h as u32);
        let (left, top) = (x.round() as i64, y.round() as i64);

        if sprite.width() == w && sprite.height() == h {
            imageops::overlay(&mut self.canvas, sprite.pixels(), left, top);
        } else {
            let scaled = imageops::resize(sprite.pixels(), w, h, FilterType::Triangle);
            imageops::overlay(&mut self.canvas, &scaled, left, top);
        }
    }

    fn draw_line(&mut self, from: Position, to: Position, stroke: Stroke) {
        if !from.is_finite() || !to.is_finite() || stroke.width <= 0.0 {
            return;
        }
        let radius = stroke.width / 2.0;
        let (width, height) = self.canvas.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        // Only visit the part of the segment's bounding box that lies on the canvas.
        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(f64::from(width - 1));
        let max_y = (from.y.max(to.y) + radius).ceil().min(f64::from(height - 1));
        if min_x > max_x || min_y > max_y {
            return;
        }

        let color = rgba(stroke.color);
        for py in min_y as u32..=max_y as u32 {
            for px in min_x as u32..=max_x as u32 {
                let center = Position::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.canvas.get_pixel_mut(px, py).blend(&color);
                }
            }
        }
    }
}

fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;

    fn solid(kind: AssetKind, width: u32, height: u32, color: Color) -> Sprite {
        Sprite::new(kind, RgbaImage::from_pixel(width, height, rgba(color)))
    }

    #[test]
    fn test_clear_fills_background() {
        let surface = RasterSurface::with_background(8, 8, Color::WHITE);
        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_map_is_stretched_to_surface() {
        let mut surface = RasterSurface::new(40, 40);
        let map = solid(AssetKind::Map, 4, 4, Color::rgb(0, 255, 0));

        surface.draw_image(&map, 0.0, 0.0, 40.0, 40.0);

        // Resampling a flat colour may be off by one.
        for (x, y) in [(0, 0), (20, 20), (39, 39)] {
            let pixel = surface.pixel(x, y).unwrap();
            assert!(pixel.g >= 254 && pixel.r <= 1 && pixel.b <= 1, "{pixel:?}");
            assert!(pixel.a >= 254);
        }
    }

    #[test]
    fn test_image_is_clipped_at_edges() {
        let mut surface = RasterSurface::new(10, 10);
        let drone = solid(AssetKind::Drone, 4, 4, Color::rgb(255, 0, 0));

        surface.draw_image(&drone, -2.0, -2.0, 4.0, 4.0);

        assert_eq!(surface.pixel(0, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(1, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_line_covers_stroke_width() {
        let mut surface = RasterSurface::with_background(20, 20, Color::WHITE);
        surface.draw_line(
            Position::new(2.0, 10.0),
            Position::new(18.0, 10.0),
            Stroke::default(),
        );

        assert_eq!(surface.pixel(10, 9), Some(Color::BLACK));
        assert_eq!(surface.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(10, 13), Some(Color::WHITE));
        assert_eq!(surface.pixel(10, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_non_finite_line_is_skipped() {
        let mut surface = RasterSurface::with_background(10, 10, Color::WHITE);
        surface.draw_line(
            Position::new(f64::NAN, 1.0),
            Position::new(5.0, 5.0),
            Stroke::default(),
        );
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_offscreen_line_is_skipped() {
        let mut surface = RasterSurface::with_background(10, 10, Color::WHITE);
        surface.draw_line(
            Position::new(-500.0, -500.0),
            Position::new(-400.0, -450.0),
            Stroke::default(),
        );
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
