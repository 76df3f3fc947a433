//! Frame composition.
//!
//! Draw order is map, trajectory, drone, marker; later layers cover earlier
//! ones.

use crate::assets::{AssetKind, AssetSet, Sprite};
use crate::config::Stroke;
use crate::error::RenderError;
use crate::models::Position;
use crate::surface::Surface;

/// Inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Trajectory index of the drone, inclusive end of the drawn path
    pub index: usize,
    pub positions: &'a [Position],
    pub marker_visible: bool,
    pub marker_position: Option<Position>,
}

impl<'a> Frame<'a> {
    /// A frame without the marker.
    pub fn at(index: usize, positions: &'a [Position]) -> Self {
        Self {
            index,
            positions,
            marker_visible: false,
            marker_position: None,
        }
    }
}

/// Draw `frame` onto `surface`.
///
/// Assets that are not ready are skipped. An empty trajectory or an index
/// past its end is rejected before anything is drawn.
pub fn render_frame<S>(
    surface: &mut S,
    frame: &Frame<'_>,
    assets: &AssetSet,
    stroke: Stroke,
) -> Result<(), RenderError>
where
    S: Surface + ?Sized,
{
    let len = frame.positions.len();
    if len == 0 {
        return Err(RenderError::EmptyTrajectory);
    }
    if frame.index >= len {
        return Err(RenderError::IndexOutOfRange {
            index: frame.index,
            len,
        });
    }

    surface.clear();

    if let Some(map) = assets.sprite(AssetKind::Map) {
        let (width, height) = surface.size();
        surface.draw_image(map, 0.0, 0.0, f64::from(width), f64::from(height));
    }

    for pair in frame.positions[..=frame.index].windows(2) {
        surface.draw_line(pair[0], pair[1], stroke);
    }

    if let Some(drone) = assets.sprite(AssetKind::Drone) {
        draw_centered(surface, drone, frame.positions[frame.index]);
    }

    if frame.marker_visible {
        let marker = assets.sprite(AssetKind::Marker);
        if let (Some(marker), Some(at)) = (marker, frame.marker_position) {
            draw_centered(surface, marker, at);
        }
    }

    surface.present();
    Ok(())
}

/// Draw `sprite` at its intrinsic size with its midpoint on `at`.
fn draw_centered<S>(surface: &mut S, sprite: &Sprite, at: Position)
where
    S: Surface + ?Sized,
{
    let width = f64::from(sprite.width());
    let height = f64::from(sprite.height());
    surface.draw_image(sprite, at.x - width / 2.0, at.y - height / 2.0, width, height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn assets() -> AssetSet {
        AssetSet::ready(
            Sprite::blank(AssetKind::Map, 64, 64),
            Sprite::blank(AssetKind::Drone, 20, 10),
            Sprite::blank(AssetKind::Marker, 30, 30),
        )
    }

    fn path() -> Vec<Position> {
        vec![
            Position::new(200.0, 200.0),
            Position::new(210.0, 200.0),
            Position::new(210.0, 190.0),
        ]
    }

    #[test]
    fn test_draw_order() {
        let mut surface = RecordingSurface::new(400, 400);
        let positions = path();
        let frame = Frame {
            index: 2,
            positions: &positions,
            marker_visible: true,
            marker_position: Some(positions[1]),
        };

        render_frame(&mut surface, &frame, &assets(), Stroke::default()).unwrap();

        let stroke = Stroke::default();
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Clear,
                DrawCommand::Image {
                    kind: AssetKind::Map,
                    x: 0.0,
                    y: 0.0,
                    width: 400.0,
                    height: 400.0,
                },
                DrawCommand::Line {
                    from: positions[0],
                    to: positions[1],
                    stroke,
                },
                DrawCommand::Line {
                    from: positions[1],
                    to: positions[2],
                    stroke,
                },
                DrawCommand::Image {
                    kind: AssetKind::Drone,
                    x: 200.0,
                    y: 185.0,
                    width: 20.0,
                    height: 10.0,
                },
                DrawCommand::Image {
                    kind: AssetKind::Marker,
                    x: 195.0,
                    y: 185.0,
                    width: 30.0,
                    height: 30.0,
                },
                DrawCommand::Present,
            ]
        );
    }

    #[test]
    fn test_index_zero_draws_no_segments() {
        let mut surface = RecordingSurface::new(400, 400);
        let positions = path();

        let frame = Frame::at(0, &positions);
        render_frame(&mut surface, &frame, &assets(), Stroke::default()).unwrap();

        assert!(!surface
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
        assert!(surface.commands().contains(&DrawCommand::Image {
            kind: AssetKind::Drone,
            x: 190.0,
            y: 195.0,
            width: 20.0,
            height: 10.0,
        }));
    }

    #[test]
    fn test_marker_needs_flag_and_position() {
        let positions = path();
        let has_marker = |frame: Frame<'_>| {
            let mut surface = RecordingSurface::new(400, 400);
            render_frame(&mut surface, &frame, &assets(), Stroke::default()).unwrap();
            surface
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Image { kind: AssetKind::Marker, .. }))
        };

        let mut frame = Frame::at(1, &positions);
        assert!(!has_marker(frame));

        frame.marker_position = Some(positions[1]);
        assert!(!has_marker(frame));

        frame.marker_visible = true;
        assert!(has_marker(frame));

        frame.marker_position = None;
        assert!(!has_marker(frame));
    }

    #[test]
    fn test_unready_assets_are_skipped() {
        let mut surface = RecordingSurface::new(400, 400);
        let positions = path();

        render_frame(&mut surface, &Frame::at(1, &positions), &AssetSet::new(), Stroke::default())
            .unwrap();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Clear,
                DrawCommand::Line {
                    from: positions[0],
                    to: positions[1],
                    stroke: Stroke::default(),
                },
                DrawCommand::Present,
            ]
        );
    }

    #[test]
    fn test_empty_trajectory_is_rejected() {
        let mut surface = RecordingSurface::new(400, 400);
        let err = render_frame(&mut surface, &Frame::at(0, &[]), &assets(), Stroke::default());

        assert_eq!(err, Err(RenderError::EmptyTrajectory));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_index_past_end_is_rejected() {
        let mut surface = RecordingSurface::new(400, 400);
        let positions = path();
        let frame = Frame::at(3, &positions);
        let err = render_frame(&mut surface, &frame, &assets(), Stroke::default());

        assert_eq!(err, Err(RenderError::IndexOutOfRange { index: 3, len: 3 }));
        assert!(surface.commands().is_empty());
    }
}
