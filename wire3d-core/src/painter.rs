//! Draws a rotated shape onto a [`Surface`]
use nalgebra::Point3;

use crate::color::{Rgb, Rgba};
use crate::geometry::Shape;
use crate::projection::Projection;
use crate::surface::Surface;
use crate::transform::{RotationState, Transform};

pub const BACKGROUND: Rgba = Rgba::new(15, 23, 42, 1.0);
pub const OUTLINE: Rgba = Rgba::new(226, 232, 240, 0.35);
pub const OUTLINE_WIDTH: f32 = 1.0;
pub const FACE_ALPHA: f32 = 0.9;

/// Faces whose rotated centroid lies at or behind this depth are skipped
pub const VISIBILITY_THRESHOLD: f32 = -2.0;
pub const MIN_BRIGHTNESS: f32 = 0.3;

pub const AXIS_LENGTH: f32 = 1.0;
pub const AXIS_WIDTH: f32 = 2.0;
const AXES: [([f32; 3], Rgba); 3] = [
    ([AXIS_LENGTH, 0.0, 0.0], Rgba::new(239, 68, 68, 1.0)),
    ([0.0, AXIS_LENGTH, 0.0], Rgba::new(34, 197, 94, 1.0)),
    ([0.0, 0.0, AXIS_LENGTH], Rgba::new(59, 130, 246, 1.0)),
];

/// Depth cue for a face centroid: brighter as `z` grows, never below 0.3
pub fn brightness(centroid_z: f32) -> f32 {
    ((centroid_z + 3.0) / 4.0).max(MIN_BRIGHTNESS)
}

pub fn face_color(base: Rgb, centroid_z: f32) -> Rgba {
    base.shade(brightness(centroid_z)).with_alpha(FACE_ALPHA)
}

/// Renders faces in declaration order followed by the axis gizmo.
///
/// There is no depth buffer; the centroid test only drops faces far behind
/// the origin, which is enough for convex unit-radius solids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter {
    pub projection: Projection,
}

impl Painter {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn paint<S: Surface + ?Sized>(&self, shape: &Shape, rotation: &RotationState, surface: &mut S) {
        let (width, height) = (surface.width(), surface.height());
        surface.clear(BACKGROUND);

        let rotated = Transform::rotate_all(&shape.vertices, rotation);
        let screen: Vec<_> = rotated
            .iter()
            .map(|p| self.projection.project(p, width, height))
            .collect();

        for face in &shape.faces {
            let Some((&first, rest)) = face.indices.split_first() else {
                continue;
            };

            let centroid_z =
                face.indices.iter().map(|&i| rotated[i].z).sum::<f32>() / face.indices.len() as f32;
            if centroid_z <= VISIBILITY_THRESHOLD {
                continue;
            }

            surface.begin_path();
            surface.move_to(screen[first].x, screen[first].y);
            for &i in rest {
                surface.line_to(screen[i].x, screen[i].y);
            }
            surface.close_path();
            surface.fill(face_color(shape.color, centroid_z));
            surface.stroke(OUTLINE, OUTLINE_WIDTH);
        }

        self.paint_axes(rotation, surface, width, height);
    }

    fn paint_axes<S: Surface + ?Sized>(
        &self,
        rotation: &RotationState,
        surface: &mut S,
        width: u32,
        height: u32,
    ) {
        let matrix = Transform::rotation_matrix(rotation);
        let origin = self.projection.project(&Point3::origin(), width, height);

        for ([x, y, z], color) in AXES {
            let tip = self.projection.project(&(matrix * Point3::new(x, y, z)), width, height);
            surface.begin_path();
            surface.move_to(origin.x, origin.y);
            surface.line_to(tip.x, tip.y);
            surface.stroke(color, AXIS_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Face, ShapeName, CUBE_COLOR};
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn test_brightness_curve() {
        assert!((brightness(1.0) - 1.0).abs() < 1e-6);
        assert!((brightness(-1.0) - 0.5).abs() < 1e-6);
        assert!((brightness(-1.8) - 0.3).abs() < 1e-6);
        assert!((brightness(-2.5) - MIN_BRIGHTNESS).abs() < 1e-6);
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let mut surface = RecordingSurface::new(600, 400);
        Painter::default().paint(&Shape::cube(), &RotationState::zero(), &mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Clear(BACKGROUND));
    }

    #[test]
    fn test_cube_draws_every_face_then_axes() {
        let mut surface = RecordingSurface::new(600, 400);
        Painter::default().paint(&Shape::cube(), &RotationState::zero(), &mut surface);

        assert_eq!(surface.fills().count(), 6);
        let strokes: Vec<_> = surface.strokes().collect();
        assert_eq!(strokes.len(), 6 + 3);
        assert!(strokes[..6].iter().all(|(c, w)| **c == OUTLINE && *w == OUTLINE_WIDTH));
        let axis_colors: Vec<Rgba> = strokes[6..].iter().map(|(c, _)| **c).collect();
        assert_eq!(axis_colors, AXES.iter().map(|(_, c)| *c).collect::<Vec<_>>());
    }

    #[test]
    fn test_face_shading_follows_depth() {
        let mut surface = RecordingSurface::new(600, 400);
        Painter::default().paint(&Shape::cube(), &RotationState::zero(), &mut surface);

        let fills: Vec<Rgba> = surface.fills().copied().collect();
        // Back face (z = -1) then front face (z = 1)
        assert_eq!(fills[0], CUBE_COLOR.shade(0.5).with_alpha(FACE_ALPHA));
        assert_eq!(fills[1], CUBE_COLOR.with_alpha(FACE_ALPHA));
        // Side faces have centroid z = 0
        assert_eq!(fills[2], CUBE_COLOR.shade(0.75).with_alpha(FACE_ALPHA));
    }

    #[test]
    fn test_face_path_uses_projected_vertices() {
        let mut surface = RecordingSurface::new(600, 400);
        Painter::default().paint(&Shape::cube(), &RotationState::zero(), &mut surface);

        assert_eq!(surface.commands[1], DrawCommand::BeginPath);
        match surface.commands[2] {
            DrawCommand::MoveTo(x, y) => {
                assert!((x - 175.0).abs() < 1e-4);
                assert!((y - 75.0).abs() < 1e-4);
            }
            ref other => panic!("expected MoveTo, got {:?}", other),
        }
        assert!(matches!(surface.commands[5], DrawCommand::LineTo(..)));
        assert_eq!(surface.commands[6], DrawCommand::ClosePath);
    }

    #[test]
    fn test_faces_far_behind_are_skipped() {
        let shape = Shape {
            name: ShapeName::Cube,
            vertices: vec![
                Point3::new(-1.0, -1.0, -2.5),
                Point3::new(1.0, -1.0, -2.5),
                Point3::new(0.0, 1.0, -2.5),
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![Face::new(&[0, 1, 2]), Face::new(&[3, 4, 5])],
            color: CUBE_COLOR,
        };

        let mut surface = RecordingSurface::new(600, 400);
        Painter::default().paint(&shape, &RotationState::zero(), &mut surface);
        assert_eq!(surface.fills().count(), 1);
    }

    #[test]
    fn test_axes_follow_rotation() {
        let mut surface = RecordingSurface::new(600, 400);
        let quarter = RotationState::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        Painter::default().paint(&Shape::pyramid(), &quarter, &mut surface);

        // X axis tip rotated onto +Y: same column as the origin, below it on screen
        let n = surface.commands.len();
        let x_axis = &surface.commands[n - 12..n - 8];
        match (x_axis[1].clone(), x_axis[2].clone()) {
            (DrawCommand::MoveTo(ox, oy), DrawCommand::LineTo(tx, ty)) => {
                assert!((ox - 300.0).abs() < 1e-3 && (oy - 200.0).abs() < 1e-3);
                assert!((tx - 300.0).abs() < 1e-3);
                assert!((ty - 300.0).abs() < 1e-3);
            }
            other => panic!("unexpected axis commands {:?}", other),
        }
    }
}
