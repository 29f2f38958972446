//! Fixed-camera perspective projection
use nalgebra::{Point2, Point3};

pub const DEFAULT_DISTANCE: f32 = 5.0;
pub const DEFAULT_SCALE: f32 = 100.0;

/// Perspective divide by `z + distance`, scaled and centred on the canvas.
///
/// The divide is singular at `z == -distance`. Every built-in shape stays
/// within unit radius, so with the default distance the denominator never
/// drops below 4. Larger solids must keep `|z| < distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub distance: f32,
    pub scale: f32,
}

impl Projection {
    pub fn new(distance: f32, scale: f32) -> Self {
        Self { distance, scale }
    }

    /// Project a rotated point to screen space on a `width` x `height` canvas
    pub fn project(&self, p: &Point3<f32>, width: u32, height: u32) -> Point2<f32> {
        let depth = p.z + self.distance;
        let x = (p.x * self.distance) / depth * self.scale + width as f32 / 2.0;
        let y = (p.y * self.distance) / depth * self.scale + height as f32 / 2.0;
        Point2::new(x, y)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::transform::{rotate, RotationState};

    #[test]
    fn test_cube_corner_projection() {
        let cube = Shape::cube();
        let rotated = rotate(&cube.vertices[0], &RotationState::zero());
        let screen = Projection::default().project(&rotated, 600, 400);
        assert!((screen.x - 175.0).abs() < 1e-4);
        assert!((screen.y - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_origin_maps_to_center() {
        let screen = Projection::default().project(&Point3::origin(), 800, 600);
        assert_eq!(screen, Point2::new(400.0, 300.0));
    }

    // Holds for points in front of the origin (z < 0). At z == 0 the
    // offset is independent of distance and for z > 0 it grows instead.
    #[test]
    fn test_larger_distance_moves_toward_center() {
        let center = Point2::new(300.0, 200.0);
        let points = [
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, 0.5, -0.8),
            Point3::new(0.2, -0.9, -0.1),
        ];
        for p in &points {
            let mut previous = f32::INFINITY;
            for distance in [2.0, 3.0, 5.0, 8.0, 20.0, 100.0] {
                let screen = Projection::new(distance, DEFAULT_SCALE).project(p, 600, 400);
                let offset = (screen - center).norm();
                assert!(offset < previous, "distance {} did not weaken perspective", distance);
                previous = offset;
            }
        }
    }

    #[test]
    fn test_depth_independent_at_zero_z() {
        let p = Point3::new(1.0, -1.0, 0.0);
        let near = Projection::new(2.0, DEFAULT_SCALE).project(&p, 600, 400);
        let far = Projection::new(50.0, DEFAULT_SCALE).project(&p, 600, 400);
        assert!((near - far).norm() < 1e-3);
    }
}
