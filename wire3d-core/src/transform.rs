//! Axis rotations and the rotation state driven by the demo
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::Error;

/// Rotation axis selector used by sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

/// Rotation state around three axes (in radians)
///
/// Angles accumulate without normalisation while animating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, radians: f32) {
        match axis {
            Axis::X => self.x = radians,
            Axis::Y => self.y = radians,
            Axis::Z => self.z = radians,
        }
    }

    /// Angles wrapped into `(-π, π]`, the range shown on the sliders
    pub fn wrapped(&self) -> RotationState {
        RotationState::new(wrap_angle(self.x), wrap_angle(self.y), wrap_angle(self.z))
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Rotate about the X axis; `x` is held fixed
pub fn rotate_x(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos)
}

/// Rotate about the Y axis; `y` is held fixed
pub fn rotate_y(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}

/// Rotate about the Z axis; `z` is held fixed
pub fn rotate_z(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

/// Apply X, then Y, then Z rotation to a single point
pub fn rotate(p: &Point3<f32>, rotation: &RotationState) -> Point3<f32> {
    rotate_z(&rotate_y(&rotate_x(p, rotation.x), rotation.y), rotation.z)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);

        // X is applied first, so it sits rightmost
        rz * ry * rx
    }

    /// Rotate every vertex once with a shared matrix
    pub fn rotate_all(points: &[Point3<f32>], rotation: &RotationState) -> Vec<Point3<f32>> {
        let matrix = Self::rotation_matrix(rotation);
        points.iter().map(|p| &matrix * p).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn samples() -> Vec<Point3<f32>> {
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(0.3, -2.0, 0.7),
        ]
    }

    fn angles() -> Vec<f32> {
        vec![0.0, 0.1, -0.7, 1.0, PI / 2.0, PI, 3.3, -5.0, 12.0]
    }

    fn close(a: &Point3<f32>, b: &Point3<f32>) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);

        state.set(Axis::Y, -1.5);
        assert_eq!(state.get(Axis::Y), -1.5);
    }

    #[test]
    fn test_rotations_preserve_length() {
        for p in samples() {
            for angle in angles() {
                for rotated in [rotate_x(&p, angle), rotate_y(&p, angle), rotate_z(&p, angle)] {
                    assert!((rotated.coords.norm() - p.coords.norm()).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_zero_angle_is_identity() {
        for p in samples() {
            assert!(close(&rotate_x(&p, 0.0), &p));
            assert!(close(&rotate_y(&p, 0.0), &p));
            assert!(close(&rotate_z(&p, 0.0), &p));
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        let turn = 2.0 * PI;
        for p in samples() {
            assert!((rotate_x(&p, turn) - p).norm() < 1e-4);
            assert!((rotate_y(&p, turn) - p).norm() < 1e-4);
            assert!((rotate_z(&p, turn) - p).norm() < 1e-4);
        }
    }

    #[test]
    fn test_quarter_turns_are_right_handed() {
        let q = PI / 2.0;
        assert!(close(&rotate_x(&Point3::new(0.0, 1.0, 0.0), q), &Point3::new(0.0, 0.0, 1.0)));
        assert!(close(&rotate_y(&Point3::new(0.0, 0.0, 1.0), q), &Point3::new(1.0, 0.0, 0.0)));
        assert!(close(&rotate_z(&Point3::new(1.0, 0.0, 0.0), q), &Point3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_matrix_matches_sequential_rotation() {
        let state = RotationState::new(0.4, -1.1, 2.3);
        let matrix = Transform::rotation_matrix(&state);
        for p in samples() {
            assert!(close(&(matrix * p), &rotate(&p, &state)));
        }
    }

    #[test]
    fn test_rotation_order_matters() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let q = PI / 2.0;
        let xyz = rotate(&p, &RotationState::new(q, q, 0.0));
        let yx = rotate_x(&rotate_y(&p, q), q);
        assert!(!close(&xyz, &yx));
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix.matrix() - nalgebra::Matrix3::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_wrapped_range() {
        let state = RotationState::new(3.0 * PI, -0.5, 7.0);
        let wrapped = state.wrapped();
        assert!((wrapped.x - PI).abs() < 1e-4);
        assert!((wrapped.y + 0.5).abs() < 1e-6);
        assert!((wrapped.z - (7.0 - 2.0 * PI)).abs() < 1e-5);
        for angle in angles() {
            let w = wrap_angle(angle);
            assert!(w > -PI && w <= PI);
        }
    }

    #[test]
    fn test_axis_parsing() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("Z".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!("w".parse::<Axis>(), Err(Error::UnknownAxis("w".to_string())));
    }
}
