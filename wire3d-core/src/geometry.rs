//! Shape library: vertex and face data for the demo solids
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use nalgebra::Point3;

use crate::color::Rgb;
use crate::error::Error;

pub const CUBE_COLOR: Rgb = Rgb::from_hex(0x3b82f6);
pub const PYRAMID_COLOR: Rgb = Rgb::from_hex(0xf59e0b);
pub const SPHERE_COLOR: Rgb = Rgb::from_hex(0x10b981);

pub const DEFAULT_SPHERE_RADIUS: f32 = 1.0;
pub const DEFAULT_SPHERE_SEGMENTS: usize = 16;

/// Names of the solids the library can supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeName {
    #[default]
    Cube,
    Pyramid,
    Sphere,
}

impl ShapeName {
    pub const ALL: [ShapeName; 3] = [ShapeName::Cube, ShapeName::Pyramid, ShapeName::Sphere];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::Cube => "cube",
            ShapeName::Pyramid => "pyramid",
            ShapeName::Sphere => "sphere",
        }
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cube" => Ok(ShapeName::Cube),
            "pyramid" => Ok(ShapeName::Pyramid),
            "sphere" => Ok(ShapeName::Sphere),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

/// A polygon given as indices into its shape's vertex list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: &[usize]) -> Self {
        Self {
            indices: indices.to_vec(),
        }
    }
}

/// An immutable solid: vertices in object space, faces and a base colour
#[derive(Debug, Clone)]
pub struct Shape {
    pub name: ShapeName,
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
    pub color: Rgb,
}

impl Shape {
    /// Unit cube with corners at (±1, ±1, ±1)
    pub fn cube() -> Self {
        let vertices = vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ];

        let faces = vec![
            Face::new(&[0, 1, 2, 3]), // Back
            Face::new(&[4, 5, 6, 7]), // Front
            Face::new(&[0, 4, 7, 3]), // Left
            Face::new(&[1, 5, 6, 2]), // Right
            Face::new(&[3, 2, 6, 7]), // Top
            Face::new(&[0, 1, 5, 4]), // Bottom
        ];

        Self {
            name: ShapeName::Cube,
            vertices,
            faces,
            color: CUBE_COLOR,
        }
    }

    /// Square base at y = -1 with the apex at (0, 1, 0)
    pub fn pyramid() -> Self {
        let vertices = vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let faces = vec![
            Face::new(&[0, 1, 2, 3]),
            Face::new(&[0, 1, 4]),
            Face::new(&[1, 2, 4]),
            Face::new(&[2, 3, 4]),
            Face::new(&[3, 0, 4]),
        ];

        Self {
            name: ShapeName::Pyramid,
            vertices,
            faces,
            color: PYRAMID_COLOR,
        }
    }

    /// UV sphere sampled on a `(lat_segments + 1) x (lon_segments + 1)` grid.
    ///
    /// The first and last rows collapse onto the poles, so the triangles
    /// touching them are degenerate and draw with zero area.
    pub fn sphere(radius: f32, lat_segments: usize, lon_segments: usize) -> Self {
        let lat_segments = lat_segments.max(1);
        let lon_segments = lon_segments.max(1);
        let row = lon_segments + 1;

        let mut vertices = Vec::with_capacity((lat_segments + 1) * row);
        for i in 0..=lat_segments {
            let theta = i as f32 * PI / lat_segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for j in 0..=lon_segments {
                let phi = j as f32 * 2.0 * PI / lon_segments as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();
                vertices.push(Point3::new(
                    radius * sin_theta * cos_phi,
                    radius * cos_theta,
                    radius * sin_theta * sin_phi,
                ));
            }
        }

        let mut faces = Vec::with_capacity(2 * lat_segments * lon_segments);
        for i in 0..lat_segments {
            for j in 0..lon_segments {
                let a = i * row + j;
                let b = a + 1;
                let c = (i + 1) * row + j;
                let d = c + 1;
                faces.push(Face::new(&[a, b, c]));
                faces.push(Face::new(&[c, d, b]));
            }
        }

        log::info!(
            "generated sphere (r={}, {}x{}): {} vertices, {} faces",
            radius,
            lat_segments,
            lon_segments,
            vertices.len(),
            faces.len()
        );

        Self {
            name: ShapeName::Sphere,
            vertices,
            faces,
            color: SPHERE_COLOR,
        }
    }
}

/// Holds one instance of every shape, built once and reused for each frame
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    cube: Shape,
    pyramid: Shape,
    sphere: Shape,
}

impl ShapeLibrary {
    pub fn new() -> Self {
        Self::with_sphere(
            DEFAULT_SPHERE_RADIUS,
            DEFAULT_SPHERE_SEGMENTS,
            DEFAULT_SPHERE_SEGMENTS,
        )
    }

    pub fn with_sphere(radius: f32, lat_segments: usize, lon_segments: usize) -> Self {
        Self {
            cube: Shape::cube(),
            pyramid: Shape::pyramid(),
            sphere: Shape::sphere(radius, lat_segments, lon_segments),
        }
    }

    /// Process-wide library with the default sphere resolution
    pub fn shared() -> Arc<ShapeLibrary> {
        static LIBRARY: OnceLock<Arc<ShapeLibrary>> = OnceLock::new();
        LIBRARY.get_or_init(|| Arc::new(ShapeLibrary::new())).clone()
    }

    pub fn get(&self, name: ShapeName) -> &Shape {
        match name {
            ShapeName::Cube => &self.cube,
            ShapeName::Pyramid => &self.pyramid,
            ShapeName::Sphere => &self.sphere,
        }
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}
