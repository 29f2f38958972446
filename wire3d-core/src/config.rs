//! Tunable constants for a render session
use std::sync::Arc;

use crate::geometry::{ShapeLibrary, DEFAULT_SPHERE_RADIUS, DEFAULT_SPHERE_SEGMENTS};
use crate::projection::Projection;
use crate::transform::RotationState;

/// Rotation added on every animation tick (radians per frame)
pub const TICK_DELTA: RotationState = RotationState {
    x: 0.01,
    y: 0.02,
    z: 0.005,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub projection: Projection,
    pub sphere_radius: f32,
    pub sphere_lat_segments: usize,
    pub sphere_lon_segments: usize,
    pub tick_delta: RotationState,
}

impl RenderConfig {
    pub fn with_sphere_segments(mut self, segments: usize) -> Self {
        self.sphere_lat_segments = segments;
        self.sphere_lon_segments = segments;
        self
    }

    /// Shape library for this configuration; the shared instance when the
    /// sphere parameters are the defaults
    pub fn library(&self) -> Arc<ShapeLibrary> {
        if self.sphere_radius == DEFAULT_SPHERE_RADIUS
            && self.sphere_lat_segments == DEFAULT_SPHERE_SEGMENTS
            && self.sphere_lon_segments == DEFAULT_SPHERE_SEGMENTS
        {
            ShapeLibrary::shared()
        } else {
            Arc::new(ShapeLibrary::with_sphere(
                self.sphere_radius,
                self.sphere_lat_segments,
                self.sphere_lon_segments,
            ))
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            sphere_radius: DEFAULT_SPHERE_RADIUS,
            sphere_lat_segments: DEFAULT_SPHERE_SEGMENTS,
            sphere_lon_segments: DEFAULT_SPHERE_SEGMENTS,
            tick_delta: TICK_DELTA,
        }
    }
}
