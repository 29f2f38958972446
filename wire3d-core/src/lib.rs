//! Wire3D Core Library - Software wireframe renderer
//!
//! Builds the demo solids, rotates and projects them, and paints each frame
//! onto any [`Surface`]. A [`RenderSession`] holds the per-demo state and
//! its animation loop, driven by a [`FrameScheduler`] supplied by the
//! front end.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod painter;
pub mod projection;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::{Rgb, Rgba};
pub use config::RenderConfig;
pub use error::Error;
pub use geometry::{Face, Shape, ShapeLibrary, ShapeName};
pub use painter::Painter;
pub use projection::Projection;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use session::{AnimationState, RenderSession};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use transform::{rotate, rotate_x, rotate_y, rotate_z, Axis, RotationState, Transform};
