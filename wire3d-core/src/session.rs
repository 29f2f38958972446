//! Per-demo render state and its animation state machine
use std::mem;
use std::sync::Arc;

use crate::config::RenderConfig;
use crate::geometry::{Shape, ShapeLibrary, ShapeName};
use crate::painter::Painter;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use crate::transform::{Axis, RotationState};

/// Whether a frame callback is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    /// Exactly one frame is pending while animating
    Animating { pending: FrameHandle },
}

/// One open instance of the demo.
///
/// The session owns its scheduler, so every pending frame belongs to it and
/// is cancelled when animation stops, the rotation is reset, or the session
/// is destroyed or dropped.
pub struct RenderSession<S: FrameScheduler> {
    rotation: RotationState,
    shape: ShapeName,
    animation: AnimationState,
    scheduler: S,
    library: Arc<ShapeLibrary>,
    painter: Painter,
    tick_delta: RotationState,
    needs_redraw: bool,
    destroyed: bool,
}

impl<S: FrameScheduler> RenderSession<S> {
    pub fn new(shape: ShapeName, scheduler: S) -> Self {
        Self::with_config(shape, scheduler, &RenderConfig::default())
    }

    pub fn with_config(shape: ShapeName, scheduler: S, config: &RenderConfig) -> Self {
        log::debug!("creating render session for {}", shape);
        Self {
            rotation: RotationState::zero(),
            shape,
            animation: AnimationState::Idle,
            scheduler,
            library: config.library(),
            painter: Painter::new(config.projection),
            tick_delta: config.tick_delta,
            needs_redraw: true,
            destroyed: false,
        }
    }

    pub fn shape_name(&self) -> ShapeName {
        self.shape
    }

    pub fn shape(&self) -> &Shape {
        self.library.get(self.shape)
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Rotation as shown on the sliders, wrapped into `(-π, π]`
    pub fn slider_values(&self) -> RotationState {
        self.rotation.wrapped()
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.animation, AnimationState::Animating { .. })
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True when state changed since the last [`render_frame`](Self::render_frame)
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw && !self.destroyed
    }

    /// Ask for a repaint without changing any state, e.g. after a resize
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Switch solids, keeping rotation and animation as they are
    pub fn set_shape(&mut self, name: ShapeName) {
        if self.destroyed {
            return;
        }
        self.shape = name;
        self.needs_redraw = true;
    }

    /// Set one axis from its slider. While animating the next tick continues
    /// from this value.
    pub fn set_rotation(&mut self, axis: Axis, radians: f32) {
        if self.destroyed {
            return;
        }
        self.rotation.set(axis, radians);
        self.needs_redraw = true;
    }

    /// Flip between idle and animating; returns whether animation is now on
    pub fn toggle_animation(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        match self.animation {
            AnimationState::Idle => match self.scheduler.request_frame() {
                Some(pending) => {
                    self.animation = AnimationState::Animating { pending };
                    log::debug!("animation started");
                }
                None => log::warn!("frame request refused, staying idle"),
            },
            AnimationState::Animating { .. } => {
                self.stop();
                log::debug!("animation stopped");
            }
        }
        self.is_animating()
    }

    /// Zero the rotation and stop animating
    pub fn reset_rotation(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.rotation = RotationState::zero();
        self.needs_redraw = true;
    }

    /// Deliver a scheduled frame.
    ///
    /// Only the currently pending handle advances the animation; anything
    /// else (cancelled, stale, or after teardown) is ignored. Returns whether
    /// the tick was applied.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        match self.animation {
            AnimationState::Animating { pending } if pending == handle => {
                let d = self.tick_delta;
                self.rotation.rotate(d.x, d.y, d.z);
                self.animation = match self.scheduler.request_frame() {
                    Some(pending) => AnimationState::Animating { pending },
                    None => {
                        log::warn!("frame request refused, animation stopped");
                        AnimationState::Idle
                    }
                };
                self.needs_redraw = true;
                log::trace!("tick {:?} -> {:?}", handle, self.rotation);
                true
            }
            _ => {
                log::trace!("ignoring frame {:?}", handle);
                false
            }
        }
    }

    /// Paint the current state. Does nothing once destroyed.
    pub fn render_frame<T: Surface + ?Sized>(&mut self, surface: &mut T) {
        if self.destroyed {
            return;
        }
        self.painter
            .paint(self.library.get(self.shape), &self.rotation, surface);
        self.needs_redraw = false;
    }

    /// Tear down the session, cancelling any pending frame. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.destroyed = true;
        log::debug!("render session destroyed");
    }

    // Every path out of `Animating` goes through here.
    fn stop(&mut self) {
        if let AnimationState::Animating { pending } =
            mem::replace(&mut self.animation, AnimationState::Idle)
        {
            self.scheduler.cancel_frame(pending);
        }
    }
}

impl<S: FrameScheduler> Drop for RenderSession<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
