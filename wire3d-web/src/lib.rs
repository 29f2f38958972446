//! Wire3D Web - the wireframe demo on an HTML canvas
//!
//! Paints through `CanvasRenderingContext2d` and drives animation with
//! `requestAnimationFrame`. Each [`WireframeDemo`] owns one render session;
//! calling `destroy()` (or freeing the object) cancels its pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use wire3d_core::{
    AnimationState, Axis, FrameHandle, FrameScheduler, RenderSession, Rgba, ShapeName, Surface,
};

type FrameCallback = Closure<dyn FnMut()>;
type CallbackSlot = Rc<RefCell<Option<FrameCallback>>>;

/// Canvas 2D context exposed as a drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, context: CanvasRenderingContext2d) -> Self {
        Self { canvas, context }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self, color: Rgba) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.context.clear_rect(0.0, 0.0, w, h);
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(0.0, 0.0, w, h);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.context.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.context.line_to(x as f64, y as f64);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self, color: Rgba) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill();
    }

    fn stroke(&mut self, color: Rgba, width: f32) {
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width as f64);
        self.context.stroke();
    }
}

/// Schedules frames with `requestAnimationFrame`
pub struct AnimationFrameScheduler {
    window: Window,
    callback: CallbackSlot,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("frame requested after the demo callback was released");
            return None;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle::new(id as u64)),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.id() as i32) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.id(), err);
        }
    }
}

struct DemoState<S: FrameScheduler, T: Surface> {
    session: RenderSession<S>,
    surface: T,
}

type CanvasDemoState = DemoState<AnimationFrameScheduler, CanvasSurface>;

impl<S: FrameScheduler, T: Surface> DemoState<S, T> {
    fn on_frame(&mut self) {
        // The browser never runs a cancelled callback, so the frame that
        // fired is the pending one
        if let AnimationState::Animating { pending } = self.session.animation() {
            self.session.on_frame(pending);
        }
        self.redraw_if_needed();
    }

    fn redraw_if_needed(&mut self) {
        if self.session.needs_redraw() {
            self.session.render_frame(&mut self.surface);
        }
    }
}

#[wasm_bindgen]
pub struct WireframeDemo {
    state: Rc<RefCell<CanvasDemoState>>,
    callback: CallbackSlot,
}

#[wasm_bindgen]
impl WireframeDemo {
    /// Open a demo on the canvas with id `canvas_id`, showing `shape`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, shape: &str) -> Result<WireframeDemo, JsValue> {
        let shape: ShapeName = shape.parse().map_err(to_js)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas `{}` not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let callback: CallbackSlot = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler {
            window,
            callback: Rc::clone(&callback),
        };
        let state = Rc::new(RefCell::new(CanvasDemoState {
            session: RenderSession::new(shape, scheduler),
            surface: CanvasSurface::new(canvas, context),
        }));

        // Weak, so the closure does not keep the session alive
        let weak = Rc::downgrade(&state);
        *callback.borrow_mut() = Some(Closure::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_frame();
            }
        }));

        log::info!("wireframe demo opened on #{} with {}", canvas_id, shape);
        let demo = WireframeDemo { state, callback };
        demo.render();
        Ok(demo)
    }

    pub fn set_shape(&self, name: &str) -> Result<(), JsValue> {
        let shape: ShapeName = name.parse().map_err(to_js)?;
        self.update(|session| session.set_shape(shape));
        Ok(())
    }

    pub fn set_rotation(&self, axis: &str, radians: f32) -> Result<(), JsValue> {
        let axis: Axis = axis.parse().map_err(to_js)?;
        self.update(|session| session.set_rotation(axis, radians));
        Ok(())
    }

    pub fn toggle_animation(&self) -> bool {
        self.update(|session| session.toggle_animation())
    }

    pub fn reset_rotation(&self) {
        self.update(|session| session.reset_rotation());
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().session.is_animating()
    }

    /// Slider positions `[x, y, z]` in radians, wrapped into `(-π, π]`
    pub fn rotation(&self) -> Vec<f32> {
        let r = self.state.borrow().session.slider_values();
        vec![r.x, r.y, r.z]
    }

    /// Repaint the current state
    pub fn render(&self) {
        let mut state = self.state.borrow_mut();
        state.session.invalidate();
        state.redraw_if_needed();
    }

    /// Close the demo: cancel any pending frame and release the callback
    pub fn destroy(&self) {
        self.state.borrow_mut().session.destroy();
        self.callback.borrow_mut().take();
    }
}

impl WireframeDemo {
    fn update<R>(
        &self,
        op: impl FnOnce(&mut RenderSession<AnimationFrameScheduler>) -> R,
    ) -> R {
        let mut state = self.state.borrow_mut();
        let result = op(&mut state.session);
        state.redraw_if_needed();
        result
    }
}

fn to_js(err: wire3d_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
