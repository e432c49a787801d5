//! Browser host and the JavaScript-facing handle
//!
//! Frames are scheduled with `requestAnimationFrame`, resizes arrive through a
//! `resize` listener on `window`. Both callbacks hold only a `Weak` reference
//! to the loop, so dropping the handle frees everything.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, Window};

use crate::animation::{FieldLoop, Host};
use crate::confetti::ConfettiBurst;
use crate::core::{field_rng, FieldConfig, Viewport};
use crate::error::FieldError;
use crate::progress::ProgressTrack;
use crate::render::{CanvasSurface, FieldRenderer};
use crate::stats::now_seconds;

type WebFieldLoop = FieldLoop<CanvasSurface, WebHost>;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

// ============================================================================
// WebHost - requestAnimationFrame + window resize
// ============================================================================

pub struct WebHost {
    window: Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut(Event)>,
}

impl WebHost {
    fn new(window: Window, field: Weak<RefCell<WebFieldLoop>>) -> Self {
        let frame_field = field.clone();
        let on_frame = Closure::wrap(Box::new(move |_timestamp: f64| {
            let Some(field) = frame_field.upgrade() else {
                return;
            };
            if let Err(e) = field.borrow_mut().on_frame() {
                error!(error = %e, "Animation frame failed");
            }
        }) as Box<dyn FnMut(f64)>);

        let on_resize = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(field) = field.upgrade() {
                field.borrow_mut().on_resize();
            }
        }) as Box<dyn FnMut(Event)>);

        Self {
            window,
            on_frame,
            on_resize,
        }
    }
}

impl Host for WebHost {
    type Frame = i32;

    fn viewport(&self) -> Viewport {
        let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::from_css(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn request_frame(&mut self) -> Result<i32, FieldError> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, frame: i32) {
        if let Err(e) = self.window.cancel_animation_frame(frame) {
            warn!(?e, frame, "cancelAnimationFrame failed");
        }
    }

    fn listen_resize(&mut self) -> Result<(), FieldError> {
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Scheduler(format!("{:?}", e)))
    }

    fn unlisten_resize(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            warn!(?e, "Failed to remove resize listener");
        }
    }
}

// ============================================================================
// NeuralBackground - JS handle
// ============================================================================

/// Animated node-graph background bound to one canvas.
///
/// ```js
/// const bg = NeuralBackground.mount("neural-bg");
/// // ...
/// bg.teardown();
/// ```
#[wasm_bindgen]
pub struct NeuralBackground {
    field: Rc<RefCell<WebFieldLoop>>,
}

#[wasm_bindgen]
impl NeuralBackground {
    /// Mount on the canvas with the given element id using default settings
    pub fn mount(canvas_id: &str) -> Result<NeuralBackground, JsValue> {
        Self::mount_with_config(canvas_id, None)
    }

    /// Mount with a JSON configuration object (missing keys keep defaults)
    pub fn mount_with_config(
        canvas_id: &str,
        config_json: Option<String>,
    ) -> Result<NeuralBackground, JsValue> {
        let config = match config_json {
            Some(json) => FieldConfig::from_json(&json)?,
            None => FieldConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // A missing canvas or 2d context degrades to a renderer that draws nothing
        let surface = match find_canvas(&window, canvas_id).and_then(CanvasSurface::acquire) {
            Ok(surface) => Some(surface),
            Err(e) => {
                warn!(canvas_id, error = %e, "Neural background will not render");
                None
            }
        };

        let renderer = FieldRenderer::new(surface, config);
        let field = Rc::new_cyclic(|weak: &Weak<RefCell<WebFieldLoop>>| {
            RefCell::new(FieldLoop::new(renderer, WebHost::new(window, weak.clone())))
        });

        field.borrow_mut().start()?;
        info!(canvas_id, "Neural background mounted");

        Ok(Self { field })
    }

    /// Stop animating and detach from the window. Safe to call repeatedly.
    pub fn teardown(&self) {
        self.field.borrow_mut().teardown();
    }

    pub fn is_running(&self) -> bool {
        self.field.borrow().is_running()
    }

    pub fn node_count(&self) -> usize {
        self.field.borrow().renderer().nodes().len()
    }

    pub fn frame_count(&self) -> f64 {
        self.field.borrow().stats().frames as f64
    }

    pub fn fps(&self) -> f64 {
        self.field.borrow().fps()
    }

    /// Frame statistics as a JSON string
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.field.borrow().stats())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Drop for NeuralBackground {
    fn drop(&mut self) {
        debug!("NeuralBackground dropped");
        self.field.borrow_mut().teardown();
    }
}

fn find_canvas(window: &Window, canvas_id: &str) -> Result<HtmlCanvasElement, FieldError> {
    window
        .document()
        .ok_or_else(|| FieldError::SurfaceUnavailable("no document".into()))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FieldError::SurfaceUnavailable(format!("no element #{}", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FieldError::SurfaceUnavailable(format!("#{} is not a canvas", canvas_id)))
}

// ============================================================================
// Progress indicator helpers
// ============================================================================

/// Fill percentage of the step progress track for `current_step` (1-based)
#[wasm_bindgen]
pub fn progress_percentage(current_step: u8) -> f64 {
    let mut track = ProgressTrack::default();
    track.select(current_step);
    track.percentage()
}

/// Active-step orbit particles as JSON (`[{angle_deg, offset, delay_secs}, ...]`)
#[wasm_bindgen]
pub fn progress_particles_json(current_step: u8) -> Result<String, JsValue> {
    let mut track = ProgressTrack::default();
    track.select(current_step);
    serde_json::to_string(&track.orbit_particles(track.current()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Title, icon, status and caption of every step as JSON
#[wasm_bindgen]
pub fn progress_steps_json(current_step: u8) -> Result<String, JsValue> {
    let mut track = ProgressTrack::default();
    track.select(current_step);
    serde_json::to_string(&track.step_views()).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// Submission confetti
// ============================================================================

/// A fresh confetti burst spanning the current window width, as JSON.
///
/// `spawned_at` is in seconds on the `performance.now()` clock; the caller
/// removes the burst once `BURST_LIFETIME_SECS` have passed.
#[wasm_bindgen]
pub fn confetti_burst_json() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);

    let burst = ConfettiBurst::spawn(width, now_seconds(), &mut field_rng(None));
    debug!(pieces = burst.len(), width, "Confetti burst");
    serde_json::to_string(&burst).map_err(|e| JsValue::from_str(&e.to_string()))
}
