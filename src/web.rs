//! Browser backend
//!
//! Implements [`Surface`] on a 2D canvas, provides the page-global registry
//! and the self-rescheduling requestAnimationFrame loop. One pending frame
//! callback exists per engine; cancellation is idempotent and a stop sentinel
//! guarantees no further ticks even if `cancelAnimationFrame` fails.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::config::WarpConfig;
use crate::engine::{Clock, TickOutcome, WarpSpeed};
use crate::error::WarpError;
use crate::registry::WarpRegistry;
use crate::render::{LineCap, Surface};

/// Frame-request handle value meaning "never schedule again".
const STOPPED: i32 = -1;

thread_local! {
    static REGISTRY: RefCell<WarpRegistry> = RefCell::new(WarpRegistry::new());
    static FRAME_HANDLES: RefCell<HashMap<String, Rc<Cell<i32>>>> =
        RefCell::new(HashMap::new());
}

fn window() -> Option<Window> {
    web_sys::window()
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// `performance.now()` with a `Date.now()` fallback.
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// A 2D canvas as a drawable surface.
pub struct CanvasSurface {
    target_id: String,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look the canvas up by element id and grab its 2D context.
    pub fn lookup(target_id: &str) -> Result<Self, WarpError> {
        let canvas: HtmlCanvasElement = document()
            .and_then(|d| d.get_element_by_id(target_id))
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| WarpError::InvalidTarget(target_id.to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or_else(|| WarpError::NoContext(target_id.to_string()))?;
        // the first draw sizes the buffer properly
        canvas.set_width(1);
        canvas.set_height(1);
        Ok(Self {
            target_id: target_id.to_string(),
            canvas,
            ctx,
        })
    }
}

impl Surface for CanvasSurface {
    fn attached(&self) -> bool {
        document()
            .and_then(|d| d.get_element_by_id(&self.target_id))
            .is_some()
    }

    fn visible(&self) -> bool {
        let Some(window) = window() else {
            return false;
        };
        let viewport_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let viewport_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let r = self.canvas.get_bounding_client_rect();
        r.top() + r.height() >= 0.0
            && r.left() + r.width() >= 0.0
            && r.bottom() - r.height() <= viewport_h
            && r.right() - r.width() <= viewport_w
    }

    fn client_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn pixel_ratio(&self) -> f64 {
        window().map_or(1.0, |w| w.device_pixel_ratio())
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, color: &str) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(color);
        let (w, h) = self.pixel_size();
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn fill_square(&mut self, corner: Vec2, size: f32, color: &str, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(corner.x as f64, corner.y as f64, size as f64, size as f64);
    }

    fn stroke_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: LineCap,
        color: &str,
        alpha: f32,
    ) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap(match cap {
            LineCap::Round => "round",
            LineCap::Butt => "butt",
        });
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

/// Launch a starfield on the canvas with the given element id and start its
/// frame loop. A running starfield on the same canvas is destroyed first.
pub fn start(target_id: &str, config: WarpConfig) -> Result<(), WarpError> {
    cancel_frame_loop(target_id);
    let launched = CanvasSurface::lookup(target_id).and_then(|surface| {
        let seed = js_sys::Date::now() as u64;
        REGISTRY.with(|r| {
            r.borrow_mut().launch(
                target_id,
                config,
                Box::new(surface),
                Box::new(PerformanceClock),
                seed,
            )
        })
    });
    if let Err(e) = launched {
        // the prior loop is already cancelled; an engine left registered here
        // would never tick again
        REGISTRY.with(|r| {
            r.borrow_mut().destroy(target_id);
        });
        return Err(e);
    }

    let handle = Rc::new(Cell::new(0));
    FRAME_HANDLES.with(|m| {
        m.borrow_mut()
            .insert(target_id.to_string(), handle.clone());
    });
    schedule(target_id.to_string(), handle);
    Ok(())
}

/// Start from a JSON-encoded configuration (malformed JSON means defaults).
pub fn start_json(target_id: &str, config_json: &str) -> Result<(), WarpError> {
    start(target_id, WarpConfig::from_json(config_json))
}

/// Stop the frame loop and drop the engine. Idempotent.
pub fn stop(target_id: &str) {
    cancel_frame_loop(target_id);
    REGISTRY.with(|r| {
        r.borrow_mut().destroy(target_id);
    });
}

pub fn pause(target_id: &str) {
    with_engine(target_id, |e| e.pause());
}

pub fn resume(target_id: &str) {
    with_engine(target_id, |e| e.resume());
}

pub fn speed(target_id: &str) -> Option<f32> {
    with_engine(target_id, |e| e.speed())
}

pub fn set_speed(target_id: &str, speed: f32) {
    with_engine(target_id, |e| e.set_speed(speed));
}

pub fn set_target_speed(target_id: &str, target: f32) {
    with_engine(target_id, |e| e.set_target_speed(target));
}

fn with_engine<T>(target_id: &str, f: impl FnOnce(&mut WarpSpeed) -> T) -> Option<T> {
    REGISTRY.with(|r| r.borrow_mut().get_mut(target_id).map(f))
}

/// Request the next frame for an engine, recording the request id in its
/// handle (or the sentinel if the request itself fails).
fn schedule(target_id: String, handle: Rc<Cell<i32>>) {
    let for_set = handle.clone();
    let closure = Closure::once(move |_time: f64| {
        frame(target_id, handle);
    });
    let request = window()
        .map(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()))
        .transpose()
        .ok()
        .flatten();
    match request {
        Some(id) => for_set.set(id),
        None => for_set.set(STOPPED),
    }
    closure.forget();
}

fn frame(target_id: String, handle: Rc<Cell<i32>>) {
    if handle.get() == STOPPED {
        return;
    }
    let outcome = with_engine(&target_id, |e| e.tick());
    match outcome {
        Some(TickOutcome::Continue) => schedule(target_id, handle),
        Some(TickOutcome::Detached) => {
            log::info!("canvas `{target_id}` left the document");
            handle.set(STOPPED);
            FRAME_HANDLES.with(|m| {
                m.borrow_mut().remove(&target_id);
            });
            REGISTRY.with(|r| {
                r.borrow_mut().destroy(&target_id);
            });
        }
        // engine gone from the registry; nothing left to drive
        None => handle.set(STOPPED),
    }
}

/// Cancel an engine's pending frame request. The handle is forced to the
/// sentinel either way, so a failed cancellation still stops the loop.
fn cancel_frame_loop(target_id: &str) {
    FRAME_HANDLES.with(|m| {
        if let Some(handle) = m.borrow_mut().remove(target_id) {
            let request = handle.get();
            handle.set(STOPPED);
            if request != STOPPED {
                if let Some(w) = window() {
                    let _ = w.cancel_animation_frame(request);
                }
            }
        }
    });
}
