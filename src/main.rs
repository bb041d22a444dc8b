//! Warpfield entry point
//!
//! Boots the starfield on the page canvas and wires the host-side handlers:
//! pause on blur, resume on focus, and hover-driven speed ramps.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::Cell;
    use wasm_bindgen::prelude::*;

    use warpfield::{WarpConfig, web};

    const CANVAS_ID: &str = "canvas";
    const HOVER_TARGET_ID: &str = "dropzone";
    const RAMP_STEP: f32 = 0.1;
    const HOVER_SPEED: f32 = 5.0;
    const IDLE_SPEED: f32 = 1.0;

    thread_local! {
        static RAMP_HANDLE: Cell<Option<i32>> = const { Cell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Warpfield starting...");

        let config = WarpConfig {
            background_color: Some("#172032".to_string()),
            star_size: Some(5.0),
            density: Some(2.0),
            ..Default::default()
        };
        if let Err(e) = web::start(CANVAS_ID, config) {
            log::error!("Could not start starfield: {e}");
            return;
        }

        setup_focus_handlers();
        setup_hover_ramp();

        log::info!("Warpfield running!");
    }

    /// Pause while the window is unfocused, resume when it comes back.
    fn setup_focus_handlers() {
        let window = web_sys::window().expect("no window");

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                web::resume(CANVAS_ID);
            });
            let _ = window
                .add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                log::info!("Auto-paused (window blur)");
                web::pause(CANVAS_ID);
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // the page may have loaded without focus
        web::resume(CANVAS_ID);
    }

    /// Accelerate to warp while the pointer is over the drop target, ease
    /// back down when it leaves.
    fn setup_hover_ramp() {
        let target = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(HOVER_TARGET_ID));
        let Some(target) = target else {
            log::warn!("No `{HOVER_TARGET_ID}` element; hover ramp disabled");
            return;
        };

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                ramp(HOVER_SPEED, RAMP_STEP);
            });
            let _ = target
                .add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                ramp(IDLE_SPEED, -RAMP_STEP);
            });
            let _ = target
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Step the starfield speed by `step` per frame until it reaches `bound`,
    /// in a frame loop of its own. Starting a new ramp cancels the old one.
    fn ramp(bound: f32, step: f32) {
        cancel_ramp();
        ramp_step(bound, step);
    }

    fn cancel_ramp() {
        RAMP_HANDLE.with(|h| {
            if let Some(request) = h.take() {
                if let Some(w) = web_sys::window() {
                    let _ = w.cancel_animation_frame(request);
                }
            }
        });
    }

    fn ramp_step(bound: f32, step: f32) {
        let Some(speed) = web::speed(CANVAS_ID) else {
            return;
        };
        let keep_going = if step > 0.0 {
            speed < bound
        } else {
            speed > bound
        };
        if !keep_going {
            return;
        }
        web::set_speed(CANVAS_ID, speed + step);
        web::set_target_speed(CANVAS_ID, bound);

        let closure = Closure::once(move |_time: f64| ramp_step(bound, step));
        if let Some(w) = web_sys::window() {
            if let Ok(request) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
                RAMP_HANDLE.with(|h| h.set(Some(request)));
            }
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Warpfield (native) starting...");
    log::info!("The canvas backend needs a browser - build with trunk for the web version");

    println!("\nRunning starfield smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use warpfield::WarpConfig;
    use warpfield::sim::StarField;

    let params = WarpConfig {
        speed: Some(40.0),
        target_speed: Some(40.0),
        ..Default::default()
    }
    .resolve();
    let mut field = StarField::new(&params, 1);
    for _ in 0..600 {
        field.advance(2.0);
    }
    assert!(field.stars().iter().all(|s| s.z >= 1.0 && s.z < 1001.0));
    println!("✓ {} stars stayed inside the depth band", field.stars().len());
}
