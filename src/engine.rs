//! The per-surface animation engine
//!
//! One [`WarpSpeed`] owns one star field and one drawable surface. A tick is
//! always motion-update-then-render; ticks are strictly sequential and driven
//! by whatever frame loop the backend provides (see `web` for the
//! requestAnimationFrame loop, or call [`WarpSpeed::tick`] directly).

use crate::config::{Shape, WarpConfig, WarpParams};
use crate::consts::{LINE_WIDTH_DIVISOR, MAX_FRAME_MULT, MIN_STAR_PX, MIN_SURFACE_PX, REF_FRAME_MS};
use crate::render::{self, LineCap, Surface};
use crate::sim::StarField;

/// A monotonic high-resolution clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// What a tick decided about the engine's future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep scheduling.
    Continue,
    /// The surface left the document; the caller must destroy this engine.
    Detached,
}

/// A running starfield bound to one drawable surface.
pub struct WarpSpeed {
    target_id: String,
    params: WarpParams,
    field: StarField,
    paused: bool,
    last_move_ms: f64,
    last_render_ms: f64,
    prev_client: Option<(u32, u32)>,
    surface: Box<dyn Surface>,
    clock: Box<dyn Clock>,
}

impl WarpSpeed {
    pub fn new(
        target_id: &str,
        config: WarpConfig,
        surface: Box<dyn Surface>,
        clock: Box<dyn Clock>,
        seed: u64,
    ) -> Self {
        let params = config.resolve();
        let field = StarField::new(&params, seed);
        let last_move_ms = clock.now_ms();
        Self {
            target_id: target_id.to_string(),
            params,
            field,
            paused: false,
            last_move_ms,
            last_render_ms: 0.0,
            prev_client: None,
            surface,
            clock,
        }
    }

    /// One iteration: advance motion, then render if visible and not paused.
    pub fn tick(&mut self) -> TickOutcome {
        let start = self.clock.now_ms();
        if !self.surface.attached() {
            return TickOutcome::Detached;
        }
        self.step_motion(start);
        if !self.paused && self.surface.visible() {
            self.render();
        }
        self.last_render_ms = self.clock.now_ms() - start;
        TickOutcome::Continue
    }

    /// Advance the star field by the elapsed wall time, normalized to a 60 fps
    /// frame and capped so throttled tabs don't produce one enormous step.
    ///
    /// The timestamp is updated before the paused check: paused ticks keep the
    /// bookkeeping current, so resuming after an arbitrarily long pause sees a
    /// normal elapsed interval instead of a speed spike.
    fn step_motion(&mut self, now_ms: f64) {
        let elapsed = now_ms - self.last_move_ms;
        self.last_move_ms = now_ms;
        if self.paused {
            return;
        }
        let frame_mult = ((elapsed / REF_FRAME_MS) as f32).clamp(0.0, MAX_FRAME_MULT);
        self.field.advance(frame_mult);
    }

    fn render(&mut self) {
        let client = self.surface.client_size();
        if self.prev_client != Some(client) {
            let dpr = self.surface.pixel_ratio();
            let w = (client.0.max(MIN_SURFACE_PX) as f64 * dpr) as u32;
            let h = (client.1.max(MIN_SURFACE_PX) as f64 * dpr) as u32;
            self.surface.set_pixel_size(w, h);
        }

        let (w_px, h_px) = self.surface.pixel_size();
        let (w, h) = (w_px as f32, h_px as f32);
        let scale = render::size_scale(w, h, self.params.star_scale);
        let max_line_width = scale / LINE_WIDTH_DIVISOR;
        let speed = self.field.speed();

        self.surface.clear(&self.params.background_color);
        for star in self.field.stars() {
            let head = render::project(star, 0.0);
            // trails may start off-screen and sweep across; points may not
            if !self.params.warp_effect && !render::in_view(head) {
                continue;
            }
            let size = star.size * scale / star.z;
            if size < MIN_STAR_PX {
                continue;
            }
            let alpha = if self.params.depth_fade {
                render::depth_alpha(star.z)
            } else {
                1.0
            };
            if self.params.warp_effect {
                let tail = render::project(star, self.params.warp_effect_length * speed);
                if !render::in_view(tail) {
                    continue;
                }
                let cap = match self.params.shape {
                    Shape::Circle => LineCap::Round,
                    Shape::Square => LineCap::Butt,
                };
                self.surface.stroke_line(
                    render::to_pixels(head, w, h, size),
                    render::to_pixels(tail, w, h, size),
                    size.min(max_line_width),
                    cap,
                    &self.params.star_color,
                    alpha,
                );
            } else {
                // one anchor point for both shapes: the square's corner, and
                // the circle's (off-center) arc center
                let anchor = render::to_pixels(head, w, h, size);
                match self.params.shape {
                    Shape::Circle => {
                        self.surface
                            .fill_circle(anchor, size / 2.0, &self.params.star_color, alpha)
                    }
                    Shape::Square => {
                        self.surface
                            .fill_square(anchor, size, &self.params.star_color, alpha)
                    }
                }
            }
        }
        self.prev_client = Some(client);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f32 {
        self.field.speed()
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.field.set_speed(speed);
    }

    pub fn target_speed(&self) -> f32 {
        self.field.target_speed()
    }

    pub fn set_target_speed(&mut self, target: f32) {
        self.field.set_target_speed(target);
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn params(&self) -> &WarpParams {
        &self.params
    }

    /// Duration of the most recent tick's work, in milliseconds.
    pub fn last_render_ms(&self) -> f64 {
        self.last_render_ms
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut StarField {
        &mut self.field
    }
}
