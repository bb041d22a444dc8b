//! Warpfield - a warp-speed starfield for HTML canvas
//!
//! Core modules:
//! - `sim`: Deterministic star simulation (spawning, motion, speed smoothing)
//! - `render`: Projection, culling and draw-primitive math
//! - `engine`: Per-surface animation engine (tick = move then draw)
//! - `registry`: One-engine-per-surface ownership
//! - `web`: Browser backend (canvas 2D, requestAnimationFrame loop)

pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{Shape, WarpConfig, WarpParams};
pub use engine::{Clock, TickOutcome, WarpSpeed};
pub use error::WarpError;
pub use registry::WarpRegistry;

/// Simulation constants
pub mod consts {
    /// Far plane; stars wrap back to this depth band when they pass the viewer
    pub const Z_MAX: f32 = 1000.0;
    /// Stars closer than this respawn before the renderer sees them
    pub const Z_MIN: f32 = 1.0;
    /// Lateral spread of the initial star batch
    pub const SPAWN_SPREAD: f32 = 1000.0;
    /// Stars created per unit of density
    pub const STARS_PER_DENSITY: f32 = 1000.0;
    /// Reference frame duration (60 fps) for motion normalization
    pub const REF_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frame-multiplier cap; a hidden tab must not produce a huge single step
    pub const MAX_FRAME_MULT: f32 = 2.0;
    /// Stars rendering smaller than this many pixels are culled
    pub const MIN_STAR_PX: f32 = 0.3;
    /// Backing buffer never shrinks below this many CSS pixels per side
    pub const MIN_SURFACE_PX: u32 = 10;
    /// Warp-trail line width cap = size_scale / this
    pub const LINE_WIDTH_DIVISOR: f32 = 30.0;
}
