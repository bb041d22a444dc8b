//! The star value type

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SPAWN_SPREAD, Z_MAX, Z_MIN};

/// One particle of the starfield.
///
/// `z` is distance from the viewer, always in `(0, Z_MAX]` for a freshly
/// spawned star and at least `Z_MIN` after every motion update (a star that
/// passes the viewer rewraps before the renderer can observe it). `size` is a
/// base render multiplier fixed at creation, uniform in `[0.5, 1.5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
}

impl Star {
    /// Spawn a star at a random position in the full view frustum.
    pub fn spawn(rng: &mut Pcg32) -> Self {
        Self {
            x: (rng.random::<f32>() - 0.5) * SPAWN_SPREAD,
            y: (rng.random::<f32>() - 0.5) * SPAWN_SPREAD,
            // (0, Z_MAX]; a zero depth would break projection
            z: (1.0 - rng.random::<f32>()) * Z_MAX,
            size: 0.5 + rng.random::<f32>(),
        }
    }

    /// Wrap a star that passed the viewer back to the far plane.
    ///
    /// Depth is pushed up in `Z_MAX` increments until it clears `Z_MIN`, so
    /// arbitrarily large motion steps still land in range. The lateral
    /// position is redrawn with spread proportional to the new depth, so the
    /// star reappears at a plausible far-plane position and streaks inward
    /// from there.
    pub fn rewrap(&mut self, rng: &mut Pcg32) {
        while self.z < Z_MIN {
            self.z += Z_MAX;
            self.x = (rng.random::<f32>() - 0.5) * self.z;
            self.y = (rng.random::<f32>() - 0.5) * self.z;
        }
    }
}
