//! The star collection and its motion update

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::Star;
use crate::config::WarpParams;
use crate::consts::STARS_PER_DENSITY;

/// All simulation state that changes per tick: the star batch plus the
/// current/target speed pair being smoothed toward each other.
///
/// `advance` takes a frame multiplier (elapsed time normalized to a 60 fps
/// frame, pre-clamped by the caller) so the field itself stays clock-free and
/// fully deterministic under a fixed seed.
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
    speed: f32,
    target_speed: f32,
    speed_adj_factor: f32,
    rng: Pcg32,
}

impl StarField {
    /// Create `round(density * 1000)` stars with randomized positions.
    pub fn new(params: &WarpParams, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let count = (params.density * STARS_PER_DENSITY).round() as usize;
        let stars = (0..count).map(|_| Star::spawn(&mut rng)).collect();
        Self {
            stars,
            speed: params.speed,
            target_speed: params.target_speed,
            speed_adj_factor: params.speed_adj_factor,
            rng,
        }
    }

    /// Advance motion by one frame-normalized step.
    ///
    /// Speed eases toward the target with exponential smoothing whose rate is
    /// made frame-rate independent by raising the adjust factor to
    /// `1 / frame_mult`. Every star then moves `speed * frame_mult` closer to
    /// the viewer and rewraps if it crosses the near plane.
    pub fn advance(&mut self, frame_mult: f32) {
        let adj = self.speed_adj_factor.powf(1.0 / frame_mult);
        self.speed = (self.target_speed * adj + self.speed * (1.0 - adj)).max(0.0);

        let step = self.speed * frame_mult;
        for star in &mut self.stars {
            star.z -= step;
            star.rewrap(&mut self.rng);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[cfg(test)]
    pub(crate) fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn set_target_speed(&mut self, target: f32) {
        self.target_speed = target.max(0.0);
    }
}
