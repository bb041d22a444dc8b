//! Engine configuration
//!
//! Hosts hand over a [`WarpConfig`] (or a JSON string of the same shape, see
//! [`WarpConfig::from_json`]); [`WarpConfig::resolve`] validates every field
//! against its default and clamping policy and yields the [`WarpParams`] the
//! engine actually runs with.

use serde::{Deserialize, Serialize};

/// How stars (and warp-trail line caps) are shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Circle,
    Square,
}

/// Raw, optional configuration as supplied by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarpConfig {
    pub speed: Option<f32>,
    pub target_speed: Option<f32>,
    pub speed_adj_factor: Option<f32>,
    pub density: Option<f32>,
    /// "circle" or anything else (treated as square)
    pub shape: Option<String>,
    pub depth_fade: Option<bool>,
    pub warp_effect: Option<bool>,
    pub warp_effect_length: Option<f32>,
    pub star_size: Option<f32>,
    pub background_color: Option<String>,
    pub star_color: Option<String>,
}

impl WarpConfig {
    /// Parse a JSON-encoded configuration. Malformed JSON falls back to the
    /// empty configuration (all defaults), never an error.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Validate and apply defaults
    pub fn resolve(self) -> WarpParams {
        let speed = match self.speed {
            Some(s) if s >= 0.0 => s,
            _ => 0.7,
        };
        let target_speed = match self.target_speed {
            Some(t) if t >= 0.0 => t,
            _ => speed,
        };
        WarpParams {
            speed,
            target_speed,
            speed_adj_factor: self.speed_adj_factor.unwrap_or(0.03).clamp(0.0, 1.0),
            density: match self.density {
                Some(d) if d > 0.0 => d,
                _ => 0.7,
            },
            shape: match self.shape.as_deref() {
                None | Some("circle") => Shape::Circle,
                Some(_) => Shape::Square,
            },
            depth_fade: self.depth_fade.unwrap_or(true),
            warp_effect: self.warp_effect.unwrap_or(true),
            warp_effect_length: self.warp_effect_length.map_or(5.0, |l| l.max(0.0)),
            star_scale: match self.star_size {
                Some(s) if s > 0.0 => s,
                _ => 3.0,
            },
            background_color: self
                .background_color
                .unwrap_or_else(|| "hsl(263,45%,7%)".to_string()),
            star_color: self.star_color.unwrap_or_else(|| "#FFFFFF".to_string()),
        }
    }
}

/// Validated simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WarpParams {
    pub speed: f32,
    pub target_speed: f32,
    pub speed_adj_factor: f32,
    pub density: f32,
    pub shape: Shape,
    pub depth_fade: bool,
    pub warp_effect: bool,
    pub warp_effect_length: f32,
    pub star_scale: f32,
    pub background_color: String,
    pub star_color: String,
}

impl Default for WarpParams {
    fn default() -> Self {
        WarpConfig::default().resolve()
    }
}
