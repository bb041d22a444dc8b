//! Projection, culling and draw primitives
//!
//! Pure math shared by every backend, plus the [`Surface`] trait the engine
//! draws through. Backends implement `Surface` for a real canvas (see
//! `web::CanvasSurface`); tests implement it with a recording mock.

use glam::Vec2;

use crate::consts::Z_MAX;
use crate::sim::Star;

/// Line-cap style for warp trails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Round,
    Butt,
}

/// A drawable surface the engine renders onto.
///
/// Geometry queries mirror what the engine needs from a DOM canvas: whether
/// the element is still in the document, whether it is scroll-visible, its
/// CSS size, the device pixel ratio, and the backing-buffer size. Draw calls
/// are in backing-buffer pixels.
pub trait Surface {
    /// Does the underlying element still exist in the document?
    fn attached(&self) -> bool;
    /// Is any part of the element inside the viewport?
    fn visible(&self) -> bool;
    /// Displayed (CSS) size in pixels.
    fn client_size(&self) -> (u32, u32);
    /// Device pixel ratio of the display.
    fn pixel_ratio(&self) -> f64;
    /// Backing pixel-buffer size.
    fn pixel_size(&self) -> (u32, u32);
    /// Resize the backing pixel buffer (clears it).
    fn set_pixel_size(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: &str);
    /// `center` is the arc center; the engine anchors it at the same point as
    /// a square's corner, so circles sit offset by half their size.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32);
    fn fill_square(&mut self, corner: Vec2, size: f32, color: &str, alpha: f32);
    fn stroke_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: LineCap,
        color: &str,
        alpha: f32,
    );
}

/// Project a star to normalized display coordinates, optionally offsetting
/// its depth (used for the trailing end of a warp streak).
pub fn project(star: &Star, depth_offset: f32) -> Vec2 {
    let z = star.z + depth_offset;
    Vec2::new(star.x / z, star.y / z)
}

/// Is a normalized point inside the visible `[-0.5, 0.5]` box?
pub fn in_view(p: Vec2) -> bool {
    p.x >= -0.5 && p.x <= 0.5 && p.y >= -0.5 && p.y <= 0.5
}

/// Depth-fade transparency: far stars fade out toward the far plane.
pub fn depth_alpha(z: f32) -> f32 {
    ((Z_MAX - z) / Z_MAX).clamp(0.0, 1.0)
}

/// Map a normalized point to backing-buffer pixels, offset by half the star's
/// render size so the sprite is centered.
pub fn to_pixels(p: Vec2, width: f32, height: f32, size: f32) -> Vec2 {
    Vec2::new(
        width * (p.x + 0.5) - size / 2.0,
        height * (p.y + 0.5) - size / 2.0,
    )
}

/// Render-size scale derived from the smaller surface dimension and the
/// configured star scale.
pub fn size_scale(width: f32, height: f32, star_scale: f32) -> f32 {
    width.min(height) / (10.0 / star_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(x: f32, y: f32, z: f32) -> Star {
        Star { x, y, z, size: 1.0 }
    }

    #[test]
    fn test_project_divides_by_depth() {
        let p = project(&star(60.0, -30.0, 100.0), 0.0);
        assert_eq!(p, Vec2::new(0.6, -0.3));
    }

    #[test]
    fn test_project_with_depth_offset() {
        let p = project(&star(60.0, 0.0, 100.0), 100.0);
        assert_eq!(p, Vec2::new(0.3, 0.0));
    }

    #[test]
    fn test_in_view_bounds_are_inclusive() {
        assert!(in_view(Vec2::new(0.5, -0.5)));
        assert!(in_view(Vec2::ZERO));
        assert!(!in_view(Vec2::new(0.6, 0.0)));
        assert!(!in_view(Vec2::new(0.0, -0.51)));
    }

    #[test]
    fn test_depth_alpha_clamped() {
        assert_eq!(depth_alpha(1000.0), 0.0);
        assert_eq!(depth_alpha(0.0), 1.0);
        assert_eq!(depth_alpha(1500.0), 0.0);
        assert_eq!(depth_alpha(-10.0), 1.0);
        assert!((depth_alpha(250.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_to_pixels_centers_sprite() {
        let p = to_pixels(Vec2::ZERO, 800.0, 600.0, 10.0);
        assert_eq!(p, Vec2::new(395.0, 295.0));
    }

    #[test]
    fn test_size_scale_uses_smaller_dimension() {
        assert!((size_scale(800.0, 600.0, 3.0) - 180.0).abs() < 1e-3);
        assert!((size_scale(600.0, 800.0, 3.0) - 180.0).abs() < 1e-3);
    }
}
