//! Math utilities and type aliases for 2D game code
//!
//! Wraps nalgebra types with engine-specific conveniences. Angles cross the
//! public API in degrees and are converted to radians at the nalgebra
//! boundary.

use nalgebra::{Matrix3, Rotation2, Vector2};

/// 2D vector type used for positions, headings and velocities
pub type Vec2 = Vector2<f32>;

/// 3x3 homogeneous matrix for 2D affine transforms
pub type Mat3 = Matrix3<f32>;

/// Mathematical constants
pub mod constants {
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
}

/// Extension trait adding game-oriented operations to [`Vec2`]
pub trait Vec2Ext {
    /// Returns this vector rotated counter-clockwise by `degrees`
    fn rotated(&self, degrees: f32) -> Vec2;
    /// Angle of this vector in degrees, measured counter-clockwise from the
    /// positive x axis, in `[0, 360)`
    fn angle_deg(&self) -> f32;
    /// Euclidean distance to `other`
    fn distance(&self, other: &Vec2) -> f32;
}

impl Vec2Ext for Vec2 {
    fn rotated(&self, degrees: f32) -> Vec2 {
        Rotation2::new(degrees * constants::DEG_TO_RAD) * self
    }

    fn angle_deg(&self) -> f32 {
        let degrees = self.y.atan2(self.x) * constants::RAD_TO_DEG;
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    fn distance(&self, other: &Vec2) -> f32 {
        (other - self).norm()
    }
}

/// Builds a 2D affine transform applying scale, then rotation, then
/// translation
pub fn compose_trs(x: f32, y: f32, rotation_deg: f32, scale: f32) -> Mat3 {
    Mat3::new_translation(&Vec2::new(x, y))
        * Rotation2::new(rotation_deg * constants::DEG_TO_RAD).to_homogeneous()
        * Mat3::new_nonuniform_scaling(&Vec2::new(scale, scale))
}

/// Builds a 2D affine transform applying translation first, then scale
///
/// Used for glyph placement, where pen coordinates are expressed in unscaled
/// units and the whole layout is scaled afterwards.
pub fn compose_scale_translate(x: f32, y: f32, scale: f32) -> Mat3 {
    Mat3::new_nonuniform_scaling(&Vec2::new(scale, scale)) * Mat3::new_translation(&Vec2::new(x, y))
}

/// Axis-aligned rectangle with integer coordinates
///
/// Used for collision bounds. Edges are inclusive: two rectangles that share
/// an edge or a corner are considered intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle from its four edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from a top-left corner and a size
    pub fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns true if `self` and `other` overlap or touch
    ///
    /// Symmetric: `a.intersects(&b) == b.intersects(&a)`.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.right < self.left
            || other.left > self.right
            || other.bottom < self.top
            || other.top > self.bottom)
    }

    /// Returns true if the point lies inside the rectangle, edges included
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotated_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotated(90.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn angle_of_axis_vectors() {
        assert_relative_eq!(Vec2::new(1.0, 0.0).angle_deg(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(Vec2::new(0.0, 1.0).angle_deg(), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn angle_wraps_into_a_full_turn() {
        assert_relative_eq!(Vec2::new(0.0, -1.0).angle_deg(), 270.0, epsilon = 1e-4);
        assert_relative_eq!(Vec2::new(-1.0, 0.0).angle_deg(), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn trs_translates_origin() {
        let m = compose_trs(10.0, 20.0, 0.0, 2.0);
        let p = m * nalgebra::Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 20.0, epsilon = 1e-5);
    }

    #[test]
    fn trs_scales_before_rotating() {
        // A unit x vector scaled by 2 then rotated 90 degrees lands on +y.
        let m = compose_trs(0.0, 0.0, 90.0, 2.0);
        let p = m * nalgebra::Vector3::new(1.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn scale_translate_scales_pen_position() {
        let m = compose_scale_translate(10.0, 0.0, 2.0);
        let p = m * nalgebra::Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 20.0, epsilon = 1e-5);
    }

    #[test]
    fn intersects_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 15, 15);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn intersects_shared_edge_counts() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 20, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn intersects_shared_corner_counts() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 10, 20, 20);
        assert!(a.intersects(&b));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(11, 0, 20, 10);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn contains_includes_edges() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(10, 10));
        assert!(!r.contains(11, 5));
    }
}
