//! RGBA color type and presets

use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque red
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque cyan
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);
    /// Opaque magenta
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);
    /// Opaque yellow
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
    /// Half-transparent gray
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 0.5);

    /// Creates a color from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components as an array, in RGBA order
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_is_half_transparent() {
        assert_eq!(Color::GRAY.a, 0.5);
        assert_eq!(Color::GRAY.r, 0.5);
    }

    #[test]
    fn copies_are_independent() {
        let a = Color::RED;
        let mut b = a;
        b.g = 1.0;
        assert_eq!(a.g, 0.0);
    }

    #[test]
    fn array_round_trip() {
        let c = Color::from([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    }
}
