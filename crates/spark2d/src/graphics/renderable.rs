//! Renderable trait and shared 2D transform

use crate::graphics::backend::RenderPass;
use crate::graphics::texture::{Texture, TextureTable};

/// Position, rotation, scale and visibility shared by all renderables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Center x in surface coordinates
    pub x: f32,
    /// Center y in surface coordinates
    pub y: f32,
    /// Rotation in degrees, counter-clockwise
    pub rotation: f32,
    /// Uniform scale, 1.0 is natural size
    pub scale: f32,
    /// Invisible renderables are skipped when drawing
    pub visible: bool,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            visible: true,
        }
    }
}

/// Anything the world can draw
///
/// Implementations draw themselves as one or more textured quads against the
/// pass backend and are expected to skip the draw entirely when their texture
/// has no live backend resource.
pub trait Renderable {
    /// Shared transform
    fn transform(&self) -> &Transform2;

    /// Mutable access to the shared transform
    fn transform_mut(&mut self) -> &mut Transform2;

    /// Advances time-dependent state by `dt_ms` milliseconds
    fn update(&mut self, dt_ms: u64) {
        let _ = dt_ms;
    }

    /// Draws this renderable
    fn draw(&self, pass: &mut RenderPass<'_>);

    /// Width in unscaled surface units
    fn width(&self) -> u32;

    /// Height in unscaled surface units
    fn height(&self) -> u32;

    /// Texture snapshot this renderable draws with, if any
    fn texture(&self) -> Option<&Texture>;

    /// Re-reads the texture snapshot from the table
    ///
    /// Called after the rendering surface was rebuilt, when backend handles
    /// held in snapshots have gone stale.
    fn refresh_texture(&mut self, textures: &TextureTable);
}
