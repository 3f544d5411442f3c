//! Render backend abstraction
//!
//! The engine core issues draw work through [`RenderBackend`] and never talks
//! to a graphics API directly. A platform adapter implements this trait on
//! its render thread; [`HeadlessBackend`] is a recording implementation used
//! by tests and tools.

use std::collections::HashSet;

use thiserror::Error;

use crate::assets::ImageData;
use crate::foundation::math::Mat3;
use crate::graphics::color::Color;
use crate::graphics::quad::QuadGeometry;

/// Errors from backend operations
#[derive(Debug, Error)]
pub enum RenderError {
    /// Texture could not be created on the device
    #[error("texture creation failed: {0}")]
    TextureCreation(String),
    /// Backend resource limit reached
    #[error("out of backend resources: {0}")]
    OutOfResources(String),
}

/// Opaque handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendTextureId(pub u64);

/// Platform renderer interface
///
/// All methods are called from the render thread only.
pub trait RenderBackend {
    /// Uploads an image and returns a handle to the new texture
    fn create_texture(&mut self, image: &ImageData) -> Result<BackendTextureId, RenderError>;

    /// Destroys a texture; the handle is invalid afterwards
    fn destroy_texture(&mut self, id: BackendTextureId);

    /// Binds a texture for subsequent draws, or unbinds with `None`
    fn bind_texture(&mut self, id: Option<BackendTextureId>);

    /// Sets the color used by [`RenderBackend::clear`]
    fn set_clear_color(&mut self, color: Color);

    /// Clears the frame to the clear color
    fn clear(&mut self);

    /// Draws a quad with the bound texture, transform and tint
    fn draw_quad(&mut self, quad: &QuadGeometry, transform: &Mat3, tint: Color);
}

/// Per-frame drawing context handed to renderables
pub struct RenderPass<'a> {
    /// Backend receiving the draw calls
    pub backend: &'a mut dyn RenderBackend,
    /// Surface scale factor applied on top of per-renderable scale
    pub scale: f32,
}

/// Record of a single quad draw made against [`HeadlessBackend`]
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    /// Texture bound at draw time
    pub texture: Option<BackendTextureId>,
    /// Quad geometry as submitted
    pub quad: QuadGeometry,
    /// Transform as submitted
    pub transform: Mat3,
    /// Tint color as submitted
    pub tint: Color,
}

/// Backend that records commands instead of rendering
///
/// Tracks live texture handles so tests can assert resource balance.
#[derive(Default)]
pub struct HeadlessBackend {
    next_id: u64,
    live: HashSet<BackendTextureId>,
    bound: Option<BackendTextureId>,
    clear_color: Color,
    /// Draws recorded since creation
    pub draws: Vec<RecordedDraw>,
    /// Number of clears issued
    pub clears: u32,
}

impl HeadlessBackend {
    /// Creates an empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures currently alive on the backend
    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    /// Currently bound texture
    pub fn bound_texture(&self) -> Option<BackendTextureId> {
        self.bound
    }

    /// Current clear color
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_texture(&mut self, image: &ImageData) -> Result<BackendTextureId, RenderError> {
        if image.pixels.len() != (image.width * image.height * 4) as usize {
            return Err(RenderError::TextureCreation(format!(
                "pixel buffer size {} does not match {}x{}",
                image.pixels.len(),
                image.width,
                image.height
            )));
        }
        self.next_id += 1;
        let id = BackendTextureId(self.next_id);
        self.live.insert(id);
        Ok(id)
    }

    fn destroy_texture(&mut self, id: BackendTextureId) {
        self.live.remove(&id);
        if self.bound == Some(id) {
            self.bound = None;
        }
    }

    fn bind_texture(&mut self, id: Option<BackendTextureId>) {
        self.bound = id;
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_quad(&mut self, quad: &QuadGeometry, transform: &Mat3, tint: Color) {
        self.draws.push(RecordedDraw {
            texture: self.bound,
            quad: *quad,
            transform: *transform,
            tint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy_balance() {
        let mut backend = HeadlessBackend::new();
        let img = ImageData::solid_color(2, 2, [255; 4]);
        let a = backend.create_texture(&img).unwrap();
        let b = backend.create_texture(&img).unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_textures(), 2);
        backend.destroy_texture(a);
        assert_eq!(backend.live_textures(), 1);
    }

    #[test]
    fn destroying_bound_texture_unbinds() {
        let mut backend = HeadlessBackend::new();
        let img = ImageData::solid_color(1, 1, [0; 4]);
        let id = backend.create_texture(&img).unwrap();
        backend.bind_texture(Some(id));
        backend.destroy_texture(id);
        assert_eq!(backend.bound_texture(), None);
    }

    #[test]
    fn draws_record_bound_texture() {
        let mut backend = HeadlessBackend::new();
        let img = ImageData::solid_color(1, 1, [0; 4]);
        let id = backend.create_texture(&img).unwrap();
        backend.bind_texture(Some(id));
        let quad = QuadGeometry::centered(1.0, 1.0, crate::graphics::quad::UvRect::FULL);
        backend.draw_quad(&quad, &Mat3::identity(), Color::WHITE);
        assert_eq!(backend.draws.len(), 1);
        assert_eq!(backend.draws[0].texture, Some(id));
    }

    #[test]
    fn mismatched_pixel_buffer_is_rejected() {
        let mut backend = HeadlessBackend::new();
        let img = ImageData {
            pixels: vec![0; 3],
            width: 2,
            height: 2,
        };
        assert!(backend.create_texture(&img).is_err());
    }
}
