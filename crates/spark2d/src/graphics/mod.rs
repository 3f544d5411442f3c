//! Graphics module - sprite rendering over an abstract backend
//!
//! The engine draws everything as textured quads. [`RenderBackend`] is the
//! seam to the platform renderer; [`renderable::Renderable`] is the seam to
//! game code. Texture lifetime is owned by [`texture::TextureTable`].

pub mod backend;
pub mod color;
pub mod quad;
pub mod renderable;
pub mod sprite;
pub mod text;
pub mod texture;

pub use backend::{BackendTextureId, HeadlessBackend, RenderBackend, RenderError, RenderPass};
pub use color::Color;
pub use quad::{QuadGeometry, QuadVertex, UvRect};
pub use renderable::{Renderable, Transform2};
pub use sprite::{AnimatedSprite, Sprite};
pub use text::{BitmapFont, TextSprite};
pub use texture::{Texture, TextureError, TextureTable};
