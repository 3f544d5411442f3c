//! Bitmap font text rendering
//!
//! A font texture is a 16x16 grid of glyph cells indexed by the low byte of
//! each character, matching the classic code-page sheet layout. Text is laid
//! out on a pen advancing one cell per character.

use log::debug;

use crate::foundation::math::compose_scale_translate;
use crate::graphics::backend::RenderPass;
use crate::graphics::color::Color;
use crate::graphics::quad::{QuadGeometry, UvRect};
use crate::graphics::renderable::{Renderable, Transform2};
use crate::graphics::texture::{Texture, TextureTable};

/// Glyphs per row and per column of a font sheet
pub const GLYPHS_PER_ROW: u32 = 16;

const GLYPH_UNIT: f32 = 1.0 / GLYPHS_PER_ROW as f32;

/// Fixed-cell bitmap font backed by a glyph sheet texture
pub struct BitmapFont {
    texture: Texture,
    /// Tint applied to every glyph
    pub color: Color,
    cell_width: u32,
    cell_height: u32,
}

impl BitmapFont {
    /// Creates a font from a glyph sheet; cell size is the sheet size
    /// divided by the grid dimensions
    pub fn new(texture: Texture) -> Self {
        let cell_width = texture.width() / GLYPHS_PER_ROW;
        let cell_height = texture.height() / GLYPHS_PER_ROW;
        Self {
            texture,
            color: Color::WHITE,
            cell_width,
            cell_height,
        }
    }

    /// Width of one glyph cell in pixels
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height of one glyph cell in pixels
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Glyph sheet texture
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    fn glyph_uv(code: u8) -> UvRect {
        let col = u32::from(code) % GLYPHS_PER_ROW;
        let row = u32::from(code) / GLYPHS_PER_ROW;
        UvRect {
            left: col as f32 * GLYPH_UNIT,
            top: row as f32 * GLYPH_UNIT,
            right: (col + 1) as f32 * GLYPH_UNIT,
            bottom: (row + 1) as f32 * GLYPH_UNIT,
        }
    }

    /// Draws `message` with its top-left corner at `(x, y)` in unscaled
    /// surface units
    pub fn draw_str(&self, pass: &mut RenderPass<'_>, message: &str, x: f32, y: f32) {
        let Some(backend_id) = self.texture.backend_id() else {
            debug!("Skipping text draw, font texture {} unloaded", self.texture.id());
            return;
        };
        pass.backend.bind_texture(Some(backend_id));
        for (i, ch) in message.chars().enumerate() {
            let code = (ch as u32 & 0xff) as u8;
            let quad = QuadGeometry::top_left(
                self.cell_width as f32,
                self.cell_height as f32,
                Self::glyph_uv(code),
            );
            let pen_x = x + i as f32 * self.cell_width as f32;
            let transform = compose_scale_translate(pen_x, y, pass.scale);
            pass.backend.draw_quad(&quad, &transform, self.color);
        }
        pass.backend.bind_texture(None);
    }
}

/// Renderable drawing a mutable line of text
pub struct TextSprite {
    transform: Transform2,
    font: BitmapFont,
    message: String,
}

impl TextSprite {
    /// Creates a text sprite with an initial message
    pub fn new(font: BitmapFont, message: impl Into<String>) -> Self {
        Self {
            transform: Transform2::default(),
            font,
            message: message.into(),
        }
    }

    /// Current message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replaces the message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Font used to draw the message
    pub fn font_mut(&mut self) -> &mut BitmapFont {
        &mut self.font
    }
}

impl Renderable for TextSprite {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform2 {
        &mut self.transform
    }

    fn draw(&self, pass: &mut RenderPass<'_>) {
        if !self.transform.visible || self.message.is_empty() {
            return;
        }
        self.font
            .draw_str(pass, &self.message, self.transform.x, self.transform.y);
    }

    fn width(&self) -> u32 {
        self.message.chars().count() as u32 * self.font.cell_width()
    }

    fn height(&self) -> u32 {
        self.font.cell_height()
    }

    fn texture(&self) -> Option<&Texture> {
        Some(self.font.texture())
    }

    fn refresh_texture(&mut self, textures: &TextureTable) {
        if let Some(current) = textures.lookup(self.font.texture.id()) {
            self.font.texture = current.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;
    use crate::graphics::backend::{HeadlessBackend, RenderBackend};
    use approx::assert_relative_eq;

    fn loaded_font(backend: &mut HeadlessBackend) -> BitmapFont {
        let img = ImageData::solid_color(64, 64, [255; 4]);
        let handle = backend.create_texture(&img).unwrap();
        let mut tex = Texture::test_stub("font.png", 9, 64, 64);
        tex.force_backend(handle);
        BitmapFont::new(tex)
    }

    #[test]
    fn cell_size_is_sheet_over_sixteen() {
        let font = BitmapFont::new(Texture::test_stub("font.png", 9, 64, 32));
        assert_eq!(font.cell_width(), 4);
        assert_eq!(font.cell_height(), 2);
    }

    #[test]
    fn glyph_uv_walks_the_grid() {
        // 'A' is code 65: column 1, row 4 of the 16x16 grid.
        let rect = BitmapFont::glyph_uv(b'A');
        assert_relative_eq!(rect.left, 1.0 / 16.0);
        assert_relative_eq!(rect.top, 4.0 / 16.0);
    }

    #[test]
    fn one_draw_per_character() {
        let mut backend = HeadlessBackend::new();
        let font = loaded_font(&mut backend);
        let sprite = TextSprite::new(font, "SCORE");
        let mut pass = RenderPass {
            backend: &mut backend,
            scale: 1.0,
        };
        sprite.draw(&mut pass);
        assert_eq!(backend.draws.len(), 5);
    }

    #[test]
    fn text_draw_unbinds_texture_after() {
        let mut backend = HeadlessBackend::new();
        let font = loaded_font(&mut backend);
        font.draw_str(
            &mut RenderPass {
                backend: &mut backend,
                scale: 1.0,
            },
            "hi",
            0.0,
            0.0,
        );
        assert_eq!(backend.bound_texture(), None);
        assert!(backend.draws.iter().all(|d| d.texture.is_some()));
    }

    #[test]
    fn empty_message_draws_nothing() {
        let mut backend = HeadlessBackend::new();
        let font = loaded_font(&mut backend);
        let sprite = TextSprite::new(font, "");
        let mut pass = RenderPass {
            backend: &mut backend,
            scale: 1.0,
        };
        sprite.draw(&mut pass);
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn unloaded_font_skips_draw() {
        let mut backend = HeadlessBackend::new();
        let font = BitmapFont::new(Texture::test_stub("font.png", 9, 64, 64));
        let sprite = TextSprite::new(font, "hi");
        let mut pass = RenderPass {
            backend: &mut backend,
            scale: 1.0,
        };
        sprite.draw(&mut pass);
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn width_is_message_extent() {
        let font = BitmapFont::new(Texture::test_stub("font.png", 9, 64, 64));
        let sprite = TextSprite::new(font, "abcd");
        assert_eq!(sprite.width(), 16);
        assert_eq!(sprite.height(), 4);
    }
}
