//! Entities: a renderable plus motion state and game callbacks
//!
//! [`Body`] bundles the data every entity carries; the [`Entity`] trait adds
//! the hooks games override. The default update integrates motion with the
//! heading and friction model and then advances the renderable's animation.

use crate::foundation::math::{Rect, Vec2};
use crate::game::world::UpdateContext;
use crate::graphics::backend::RenderPass;
use crate::graphics::renderable::Renderable;
use crate::graphics::texture::TextureTable;

/// Heading-based motion state
///
/// Velocity is recomputed every frame from heading, speed and the surface
/// scale, then damped by friction. Friction applies per frame, not per unit
/// of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Current velocity in surface units per millisecond
    pub velocity: Vec2,
    /// Unit direction of travel
    pub heading: Vec2,
    /// Speed along the heading
    pub speed: f32,
    /// Per-frame velocity damping factor
    pub friction: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            velocity: Vec2::zeros(),
            heading: Vec2::zeros(),
            speed: 1.0,
            friction: 0.8,
        }
    }
}

/// Data shared by every entity
///
/// The renderable is `Send` so whole worlds can be built off the render
/// thread and posted over.
pub struct Body {
    renderable: Box<dyn Renderable + Send>,
    /// Motion state integrated by the default update
    pub motion: Motion,
    /// Game-defined kind tag, useful in collision handlers
    pub kind: i32,
    removed: bool,
}

impl Body {
    /// Creates a body around a renderable
    pub fn new(renderable: Box<dyn Renderable + Send>) -> Self {
        Self {
            renderable,
            motion: Motion::default(),
            kind: 0,
            removed: false,
        }
    }

    /// Advances motion and animation by `dt_ms` milliseconds
    ///
    /// `scale` is the surface scale factor, so speeds tuned against the
    /// target size move proportionally on larger surfaces.
    pub fn integrate(&mut self, dt_ms: u64, scale: f32) {
        let m = &mut self.motion;
        m.velocity = m.heading * (m.speed * scale);
        m.velocity *= m.friction;
        let t = self.renderable.transform_mut();
        t.x += m.velocity.x * dt_ms as f32;
        t.y += m.velocity.y * dt_ms as f32;
        self.renderable.update(dt_ms);
    }

    /// Center x position
    pub fn x(&self) -> f32 {
        self.renderable.transform().x
    }

    /// Center y position
    pub fn y(&self) -> f32 {
        self.renderable.transform().y
    }

    /// Moves the entity to `(x, y)`
    pub fn set_position(&mut self, x: f32, y: f32) {
        let t = self.renderable.transform_mut();
        t.x = x;
        t.y = y;
    }

    /// Width of the renderable in unscaled units
    pub fn width(&self) -> u32 {
        self.renderable.width()
    }

    /// Height of the renderable in unscaled units
    pub fn height(&self) -> u32 {
        self.renderable.height()
    }

    /// Axis-aligned bounds centered on the current position
    pub fn bounds(&self) -> Rect {
        let t = self.renderable.transform();
        let half_w = (self.renderable.width() / 2) as i32;
        let half_h = (self.renderable.height() / 2) as i32;
        Rect::new(
            t.x as i32 - half_w,
            t.y as i32 - half_h,
            t.x as i32 + half_w,
            t.y as i32 + half_h,
        )
    }

    /// Marks the entity for removal at the end of the current update
    pub fn kill(&mut self) {
        self.removed = true;
    }

    /// True once [`Body::kill`] has been called
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// The wrapped renderable
    pub fn renderable(&self) -> &dyn Renderable {
        self.renderable.as_ref()
    }

    /// Mutable access to the wrapped renderable
    pub fn renderable_mut(&mut self) -> &mut dyn Renderable {
        self.renderable.as_mut()
    }

    /// Draws the renderable
    pub fn draw(&self, pass: &mut RenderPass<'_>) {
        self.renderable.draw(pass);
    }

    /// Re-reads the renderable's texture snapshot from the table
    pub fn refresh_texture(&mut self, textures: &TextureTable) {
        self.renderable.refresh_texture(textures);
    }
}

/// A simulated object living in a [`crate::game::World`]
///
/// Implementors supply the body and override the hooks they care about. The
/// default update integrates the body's motion.
pub trait Entity {
    /// The entity's body
    fn body(&self) -> &Body;

    /// Mutable access to the body
    fn body_mut(&mut self) -> &mut Body;

    /// Per-frame behavior; the default integrates motion
    fn update(&mut self, dt_ms: u64, ctx: &mut UpdateContext<'_>) {
        let scale = ctx.scale;
        self.body_mut().integrate(dt_ms, scale);
    }

    /// Called once per update for each other entity whose bounds intersect
    /// this one's
    fn on_collision(&mut self, other: &mut dyn Entity) {
        let _ = other;
    }

    /// Called when the entity's position leaves the surface
    fn on_bounds(&mut self, surface_width: u32, surface_height: u32) {
        let _ = (surface_width, surface_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::sprite::Sprite;
    use crate::graphics::texture::Texture;
    use approx::assert_relative_eq;

    fn test_body() -> Body {
        Body::new(Box::new(Sprite::new(Texture::test_stub(
            "t.png", 1, 10, 10,
        ))))
    }

    #[test]
    fn integrate_follows_heading_with_friction() {
        let mut body = test_body();
        body.motion.heading = Vec2::new(1.0, 0.0);
        body.motion.speed = 0.5;
        body.motion.friction = 0.8;
        body.integrate(10, 1.0);
        // velocity = 1.0 * 0.5 * 1.0 * 0.8 = 0.4, position += 0.4 * 10
        assert_relative_eq!(body.x(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(body.y(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn integrate_scales_with_surface() {
        let mut body = test_body();
        body.motion.heading = Vec2::new(0.0, 1.0);
        body.motion.speed = 1.0;
        body.motion.friction = 1.0;
        body.integrate(10, 2.0);
        assert_relative_eq!(body.y(), 20.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_heading_stays_put() {
        let mut body = test_body();
        body.integrate(100, 1.0);
        assert_relative_eq!(body.x(), 0.0);
        assert_relative_eq!(body.y(), 0.0);
    }

    #[test]
    fn bounds_center_on_position() {
        let mut body = test_body();
        body.set_position(50.0, 40.0);
        let r = body.bounds();
        assert_eq!(r, Rect::new(45, 35, 55, 45));
    }

    #[test]
    fn kill_marks_removed() {
        let mut body = test_body();
        assert!(!body.is_removed());
        body.kill();
        assert!(body.is_removed());
    }
}
