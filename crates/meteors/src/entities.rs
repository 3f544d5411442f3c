//! Game entities for the meteors demo

use spark2d::prelude::*;

/// Kind tag for the player ship
pub const KIND_SHIP: i32 = 1;
/// Kind tag for drifting meteors
pub const KIND_METEOR: i32 = 2;

/// Player ship sitting at the surface center
pub struct Ship {
    body: Body,
}

impl Ship {
    /// Creates the ship at `(x, y)`
    pub fn new(texture: Texture, x: f32, y: f32) -> Box<Self> {
        let mut body = Body::new(Box::new(Sprite::new(texture)));
        body.kind = KIND_SHIP;
        body.set_position(x, y);
        body.motion.speed = 0.0;
        Box::new(Self { body })
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt_ms: u64, ctx: &mut UpdateContext<'_>) {
        // Tapping anywhere teleports the ship there.
        let pointer = ctx.input.pointer(0);
        if pointer.phase == PointerPhase::Down {
            self.body.set_position(pointer.x, pointer.y);
        }
        let scale = ctx.scale;
        self.body.integrate(dt_ms, scale);
    }

    fn on_collision(&mut self, other: &mut dyn Entity) {
        if other.body().kind == KIND_METEOR {
            log::debug!("ship struck by a meteor");
        }
    }
}

/// Meteor drifting across the surface
pub struct Meteor {
    body: Body,
}

impl Meteor {
    /// Creates a meteor heading in `heading` at `speed`
    pub fn new(texture: Texture, x: f32, y: f32, heading: Vec2, speed: f32) -> Box<Self> {
        let mut sprite = AnimatedSprite::new(texture, 16, 16, 4);
        sprite.play();
        let mut body = Body::new(Box::new(sprite));
        body.kind = KIND_METEOR;
        body.set_position(x, y);
        body.motion.heading = heading;
        body.motion.speed = speed;
        body.motion.friction = 1.0;
        Box::new(Self { body })
    }
}

impl Entity for Meteor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_collision(&mut self, other: &mut dyn Entity) {
        if other.body().kind == KIND_SHIP {
            self.body.kill();
        }
    }

    fn on_bounds(&mut self, surface_width: u32, surface_height: u32) {
        // Wrap to the opposite edge.
        let (x, y) = (self.body.x(), self.body.y());
        let w = surface_width as f32;
        let h = surface_height as f32;
        let nx = if x < 0.0 {
            w
        } else if x > w {
            0.0
        } else {
            x
        };
        let ny = if y < 0.0 {
            h
        } else if y > h {
            0.0
        } else {
            y
        };
        self.body.set_position(nx, ny);
    }
}

/// Score line drawn in the top-left corner
pub struct Hud {
    body: Body,
}

impl Hud {
    /// Creates the HUD from a font sheet texture
    pub fn new(font_texture: Texture) -> Box<Self> {
        let mut text = TextSprite::new(BitmapFont::new(font_texture), "METEORS");
        text.transform_mut().x = 8.0;
        text.transform_mut().y = 8.0;
        let mut body = Body::new(Box::new(text));
        body.motion.speed = 0.0;
        Box::new(Self { body })
    }
}

impl Entity for Hud {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
