//! World: the ordered collection of entities driven each frame
//!
//! Update runs in two passes over the entities present at the start of the
//! frame: first per-entity updates with bounds checks, then pairwise
//! collision tests. Entities spawned during the frame join afterwards and
//! removed entities are compacted out at the very end, so indices stay
//! stable for the whole update.

use log::debug;

use crate::foundation::math::Rect;
use crate::game::entity::Entity;
use crate::graphics::backend::RenderPass;
use crate::graphics::texture::TextureTable;
use crate::input::InputState;

/// Boxed entity as stored by the world
///
/// `Send` so a fully built world can be posted to the render thread.
pub type BoxedEntity = Box<dyn Entity + Send>;

/// Per-frame context handed to entity updates
pub struct UpdateContext<'a> {
    /// Surface width in pixels
    pub surface_width: u32,
    /// Surface height in pixels
    pub surface_height: u32,
    /// Surface scale factor
    pub scale: f32,
    /// Input sampled for this frame
    pub input: &'a InputState,
    spawned: Vec<BoxedEntity>,
}

impl<'a> UpdateContext<'a> {
    /// Creates a context for one frame
    pub fn new(surface_width: u32, surface_height: u32, scale: f32, input: &'a InputState) -> Self {
        Self {
            surface_width,
            surface_height,
            scale,
            input,
            spawned: Vec::new(),
        }
    }

    /// Queues an entity to join the world after this update completes
    pub fn spawn(&mut self, entity: BoxedEntity) {
        self.spawned.push(entity);
    }
}

/// Ordered entity container
///
/// Entities update and draw in insertion order.
#[derive(Default)]
pub struct World {
    entities: Vec<BoxedEntity>,
}

impl World {
    /// Creates an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity; it updates and draws after all earlier ones
    pub fn add_entity(&mut self, entity: BoxedEntity) {
        self.entities.push(entity);
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates the entities in order
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.entities.iter().map(|e| e.as_ref() as &dyn Entity)
    }

    /// Runs one simulation step
    ///
    /// Only entities present at the start of the step update and collide;
    /// spawns queued in `ctx` join at the end, just before removed entities
    /// are compacted out.
    pub fn update(&mut self, dt_ms: u64, ctx: &mut UpdateContext<'_>) {
        let count = self.entities.len();

        for entity in &mut self.entities[..count] {
            entity.update(dt_ms, ctx);
            let (x, y) = {
                let t = entity.body().renderable().transform();
                (t.x, t.y)
            };
            if x < 0.0 || x > ctx.surface_width as f32 || y < 0.0 || y > ctx.surface_height as f32 {
                entity.on_bounds(ctx.surface_width, ctx.surface_height);
            }
        }

        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.entities.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if Self::bounds_of(a.as_ref()).intersects(&Self::bounds_of(b.as_ref())) {
                    a.on_collision(b.as_mut());
                    b.on_collision(a.as_mut());
                }
            }
        }

        if !ctx.spawned.is_empty() {
            debug!("Spawning {} entities", ctx.spawned.len());
            self.entities.append(&mut ctx.spawned);
        }
        self.entities.retain(|e| !e.body().is_removed());
    }

    fn bounds_of(entity: &dyn Entity) -> Rect {
        entity.body().bounds()
    }

    /// Draws every entity in order
    ///
    /// The texture binding is dropped before each entity so a stale binding
    /// can never leak from one renderable into the next.
    pub fn render(&self, pass: &mut RenderPass<'_>) {
        for entity in &self.entities {
            pass.backend.bind_texture(None);
            entity.body().draw(pass);
        }
    }

    /// Re-reads every entity's texture snapshot from the table
    pub fn refresh_textures(&mut self, textures: &TextureTable) {
        for entity in &mut self.entities {
            entity.body_mut().refresh_texture(textures);
        }
    }
}
