//! # spark2d
//!
//! A small 2D game engine with a fixed-function sprite pipeline.
//!
//! ## Features
//!
//! - **Sprite Rendering**: static, animated and bitmap-text sprites over an
//!   abstract render backend
//! - **Entity World**: ordered entity updates with collision and bounds
//!   callbacks
//! - **Resource Tables**: id-keyed textures and sounds that survive surface
//!   loss
//! - **Surface Driver**: turns platform surface callbacks into frames, with
//!   a thread-safe command queue
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spark2d::prelude::*;
//!
//! struct MyGame;
//!
//! impl Game for MyGame {
//!     fn init(
//!         &mut self,
//!         engine: &mut Engine,
//!         _backend: &mut dyn RenderBackend,
//!     ) -> Result<(), GameError> {
//!         engine.textures.register("ship.png", 1);
//!         let world = World::new();
//!         // Build entities from textures and add them here.
//!         engine.register_world(world);
//!         Ok(())
//!     }
//! }
//!
//! fn main() {
//!     let config = EngineConfig::default();
//!     let assets = DirAssets::new(&config.assets_dir);
//!     let engine = Engine::new(&config, Box::new(assets), Box::new(NullAudio::new()));
//!     let mut driver = SurfaceDriver::new(
//!         engine,
//!         Box::new(MyGame),
//!         HeadlessBackend::new(),
//!         config.clear_color,
//!     );
//!     driver.on_surface_created();
//!     driver.on_surface_changed(480, 320);
//!     loop {
//!         driver.on_draw_frame();
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments
)]

pub mod assets;
pub mod audio;
pub mod config;
pub mod foundation;
pub mod game;
pub mod graphics;
pub mod input;

mod driver;
mod engine;

pub use driver::{SurfaceCommand, SurfaceDriver, SurfaceHandle};
pub use engine::{Engine, Game, GameError, SurfaceMetrics};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetSource, DirAssets, MemoryAssets},
        audio::{AudioBackend, NullAudio},
        config::{Config, EngineConfig},
        foundation::{
            math::{Rect, Vec2, Vec2Ext},
            time::FrameClock,
        },
        game::{Body, BoxedEntity, Entity, Motion, UpdateContext, World},
        graphics::{
            AnimatedSprite, BitmapFont, Color, HeadlessBackend, RenderBackend, RenderPass,
            Renderable, Sprite, TextSprite, Texture, TextureTable, Transform2,
        },
        input::{InputState, PointerPhase, PointerSample},
        Engine, Game, GameError, SurfaceCommand, SurfaceDriver, SurfaceHandle, SurfaceMetrics,
    };
}
