//! Engine core: lifecycle, frame stepping and resource ownership
//!
//! [`Engine`] owns the world, the texture and sound tables, the asset source
//! and the shared input state. A platform adapter drives it through a small
//! lifecycle: initialize once a rendering surface exists, then update and
//! render every frame, with pause, resume and shutdown in between. All
//! lifecycle calls happen on the render thread.

use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::assets::{AssetError, AssetSource};
use crate::audio::{AudioBackend, AudioError, MusicPlayer, SoundTable};
use crate::config::{ConfigError, EngineConfig};
use crate::game::world::{UpdateContext, World};
use crate::graphics::backend::{RenderBackend, RenderPass};
use crate::graphics::texture::{Texture, TextureError, TextureTable};
use crate::input::InputState;

/// Errors surfaced from game code and engine lifecycle
#[derive(Debug, Error)]
pub enum GameError {
    /// Game-specific initialization failure
    #[error("game initialization failed: {0}")]
    Init(String),
    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Texture error
    #[error(transparent)]
    Texture(#[from] TextureError),
    /// Audio error
    #[error(transparent)]
    Audio(#[from] AudioError),
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Surface dimensions and the derived scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Current surface width in pixels
    pub width: u32,
    /// Current surface height in pixels
    pub height: u32,
    /// Width the game was designed against
    pub target_width: u32,
    /// Height the game was designed against
    pub target_height: u32,
    /// Ratio of surface width to target width, 1.0 when no target is set
    pub scale: f32,
}

impl SurfaceMetrics {
    fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            width: 0,
            height: 0,
            target_width,
            target_height,
            scale: 1.0,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.recompute_scale();
    }

    fn set_target(&mut self, target_width: u32, target_height: u32) {
        self.target_width = target_width;
        self.target_height = target_height;
        self.recompute_scale();
    }

    fn recompute_scale(&mut self) {
        self.scale = if self.target_width > 0 {
            self.width as f32 / self.target_width as f32
        } else {
            1.0
        };
    }
}

/// Game behavior plugged into the engine
///
/// `init` runs once, after the first rendering surface exists, so texture
/// loads are possible. `update` runs before the world update each frame.
pub trait Game {
    /// One-time setup: register resources and populate the world
    fn init(&mut self, engine: &mut Engine, backend: &mut dyn RenderBackend)
        -> Result<(), GameError>;

    /// Per-frame game logic before the world updates
    fn update(&mut self, engine: &mut Engine, dt_ms: u64) {
        let _ = (engine, dt_ms);
    }
}

/// Central engine object owning all game-facing state
pub struct Engine {
    /// Texture resource table
    pub textures: TextureTable,
    /// Sound effect table
    pub sounds: SoundTable,
    /// Streamed music track
    pub music: MusicPlayer,
    /// Platform audio backend
    pub audio: Box<dyn AudioBackend>,
    assets: Box<dyn AssetSource>,
    input: Arc<InputState>,
    world: Option<World>,
    surface: SurfaceMetrics,
    initialized: bool,
    paused: bool,
    shut_down: bool,
}

impl Engine {
    /// Creates an engine from configuration, an asset source and an audio
    /// backend
    pub fn new(
        config: &EngineConfig,
        assets: Box<dyn AssetSource>,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        Self {
            textures: TextureTable::new(),
            sounds: SoundTable::new(),
            music: MusicPlayer::new(),
            audio,
            assets,
            input: Arc::new(InputState::new()),
            world: None,
            surface: SurfaceMetrics::new(config.target_width, config.target_height),
            initialized: false,
            paused: false,
            shut_down: false,
        }
    }

    /// Shared input state; platform adapters clone the `Arc` and feed it
    /// from their event threads
    pub fn input(&self) -> &Arc<InputState> {
        &self.input
    }

    /// Asset source games load resources from
    pub fn assets(&self) -> &dyn AssetSource {
        self.assets.as_ref()
    }

    /// Current surface metrics
    pub fn surface(&self) -> SurfaceMetrics {
        self.surface
    }

    /// Current surface scale factor
    pub fn scale(&self) -> f32 {
        self.surface.scale
    }

    /// Updates surface dimensions and recomputes the scale factor
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        info!("Surface resized to {}x{}", width, height);
        self.surface.resize(width, height);
    }

    /// Changes the design-time target size and recomputes the scale factor
    pub fn set_target_size(&mut self, target_width: u32, target_height: u32) {
        self.surface.set_target(target_width, target_height);
    }

    /// Installs the world the engine simulates and draws
    pub fn register_world(&mut self, world: World) {
        if self.world.is_some() {
            warn!("Replacing an already registered world");
        }
        self.world = Some(world);
    }

    /// The registered world, if any
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Mutable access to the registered world
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// Looks up a texture snapshot by id, loading it on first use
    pub fn texture(&mut self, id: i32, backend: &mut dyn RenderBackend) -> Option<Texture> {
        self.textures.get(id, self.assets.as_ref(), backend)
    }

    /// Loads every registered texture that is not already loaded
    pub fn load_textures(&mut self, backend: &mut dyn RenderBackend) {
        self.textures.load_all(self.assets.as_ref(), backend);
    }

    /// Loads a sound effect and registers it under `id`
    pub fn register_sound(&mut self, filename: &str, id: i32) -> Result<(), AudioError> {
        self.sounds
            .register(filename, id, self.assets.as_ref(), self.audio.as_mut())
    }

    /// Plays a registered sound effect
    pub fn play_sound(&mut self, id: i32) {
        self.sounds.play(id, self.audio.as_mut());
    }

    /// Loads the streamed music track
    pub fn load_music(&mut self, filename: &str) -> Result<(), AudioError> {
        self.music
            .load(filename, self.assets.as_ref(), self.audio.as_mut())
    }

    /// Runs game initialization once
    ///
    /// Later calls are no-ops, so surface recreation does not re-run game
    /// setup.
    pub fn initialize(
        &mut self,
        game: &mut dyn Game,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), GameError> {
        if self.initialized || self.shut_down {
            return Ok(());
        }
        info!("Initializing game");
        game.init(self, backend)?;
        self.initialized = true;
        Ok(())
    }

    /// True once [`Engine::initialize`] has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Advances the world by `dt_ms` milliseconds
    ///
    /// Does nothing before initialization, while paused, or after shutdown.
    /// Pointer input is cleared at the end of the step so samples are seen
    /// by exactly one frame.
    pub fn update(&mut self, dt_ms: u64) {
        if !self.initialized || self.paused || self.shut_down {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let mut ctx = UpdateContext::new(
            self.surface.width,
            self.surface.height,
            self.surface.scale,
            self.input.as_ref(),
        );
        world.update(dt_ms, &mut ctx);
        self.input.clear_pointers();
    }

    /// Draws the world
    ///
    /// Gated the same way as [`Engine::update`].
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        if !self.initialized || self.paused || self.shut_down {
            return;
        }
        if let Some(world) = self.world.as_ref() {
            let mut pass = RenderPass {
                backend,
                scale: self.surface.scale,
            };
            world.render(&mut pass);
        }
    }

    /// Stops world updates until [`Engine::resume`]
    pub fn pause(&mut self) {
        self.paused = true;
        self.music.pause(self.audio.as_mut());
    }

    /// Resumes world updates
    pub fn resume(&mut self) {
        self.paused = false;
        self.music.play(self.audio.as_mut());
    }

    /// True while paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Refreshes texture snapshots held by entities
    ///
    /// Call after the rendering surface was rebuilt and textures reloaded.
    pub fn on_surface_reset(&mut self) {
        if let Some(world) = self.world.as_mut() {
            world.refresh_textures(&self.textures);
        }
    }

    /// Releases every resource; the engine stays inert afterwards
    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        if self.shut_down {
            return;
        }
        info!("Shutting down engine");
        self.sounds.release(self.audio.as_mut());
        self.music.release(self.audio.as_mut());
        self.audio.release();
        self.textures.release(backend);
        self.world = None;
        self.shut_down = true;
    }
}
