//! Surface driver: adapts platform surface callbacks to the engine
//!
//! A platform embeds [`SurfaceDriver`] on its render thread and forwards the
//! three surface callbacks to it: surface created, surface changed and draw
//! frame. Other threads never touch the driver directly; they post
//! [`SurfaceCommand`]s through a [`SurfaceHandle`], and the driver applies
//! them at the top of the next frame.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::{error, info};

use crate::engine::{Engine, Game};
use crate::foundation::time::FrameClock;
use crate::game::World;
use crate::graphics::backend::RenderBackend;
use crate::graphics::color::Color;

/// Command posted to the render thread
pub enum SurfaceCommand {
    /// Stop updating and drawing
    Pause,
    /// Resume updating and drawing
    Resume,
    /// Change the frame clear color
    SetClearColor(Color),
    /// Change the design-time target size
    SetTargetSize(u32, u32),
    /// Install a world built off the render thread
    RegisterWorld(World),
}

type CommandQueue = Mutex<VecDeque<SurfaceCommand>>;

/// Cheap cloneable handle for posting commands from other threads
#[derive(Clone)]
pub struct SurfaceHandle {
    queue: Arc<CommandQueue>,
}

impl SurfaceHandle {
    /// Posts a pause command
    pub fn pause(&self) {
        self.post(SurfaceCommand::Pause);
    }

    /// Posts a resume command
    pub fn resume(&self) {
        self.post(SurfaceCommand::Resume);
    }

    /// Posts a clear color change
    pub fn set_clear_color(&self, color: Color) {
        self.post(SurfaceCommand::SetClearColor(color));
    }

    /// Posts a target size change
    pub fn set_target_size(&self, width: u32, height: u32) {
        self.post(SurfaceCommand::SetTargetSize(width, height));
    }

    /// Posts a world to install, replacing any current one
    pub fn register_world(&self, world: World) {
        self.post(SurfaceCommand::RegisterWorld(world));
    }

    /// Posts an arbitrary command
    pub fn post(&self, command: SurfaceCommand) {
        self.queue.lock().unwrap().push_back(command);
    }
}

/// Render-thread owner of the engine, game and backend
pub struct SurfaceDriver<B: RenderBackend> {
    engine: Engine,
    game: Box<dyn Game>,
    backend: B,
    clock: FrameClock,
    queue: Arc<CommandQueue>,
    clear_color: Color,
    paused: bool,
}

impl<B: RenderBackend> SurfaceDriver<B> {
    /// Creates a driver; nothing runs until the surface callbacks arrive
    pub fn new(engine: Engine, game: Box<dyn Game>, backend: B, clear_color: Color) -> Self {
        Self {
            engine,
            game,
            backend,
            clock: FrameClock::new(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            clear_color,
            paused: false,
        }
    }

    /// Handle for posting commands from other threads
    pub fn handle(&self) -> SurfaceHandle {
        SurfaceHandle {
            queue: self.queue.clone(),
        }
    }

    /// The engine this driver owns
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access to the engine
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The backend this driver owns
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Frame rate measured over recent frames
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Surface exists; backend resources can be created
    ///
    /// Also called when a lost surface comes back, in which case all
    /// textures are reloaded and entity snapshots refreshed.
    pub fn on_surface_created(&mut self) {
        info!("Surface created");
        self.backend.set_clear_color(self.clear_color);
        self.engine.load_textures(&mut self.backend);
        self.engine.on_surface_reset();
    }

    /// Surface dimensions are known or changed
    ///
    /// Game initialization runs on the first call, once dimensions exist.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.engine.resize_surface(width, height);
        if !self.engine.is_initialized() {
            if let Err(e) = self.engine.initialize(self.game.as_mut(), &mut self.backend) {
                error!("Game initialization failed: {}", e);
            }
        }
    }

    /// Surface was destroyed; backend texture handles are stale
    ///
    /// Registrations survive, so the next [`SurfaceDriver::on_surface_created`]
    /// reloads everything.
    pub fn on_surface_lost(&mut self) {
        info!("Surface lost, dropping backend textures");
        self.engine.textures.unload_all(&mut self.backend);
    }

    /// Runs one frame: apply commands, step the simulation, draw
    pub fn on_draw_frame(&mut self) {
        self.apply_commands();
        if self.paused {
            return;
        }
        let dt_ms = self.clock.tick();
        self.game.update(&mut self.engine, dt_ms);
        self.engine.update(dt_ms);
        self.backend.clear();
        self.engine.render(&mut self.backend);
    }

    /// Releases everything; the driver is inert afterwards
    pub fn shutdown(&mut self) {
        self.engine.shutdown(&mut self.backend);
    }

    fn apply_commands(&mut self) {
        loop {
            let command = self.queue.lock().unwrap().pop_front();
            let Some(command) = command else { break };
            match command {
                SurfaceCommand::Pause => {
                    self.paused = true;
                    self.engine.pause();
                }
                SurfaceCommand::Resume => {
                    self.paused = false;
                    // The clock did not tick while paused, so restart it to
                    // keep the paused span out of the next frame's delta.
                    self.clock.restart();
                    self.engine.resume();
                }
                SurfaceCommand::SetClearColor(color) => {
                    self.clear_color = color;
                    self.backend.set_clear_color(color);
                }
                SurfaceCommand::SetTargetSize(width, height) => {
                    self.engine.set_target_size(width, height);
                }
                SurfaceCommand::RegisterWorld(world) => {
                    self.engine.register_world(world);
                }
            }
        }
    }
}
