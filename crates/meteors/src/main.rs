//! Meteors: a headless demo game on the spark2d engine
//!
//! Runs a fixed number of frames against the recording backend and prints a
//! small report. Serves as a working example of the engine lifecycle: build
//! an engine, plug in a `Game`, drive the surface callbacks.

mod art;
mod entities;

use log::info;
use rand::Rng;
use spark2d::prelude::*;

use entities::{Hud, Meteor, Ship, KIND_METEOR};

const TEX_SHIP: i32 = 1;
const TEX_METEOR: i32 = 2;
const TEX_FONT: i32 = 3;

const METEOR_COUNT: usize = 8;
const FRAMES: u32 = 600;

struct MeteorsGame;

impl Game for MeteorsGame {
    fn init(
        &mut self,
        engine: &mut Engine,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), GameError> {
        engine.textures.register("ship.png", TEX_SHIP);
        engine.textures.register("meteor.png", TEX_METEOR);
        engine.textures.register("font.png", TEX_FONT);

        let ship_tex = engine
            .texture(TEX_SHIP, backend)
            .ok_or_else(|| GameError::Init("ship texture missing".to_string()))?;
        let meteor_tex = engine
            .texture(TEX_METEOR, backend)
            .ok_or_else(|| GameError::Init("meteor texture missing".to_string()))?;
        let font_tex = engine
            .texture(TEX_FONT, backend)
            .ok_or_else(|| GameError::Init("font texture missing".to_string()))?;

        let surface = engine.surface();
        let (w, h) = (surface.width as f32, surface.height as f32);

        let mut world = World::new();
        world.add_entity(Ship::new(ship_tex, w / 2.0, h / 2.0));

        let mut rng = rand::thread_rng();
        for _ in 0..METEOR_COUNT {
            let x = rng.gen_range(0.0..w);
            let y = rng.gen_range(0.0..h);
            let heading = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let heading = if heading.norm() > 0.0 {
                heading.normalize()
            } else {
                Vec2::new(1.0, 0.0)
            };
            let speed = rng.gen_range(0.02..0.08);
            world.add_entity(Meteor::new(meteor_tex.clone(), x, y, heading, speed));
        }

        world.add_entity(Hud::new(font_tex));
        engine.register_world(world);
        info!("World populated with {} meteors", METEOR_COUNT);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EngineConfig {
        title: "meteors".to_string(),
        target_width: 480,
        target_height: 320,
        ..EngineConfig::default()
    };
    let engine = Engine::new(
        &config,
        Box::new(art::asset_pack()?),
        Box::new(NullAudio::new()),
    );
    let mut driver = SurfaceDriver::new(
        engine,
        Box::new(MeteorsGame),
        HeadlessBackend::new(),
        config.clear_color,
    );

    driver.on_surface_created();
    driver.on_surface_changed(960, 640);

    for frame in 0..FRAMES {
        driver.on_draw_frame();
        if frame == FRAMES / 2 {
            // Exercise the command queue midway through the run.
            driver.handle().set_clear_color(Color::GRAY);
        }
    }

    let world = driver
        .engine()
        .world()
        .ok_or("world missing after the run")?;
    let meteors_left = world
        .entities()
        .filter(|e| e.body().kind == KIND_METEOR)
        .count();
    println!(
        "ran {} frames at {:.1} fps, scale {:.1}, {} of {} meteors left",
        FRAMES,
        driver.fps(),
        driver.engine().scale(),
        meteors_left,
        METEOR_COUNT
    );

    driver.shutdown();
    Ok(())
}
