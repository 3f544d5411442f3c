//! End-to-end lifecycle tests driving the engine the way a platform
//! adapter would: surface callbacks in, frames out.

use spark2d::prelude::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn test_assets() -> MemoryAssets {
    let mut assets = MemoryAssets::new();
    assets.insert("ship.png", png_bytes(16, 16));
    assets.insert("rock.png", png_bytes(8, 8));
    assets
}

struct Drifter {
    body: Body,
}

impl Drifter {
    fn new(texture: Texture, x: f32, y: f32) -> Box<Self> {
        let mut body = Body::new(Box::new(Sprite::new(texture)));
        body.set_position(x, y);
        body.motion.heading = Vec2::new(1.0, 0.0);
        body.motion.speed = 0.1;
        body.motion.friction = 1.0;
        Box::new(Self { body })
    }
}

impl Entity for Drifter {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

struct DemoGame;

impl Game for DemoGame {
    fn init(
        &mut self,
        engine: &mut Engine,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), GameError> {
        engine.textures.register("ship.png", 1);
        engine.textures.register("rock.png", 2);

        let ship = engine
            .texture(1, backend)
            .ok_or_else(|| GameError::Init("ship texture missing".to_string()))?;
        let rock = engine
            .texture(2, backend)
            .ok_or_else(|| GameError::Init("rock texture missing".to_string()))?;

        let mut world = World::new();
        world.add_entity(Drifter::new(ship, 100.0, 100.0));
        world.add_entity(Drifter::new(rock, 200.0, 100.0));
        engine.register_world(world);
        Ok(())
    }
}

fn test_driver() -> SurfaceDriver<HeadlessBackend> {
    let config = EngineConfig {
        target_width: 480,
        target_height: 320,
        ..EngineConfig::default()
    };
    let engine = Engine::new(
        &config,
        Box::new(test_assets()),
        Box::new(NullAudio::new()),
    );
    SurfaceDriver::new(
        engine,
        Box::new(DemoGame),
        HeadlessBackend::new(),
        config.clear_color,
    )
}

#[test]
fn textures_load_once_and_entities_draw() {
    let mut driver = test_driver();
    driver.on_surface_created();
    driver.on_surface_changed(480, 320);
    assert!(driver.engine().is_initialized());
    assert_eq!(driver.backend().live_textures(), 2);

    driver.on_draw_frame();
    assert_eq!(driver.backend().clears, 1);
    assert_eq!(driver.backend().draws.len(), 2);
    // Each draw was made with a live texture bound.
    assert!(driver.backend().draws.iter().all(|d| d.texture.is_some()));
}

#[test]
fn surface_loss_reloads_textures_and_keeps_drawing() {
    let mut driver = test_driver();
    driver.on_surface_created();
    driver.on_surface_changed(480, 320);
    driver.on_draw_frame();

    // The platform lost the surface: backend resources are gone.
    driver.on_surface_lost();
    assert_eq!(driver.backend().live_textures(), 0);
    driver.on_surface_created();
    driver.on_surface_changed(480, 320);
    assert_eq!(driver.backend().live_textures(), 2);

    let draws_before = driver.backend().draws.len();
    driver.on_draw_frame();
    let new_draws = &driver.backend().draws[draws_before..];
    assert_eq!(new_draws.len(), 2);
    assert!(new_draws.iter().all(|d| d.texture.is_some()));
}

#[test]
fn surface_scale_doubles_on_double_width() {
    let mut driver = test_driver();
    driver.on_surface_created();
    driver.on_surface_changed(960, 640);
    assert_eq!(driver.engine().scale(), 2.0);
}

#[test]
fn entities_move_with_frame_time() {
    let mut driver = test_driver();
    driver.on_surface_created();
    driver.on_surface_changed(480, 320);
    driver.on_draw_frame();
    driver.on_draw_frame();

    let world = driver.engine().world().unwrap();
    let first = world.entities().next().unwrap();
    // Heading +x with friction 1.0: the entity drifted right or stayed put
    // if both frames took under a millisecond.
    assert!(first.body().x() >= 100.0);
}

#[test]
fn shutdown_releases_backend_textures() {
    let mut driver = test_driver();
    driver.on_surface_created();
    driver.on_surface_changed(480, 320);
    assert_eq!(driver.backend().live_textures(), 2);
    driver.shutdown();
    assert_eq!(driver.backend().live_textures(), 0);
}
