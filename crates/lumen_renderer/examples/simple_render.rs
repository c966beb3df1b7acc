//! Simple progressive render example.
//!
//! Builds a small custom world, accumulates a few passes and saves a PNG.

use lumen_renderer::{
    AccumulationBuffer, Background, Camera, Color, Dielectric, HittableList, Lambertian, Material,
    Metal, ProgressiveRenderer, RenderConfig, RenderResult, Scene, SchedulerConfig, Sphere, Vec3,
    World,
};
use std::sync::Arc;

const WIDTH: usize = 400;
const HEIGHT: usize = 225;
const PASSES: usize = 32;

fn main() -> RenderResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = std::time::Instant::now();
    let world = build_world()?;
    log::info!("World built in {:?}", start.elapsed());

    let mut renderer = ProgressiveRenderer::new(
        AccumulationBuffer::new(WIDTH, HEIGHT)?,
        vec![world],
        "three_spheres",
        RenderConfig::default(),
        SchedulerConfig::default(),
    )?;

    let start = std::time::Instant::now();
    for _ in 0..PASSES {
        renderer.render_pass();
    }
    log::info!("Rendered {} passes in {:?}", PASSES, start.elapsed());

    renderer.save("output.png")
}

fn build_world() -> RenderResult<World> {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5)?);
    let matte: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));

    let objects = HittableList::new()
        .with(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?)
        .with(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)?)
        .with(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte)?)
        .with(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, metal)?);

    let scene = Scene::new("three_spheres", objects, Background::Sky);
    let camera = Camera::new(Vec3::new(13.0, 2.0, 3.0), Vec3::new(-13.0, -2.0, -3.0))?
        .with_vfov(20.0);

    Ok(World::new(scene, camera))
}
