//! Named scene presets.
//!
//! Each preset builds its scene and the camera that frames it.

use crate::material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal};
use crate::rect::{AxisBox, AxisRect};
use crate::scene::{Background, Scene, World};
use crate::texture::CheckerTexture;
use crate::transform::{RotateY, Translate};
use crate::{Camera, HittableList, RenderError, RenderResult, Sphere};
use lumen_math::Vec3;
use std::sync::Arc;

/// Preset names in display order. The first one is the default world.
pub const NAMES: [&str; 4] = ["spheres", "checker", "simple_light", "cornell"];

pub fn names() -> &'static [&'static str] {
    &NAMES
}

/// Build the preset called `name` at the given resolution.
pub fn build(name: &str, width: usize, height: usize) -> RenderResult<World> {
    let mut world = match name {
        "spheres" => spheres()?,
        "checker" => checker()?,
        "simple_light" => simple_light()?,
        "cornell" => cornell()?,
        _ => return Err(RenderError::UnknownWorld(name.to_string())),
    };

    world.camera.set_resolution(width, height)?;
    Ok(world)
}

/// Build every preset, in [`NAMES`] order.
pub fn build_all(width: usize, height: usize) -> RenderResult<Vec<World>> {
    NAMES.iter().map(|name| build(name, width, height)).collect()
}

fn spheres() -> RenderResult<World> {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let left: Arc<dyn Material> = Arc::new(Dielectric::new(1.5)?);
    let right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    let objects = HittableList::new()
        .with(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?)
        .with(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center)?)
        .with(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left)?)
        .with(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right)?);

    let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z)?;
    Ok(World::new(Scene::new("spheres", objects, Background::Sky), camera))
}

fn checker() -> RenderResult<World> {
    let checker = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));

    let objects = HittableList::new()
        .with(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, material.clone())?)
        .with(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, material)?);

    let look_from = Vec3::new(13.0, 2.0, 3.0);
    let camera = Camera::new(look_from, Vec3::ZERO - look_from)?.with_vfov(20.0);
    Ok(World::new(Scene::new("checker", objects, Background::Sky), camera))
}

fn simple_light() -> RenderResult<World> {
    let checker = Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));
    let clay: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.6, 0.4, 0.3)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::ONE, 4.0));

    let objects = HittableList::new()
        .with(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?)
        .with(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, clay)?)
        .with(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, light.clone())?)
        .with(AxisRect::xy((3.0, 5.0), (1.0, 3.0), -2.0, light)?);

    let look_from = Vec3::new(26.0, 3.0, 6.0);
    let camera = Camera::new(look_from, Vec3::new(0.0, 2.0, 0.0) - look_from)?.with_vfov(20.0);
    Ok(World::new(
        Scene::new("simple_light", objects, Background::Solid(Color::ZERO)),
        camera,
    ))
}

fn cornell() -> RenderResult<World> {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::ONE, 15.0));

    let tall = RotateY::new(
        AxisBox::new(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone())?,
        15.0,
    );
    let short = RotateY::new(
        AxisBox::new(Vec3::ZERO, Vec3::new(165.0, 165.0, 165.0), white.clone())?,
        -18.0,
    );

    let full = (0.0, 555.0);
    let objects = HittableList::new()
        .with(AxisRect::yz(full, full, 555.0, green)?)
        .with(AxisRect::yz(full, full, 0.0, red)?)
        .with(AxisRect::xz((213.0, 343.0), (227.0, 332.0), 554.0, light)?)
        .with(AxisRect::xz(full, full, 0.0, white.clone())?)
        .with(AxisRect::xz(full, full, 555.0, white.clone())?)
        .with(AxisRect::xy(full, full, 555.0, white)?)
        .with(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0)))
        .with(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));

    let camera = Camera::new(Vec3::new(278.0, 278.0, -800.0), Vec3::Z)?.with_vfov(40.0);
    Ok(World::new(
        Scene::new("cornell", objects, Background::Solid(Color::ZERO)),
        camera,
    ))
}
