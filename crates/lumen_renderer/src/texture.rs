//! Surface color functions.
//!
//! Textures are shared (`Arc<dyn Texture>`) between any number of materials.

use crate::{Color, RenderError, RenderResult};
use lumen_math::{Interval, Vec3};
use std::path::Path;
use std::sync::Arc;

/// Maps a surface coordinate and a world point to a color.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color;
}

/// A texture that returns the same color everywhere.
#[derive(Debug, Clone)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Vec3) -> Color {
        self.albedo
    }
}

/// A 3-D checkerboard that ignores the surface parameterization.
///
/// The sign of `sin(10x)·sin(10y)·sin(10z)` picks `odd` (negative) or
/// `even` (otherwise), so cells are π/10 wide along every axis.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    /// Checker between two solid colors.
    pub fn from_colors(odd: Color, even: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(odd)), Arc::new(SolidColor::new(even)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Nearest-neighbor lookup into a pre-decoded pixel grid.
///
/// Pixels are stored row-major with row 0 at the top of the image.
#[derive(Clone, Debug)]
pub struct ImageTexture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl ImageTexture {
    /// Wrap an already decoded grid of linear colors.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> RenderResult<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(RenderError::InvalidResolution { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file into a texture.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb8();
        let (width, height) = (img.width() as usize, img.height() as usize);

        let pixels = img
            .pixels()
            .map(|px| {
                Color::new(
                    px[0] as f64 / 255.0,
                    px[1] as f64 / 255.0,
                    px[2] as f64 / 255.0,
                )
            })
            .collect();

        log::info!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Vec3) -> Color {
        let u = Interval::UNIT.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - Interval::UNIT.clamp(v);

        let x = (u * (self.width - 1) as f64) as usize;
        let y = (v * (self.height - 1) as f64) as usize;

        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn checker() -> CheckerTexture {
        CheckerTexture::from_colors(Color::ZERO, Color::ONE)
    }

    #[test]
    fn test_solid_color_ignores_inputs() {
        let tex = SolidColor::from_rgb(0.2, 0.4, 0.6);
        let a = tex.value(0.0, 0.0, Vec3::ZERO);
        let b = tex.value(0.9, 0.1, Vec3::new(5.0, -3.0, 2.0));
        assert_eq!(a, Color::new(0.2, 0.4, 0.6));
        assert_eq!(a, b);
    }

    #[test]
    fn test_checker_alternates_with_period() {
        let tex = checker();
        let cell = PI / 10.0;
        // Centre of a cell where all three sines are positive
        let p = Vec3::splat(cell / 2.0);
        assert_eq!(tex.value(0.0, 0.0, p), Color::ONE);

        // Stepping one cell along any axis flips the sign of one factor
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert_eq!(tex.value(0.0, 0.0, p + axis * cell), Color::ZERO);
            assert_eq!(tex.value(0.0, 0.0, p + axis * 2.0 * cell), Color::ONE);
        }
    }

    #[test]
    fn test_checker_ignores_uv() {
        let tex = checker();
        let p = Vec3::new(0.1, 0.2, -0.3);
        assert_eq!(tex.value(0.0, 0.0, p), tex.value(0.7, 0.3, p));
    }

    fn two_by_two() -> ImageTexture {
        // top-left red, top-right green, bottom-left blue, bottom-right white
        ImageTexture::from_pixels(
            2,
            2,
            vec![Color::X, Color::Y, Color::Z, Color::ONE],
        )
        .unwrap()
    }

    #[test]
    fn test_image_texture_flips_v() {
        let tex = two_by_two();
        assert_eq!(tex.value(0.0, 1.0, Vec3::ZERO), Color::X);
        assert_eq!(tex.value(1.0, 1.0, Vec3::ZERO), Color::Y);
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Color::Z);
        assert_eq!(tex.value(1.0, 0.0, Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_image_texture_truncates_and_clamps() {
        let tex = two_by_two();
        // 0.9 * (2 - 1) truncates to column 0
        assert_eq!(tex.value(0.9, 1.0, Vec3::ZERO), Color::X);
        // Out of range coordinates clamp to the edges
        assert_eq!(tex.value(-3.0, 7.0, Vec3::ZERO), Color::X);
        assert_eq!(tex.value(4.0, -1.0, Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_image_texture_open_png() {
        // Top row red, green; bottom row blue, white
        let bytes = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let path = std::env::temp_dir().join(format!("lumen-texture-{}.png", std::process::id()));
        image::save_buffer(&path, &bytes, 2, 2, image::ColorType::Rgb8).unwrap();

        let tex = ImageTexture::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(tex.value(0.0, 1.0, Vec3::ZERO), Color::X);
        assert_eq!(tex.value(1.0, 1.0, Vec3::ZERO), Color::Y);
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Color::Z);
        assert_eq!(tex.value(1.0, 0.0, Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_image_texture_open_missing_file() {
        let path = std::env::temp_dir().join("lumen-texture-does-not-exist.png");
        assert!(matches!(ImageTexture::open(path), Err(RenderError::Image(_))));
    }

    #[test]
    fn test_image_texture_rejects_bad_grid() {
        assert!(ImageTexture::from_pixels(2, 2, vec![Color::ZERO; 3]).is_err());
        assert!(ImageTexture::from_pixels(0, 1, Vec::new()).is_err());
    }
}
