//! Render targets and the per-pixel accumulation buffer.
//!
//! Pixel addressing: `y = 0` is the bottom row of the image. Storage is kept
//! top row first, so the flip happens here and presentation can copy rows
//! straight out.

use crate::material::Color;
use crate::renderer::color_to_rgba;
use crate::{RenderError, RenderResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Running sum of samples for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelData {
    pub color: Color,
    pub sample_count: u32,
}

impl PixelData {
    /// Mean of all samples, or black if there are none.
    pub fn mean(&self) -> Color {
        if self.sample_count == 0 {
            Color::ZERO
        } else {
            self.color / self.sample_count as f64
        }
    }
}

/// Something the renderer can accumulate samples into.
///
/// `set_pixel`/`add_pixel` take `&self` so row workers can write in parallel;
/// implementations must allow concurrent calls for different rows. The
/// scheduler never has two jobs on the same row at once.
/// `clear`/`resize` take `&mut self` and therefore only run when no worker
/// holds the target.
pub trait RenderTarget: Send + Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Overwrite a pixel's accumulator with a single sample.
    fn set_pixel(&self, x: usize, y: usize, color: Color);

    /// Add one sample to a pixel's accumulator.
    fn add_pixel(&self, x: usize, y: usize, color: Color);

    /// Zero every accumulator.
    fn clear(&mut self);

    /// Reallocate, keeping the overlapping top-left region.
    fn resize(&mut self, width: usize, height: usize) -> RenderResult<()>;

    /// Per-pixel means in presentation order (top row first, left to right).
    fn means(&self) -> Vec<Color>;

    /// Gamma-corrected 8-bit RGBA in presentation order.
    fn to_rgba(&self) -> Vec<u8> {
        self.means().into_iter().flat_map(color_to_rgba).collect()
    }
}

/// Accumulation buffer with one lock per row.
///
/// Workers own disjoint rows, so the row locks are never contended in normal
/// operation.
pub struct AccumulationBuffer {
    width: usize,
    height: usize,
    rows: Vec<Mutex<Vec<PixelData>>>,
}

impl AccumulationBuffer {
    pub fn new(width: usize, height: usize) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        Ok(Self {
            width,
            height,
            rows: Self::fresh_rows(width, height),
        })
    }

    fn fresh_rows(width: usize, height: usize) -> Vec<Mutex<Vec<PixelData>>> {
        (0..height)
            .map(|_| Mutex::new(vec![PixelData::default(); width]))
            .collect()
    }

    /// Lock the storage row holding image row `y`.
    fn row(&self, y: usize) -> MutexGuard<'_, Vec<PixelData>> {
        // A panicking worker cannot leave a half-written PixelData behind
        self.rows[self.height - 1 - y]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Read back a pixel's accumulator.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<PixelData> {
        self.in_bounds(x, y).then(|| self.row(y)[x])
    }
}

impl RenderTarget for AccumulationBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&self, x: usize, y: usize, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        self.row(y)[x] = PixelData {
            color,
            sample_count: 1,
        };
    }

    fn add_pixel(&self, x: usize, y: usize, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        let pixel = &mut self.row(y)[x];
        pixel.color += color;
        pixel.sample_count += 1;
    }

    fn clear(&mut self) {
        for row in &mut self.rows {
            let row = row.get_mut().unwrap_or_else(PoisonError::into_inner);
            row.fill(PixelData::default());
        }
    }

    fn resize(&mut self, width: usize, height: usize) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        let old_rows = std::mem::replace(&mut self.rows, Self::fresh_rows(width, height));
        let keep = width.min(self.width);

        for (new_row, old_row) in self.rows.iter_mut().zip(old_rows) {
            let new_row = new_row.get_mut().unwrap_or_else(PoisonError::into_inner);
            let old_row = old_row.into_inner().unwrap_or_else(PoisonError::into_inner);
            new_row[..keep].copy_from_slice(&old_row[..keep]);
        }

        self.width = width;
        self.height = height;
        Ok(())
    }

    fn means(&self) -> Vec<Color> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for row in &self.rows {
            let row = row.lock().unwrap_or_else(PoisonError::into_inner);
            out.extend(row.iter().map(PixelData::mean));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_pixel_mean_is_idempotent() {
        let buffer = AccumulationBuffer::new(4, 4).unwrap();
        let c = Color::new(0.25, 0.5, 0.75);

        for k in 1..=10 {
            buffer.add_pixel(1, 2, c);
            let pixel = buffer.get_pixel(1, 2).unwrap();
            assert_eq!(pixel.sample_count, k);
            assert!((pixel.mean() - c).length() < 1e-12);
        }
    }

    #[test]
    fn test_mean_of_mixed_samples() {
        let buffer = AccumulationBuffer::new(2, 2).unwrap();
        buffer.add_pixel(0, 0, Color::ONE);
        buffer.add_pixel(0, 0, Color::ZERO);
        assert_eq!(buffer.get_pixel(0, 0).unwrap().mean(), Color::splat(0.5));
    }

    #[test]
    fn test_set_pixel_overwrites() {
        let buffer = AccumulationBuffer::new(2, 2).unwrap();
        buffer.add_pixel(1, 1, Color::ONE);
        buffer.add_pixel(1, 1, Color::ONE);
        buffer.set_pixel(1, 1, Color::new(0.2, 0.0, 0.0));

        let pixel = buffer.get_pixel(1, 1).unwrap();
        assert_eq!(pixel.sample_count, 1);
        assert_eq!(pixel.color, Color::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut buffer = AccumulationBuffer::new(3, 3).unwrap();
        buffer.add_pixel(0, 0, Color::ONE);
        buffer.add_pixel(2, 2, Color::ONE);
        buffer.clear();

        assert!(buffer.means().iter().all(|c| *c == Color::ZERO));
        assert_eq!(buffer.get_pixel(2, 2).unwrap(), PixelData::default());
    }

    #[test]
    fn test_row_zero_is_bottom() {
        let buffer = AccumulationBuffer::new(2, 3).unwrap();
        buffer.set_pixel(0, 0, Color::ONE);

        // Presentation order starts at the top row; pixel (0, 0) is the last row
        let means = buffer.means();
        assert_eq!(means[2 * 2], Color::ONE);
        assert_eq!(means[0], Color::ZERO);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let buffer = AccumulationBuffer::new(2, 2).unwrap();
        buffer.add_pixel(5, 0, Color::ONE);
        buffer.set_pixel(0, 9, Color::ONE);
        assert!(buffer.get_pixel(5, 0).is_none());
        assert!(buffer.means().iter().all(|c| *c == Color::ZERO));
    }

    fn tag(x: usize, y: usize) -> Color {
        Color::new(x as f64, y as f64, 1.0)
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut buffer = AccumulationBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                buffer.set_pixel(x, y, tag(x, y));
            }
        }

        // Shrinking keeps the top-left 2x2 of the presented image, which is
        // rows y = 2 and 3 counted from the bottom
        buffer.resize(2, 2).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(buffer.get_pixel(x, y).unwrap().color, tag(x, y + 2));
            }
        }

        // Growing back restores those pixels in place; everything else is zero
        buffer.resize(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let pixel = buffer.get_pixel(x, y).unwrap();
                if x < 2 && y >= 2 {
                    assert_eq!(pixel.color, tag(x, y));
                    assert_eq!(pixel.sample_count, 1);
                } else {
                    assert_eq!(pixel, PixelData::default());
                }
            }
        }
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut buffer = AccumulationBuffer::new(2, 2).unwrap();
        assert!(buffer.resize(0, 2).is_err());
        assert_eq!((buffer.width(), buffer.height()), (2, 2));
        assert!(AccumulationBuffer::new(2, 0).is_err());
    }

    #[test]
    fn test_to_rgba_gamma() {
        let buffer = AccumulationBuffer::new(1, 1).unwrap();
        buffer.set_pixel(0, 0, Color::new(0.25, 1.0, 4.0));
        assert_eq!(buffer.to_rgba(), vec![127, 255, 255, 255]);
    }

    #[test]
    fn test_parallel_rows() {
        use rayon::prelude::*;

        let buffer = AccumulationBuffer::new(8, 64).unwrap();
        (0..64).into_par_iter().for_each(|y| {
            for _ in 0..10 {
                for x in 0..8 {
                    buffer.add_pixel(x, y, Color::ONE);
                }
            }
        });

        for y in 0..64 {
            for x in 0..8 {
                assert_eq!(buffer.get_pixel(x, y).unwrap().sample_count, 10);
            }
        }
    }
}
