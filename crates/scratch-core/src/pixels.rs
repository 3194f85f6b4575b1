//! Pixel surface
//!
//! Owned RGBA8 drawing buffer and the operations the scratch surface needs
//! from it:
//! - Stretching the overlay image over the whole buffer
//! - Destination-out circle erasure
//! - Alpha channel statistics for completion detection

use crate::error::ImageError;

/// Bytes per RGBA pixel
const CHANNELS: usize = 4;

/// Alpha channel offset within a pixel
const ALPHA: usize = 3;

/// Straight RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Metallic gold used for the default scratch cover
    pub const GOLD: Self = Self([212, 175, 55, 255]);

    /// Alpha channel
    #[inline]
    #[must_use]
    pub fn alpha(self) -> u8 {
        self.0[ALPHA]
    }
}

/// Aggregate alpha statistics over a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlphaStats {
    /// Pixels sampled
    pub total: u64,
    /// Pixels whose alpha is exactly zero
    pub transparent: u64,
}

impl AlphaStats {
    /// Ratio of fully transparent pixels to total pixels (0 for an empty surface)
    #[inline]
    #[must_use]
    pub fn erased_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.transparent as f64 / self.total as f64;
            ratio
        }
    }
}

/// A decoded RGBA image, ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl OverlayImage {
    /// Wrap decoded RGBA8 data
    ///
    /// # Errors
    /// - `ImageError::ZeroSized` if either dimension is zero
    /// - `ImageError::LengthMismatch` if `data` is not `width * height * 4` bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroSized { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Single-colour image
    #[must_use]
    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            data: color.0.to_vec(),
        }
    }

    /// The default opaque gold cover
    #[inline]
    #[must_use]
    pub fn gold() -> Self {
        Self::solid(Rgba::GOLD)
    }

    /// Width in pixels
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Rgba([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Read/write access to a drawing surface, by coordinate and in aggregate
///
/// Hosts with their own canvas can implement this to let the scratch surface
/// drive it; [`PixelBuffer`] is the in-memory implementation.
pub trait PixelSurface {
    /// Width in device pixels
    fn width(&self) -> u32;

    /// Height in device pixels
    fn height(&self) -> u32;

    /// Read a pixel, `None` when out of bounds
    fn pixel(&self, x: u32, y: u32) -> Option<Rgba>;

    /// Write a pixel; out-of-bounds writes are ignored
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba);

    /// Clear the surface and draw `image` stretched over all of it
    fn draw_image_scaled(&mut self, image: &OverlayImage);

    /// Remove every pixel whose centre lies inside the circle
    fn erase_circle(&mut self, cx: f64, cy: f64, radius: f64);

    /// Sample alpha over the whole surface
    fn alpha_stats(&self) -> AlphaStats;
}

/// In-memory RGBA8 surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Raw RGBA bytes, row-major
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

impl PixelSurface for PixelBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let mut px = [0; CHANNELS];
        px.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(Rgba(px))
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.data[i..i + CHANNELS].copy_from_slice(&color.0);
        }
    }

    fn draw_image_scaled(&mut self, image: &OverlayImage) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        // Nearest-neighbour sampling at destination pixel centres
        let sx = f64::from(image.width()) / f64::from(self.width);
        let sy = f64::from(image.height()) / f64::from(self.height);
        for y in 0..self.height {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let src_y = ((f64::from(y) + 0.5) * sy) as u32;
            let src_y = src_y.min(image.height() - 1);
            for x in 0..self.width {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let src_x = ((f64::from(x) + 0.5) * sx) as u32;
                let src_x = src_x.min(image.width() - 1);
                let color = image.pixel(src_x, src_y);
                self.set_pixel(x, y, color);
            }
        }
    }

    fn erase_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        if !(radius > 0.0 && cx.is_finite() && cy.is_finite()) {
            return;
        }
        let Some((x0, x1)) = span(cx, radius, self.width) else {
            return;
        };
        let Some((y0, y1)) = span(cy, radius, self.height) else {
            return;
        };

        let r2 = radius * radius;
        for y in y0..=y1 {
            let dy = f64::from(y) + 0.5 - cy;
            for x in x0..=x1 {
                let dx = f64::from(x) + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, Rgba::TRANSPARENT);
                }
            }
        }
    }

    fn alpha_stats(&self) -> AlphaStats {
        let transparent = self
            .data
            .chunks_exact(CHANNELS)
            .filter(|px| px[ALPHA] == 0)
            .count();
        AlphaStats {
            total: u64::from(self.width) * u64::from(self.height),
            transparent: transparent as u64,
        }
    }
}

/// Pixel index range covering `[center - radius, center + radius]`, clamped
/// to `[0, len)`. `None` when the range misses the surface entirely.
fn span(center: f64, radius: f64, len: u32) -> Option<(u32, u32)> {
    if len == 0 {
        return None;
    }
    let lo = (center - radius).floor();
    let hi = (center + radius).floor();
    if hi < 0.0 || lo >= f64::from(len) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = lo.max(0.0) as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hi = (hi as u32).min(len - 1);
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        buffer.draw_image_scaled(&OverlayImage::gold());
        buffer
    }

    #[test]
    fn new_buffer_is_transparent() {
        let buffer = PixelBuffer::new(4, 3);
        let stats = buffer.alpha_stats();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.transparent, 12);
        assert!((stats.erased_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_covers_everything() {
        let buffer = gold_buffer(10, 6);
        assert_eq!(buffer.alpha_stats().transparent, 0);
        assert_eq!(buffer.pixel(9, 5), Some(Rgba::GOLD));
        assert_eq!(buffer.pixel(10, 0), None);
    }

    #[test]
    fn overlay_is_stretched_not_tiled() {
        // Left half red, right half blue
        let data = [[255, 0, 0, 255], [0, 0, 255, 255]].concat();
        let image = OverlayImage::from_rgba(2, 1, data).unwrap();
        let mut buffer = PixelBuffer::new(8, 2);
        buffer.draw_image_scaled(&image);

        assert_eq!(buffer.pixel(3, 1), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(buffer.pixel(4, 0), Some(Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn erase_circle_clears_disc_only() {
        let mut buffer = gold_buffer(20, 20);
        buffer.erase_circle(10.0, 10.0, 3.0);

        assert_eq!(buffer.pixel(10, 10).map(Rgba::alpha), Some(0));
        assert_eq!(buffer.pixel(0, 0), Some(Rgba::GOLD));
        let erased = buffer.alpha_stats().transparent;
        // Area of a radius-3 disc is ~28
        assert!((24..=32).contains(&erased), "erased {erased}");
    }

    #[test]
    fn erase_circle_clips_at_edges() {
        let mut buffer = gold_buffer(8, 8);
        buffer.erase_circle(-2.0, -2.0, 1.0);
        assert_eq!(buffer.alpha_stats().transparent, 0);

        buffer.erase_circle(0.0, 0.0, 2.0);
        assert!(buffer.alpha_stats().transparent > 0);

        buffer.erase_circle(100.0, 4.0, 200.0);
        assert_eq!(buffer.alpha_stats().transparent, 64);
    }

    #[test]
    fn degenerate_erasures_are_ignored() {
        let mut buffer = gold_buffer(8, 8);
        buffer.erase_circle(4.0, 4.0, 0.0);
        buffer.erase_circle(f64::NAN, 4.0, 3.0);
        assert_eq!(buffer.alpha_stats().transparent, 0);
    }

    #[test]
    fn rejects_malformed_images() {
        assert_eq!(
            OverlayImage::from_rgba(0, 1, vec![]),
            Err(ImageError::ZeroSized {
                width: 0,
                height: 1
            })
        );
        assert_eq!(
            OverlayImage::from_rgba(2, 2, vec![0; 15]),
            Err(ImageError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn empty_surface_fraction_is_zero() {
        assert!(AlphaStats::default().erased_fraction().abs() < f64::EPSILON);
    }
}
