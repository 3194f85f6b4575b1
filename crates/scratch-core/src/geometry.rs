//! Viewport geometry
//!
//! Maps client (CSS pixel, viewport space) coordinates onto the device-pixel
//! buffer, and places the scratch area over the rendered prize artwork.

use serde::{Deserialize, Serialize};

/// Bounding rectangle in client coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl ClientRect {
    /// Create new rect
    #[inline]
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when the rect has no drawable area (including NaN or infinite sizes)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let drawable = |len: f64| len.is_finite() && len > 0.0;
        !(drawable(self.width) && drawable(self.height))
    }

    /// Centre point
    #[inline]
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Container rect plus the device's pixel density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Rendered rect of the scratch container
    pub rect: ClientRect,
    /// Device pixels per CSS pixel
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Create new viewport
    #[inline]
    #[must_use]
    pub fn new(rect: ClientRect, device_pixel_ratio: f64) -> Self {
        Self {
            rect,
            device_pixel_ratio,
        }
    }

    /// Pixel density, falling back to 1 when unreported or nonsensical
    #[inline]
    #[must_use]
    pub fn dpr(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    /// Buffer size in device pixels (`floor(css * dpr)` on each axis)
    #[must_use]
    pub fn buffer_size(&self) -> (u32, u32) {
        let dpr = self.dpr();
        (device_len(self.rect.width, dpr), device_len(self.rect.height, dpr))
    }

    /// Map a client point into buffer coordinates for a buffer of `size`
    #[must_use]
    pub fn to_buffer(&self, client_x: f64, client_y: f64, size: (u32, u32)) -> (f64, f64) {
        let r = &self.rect;
        (
            (client_x - r.left) / r.width * f64::from(size.0),
            (client_y - r.top) / r.height * f64::from(size.1),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_len(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).floor();
    if px.is_finite() && px > 0.0 {
        px.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Where the scratch area sits on the prize artwork, in fractions of the
/// artwork's rendered size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlacement {
    /// Horizontal centre
    pub center_x: f64,
    /// Vertical centre
    pub center_y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl OverlayPlacement {
    /// Container rect for artwork rendered at `artwork`
    #[must_use]
    pub fn container_rect(&self, artwork: ClientRect) -> ClientRect {
        let width = artwork.width * self.width;
        let height = artwork.height * self.height;
        ClientRect {
            left: artwork.left + artwork.width * self.center_x - width / 2.0,
            top: artwork.top + artwork.height * self.center_y - height / 2.0,
            width,
            height,
        }
    }
}

impl Default for OverlayPlacement {
    /// The golden ticket's label area
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.68,
            width: 0.45,
            height: 0.32,
        }
    }
}
