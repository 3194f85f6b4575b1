//! Overlay artwork loading

use anyhow::Context;
use png::{ColorType, Transformations};
use scratch_core::OverlayImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decode a PNG into an RGBA8 overlay
///
/// Palette, grey and 16-bit images are widened to 8-bit RGBA. Transparent
/// margins are kept: they count as already scratched.
pub(crate) fn load_png(path: &Path) -> anyhow::Result<OverlayImage> {
    let file = File::open(path)
        .with_context(|| format!("failed to open overlay {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .with_context(|| format!("failed to read overlay header {}", path.display()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .with_context(|| format!("failed to decode overlay {}", path.display()))?;
    let bytes = &buf[..frame.buffer_size()];

    let rgba: Vec<u8> = match frame.color_type {
        ColorType::Rgba => bytes.to_vec(),
        ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => bytes.iter().flat_map(|&g| [g, g, g, u8::MAX]).collect(),
        ColorType::Indexed => anyhow::bail!("overlay {} was not expanded", path.display()),
    };

    let image = OverlayImage::from_rgba(frame.width, frame.height, rgba)
        .with_context(|| format!("invalid overlay {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "overlay decoded"
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scratch_core::{PixelBuffer, PixelSurface};
    use std::io::BufWriter;

    fn write_png(path: &Path, width: u32, height: u32, color: ColorType, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_rgba_keeps_transparent_margin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.png");
        // 2x1: transparent left, opaque gold right
        write_png(
            &path,
            2,
            1,
            ColorType::Rgba,
            &[0, 0, 0, 0, 212, 175, 55, 255],
        );

        let image = load_png(&path).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));

        let mut buffer = PixelBuffer::new(4, 2);
        buffer.draw_image_scaled(&image);
        let stats = buffer.alpha_stats();
        assert_eq!(stats.transparent, 4);
        assert_eq!(stats.total, 8);
    }

    #[test]
    fn test_rgb_is_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        write_png(&path, 1, 2, ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);

        let image = load_png(&path).unwrap();
        let mut buffer = PixelBuffer::new(1, 2);
        buffer.draw_image_scaled(&image);
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_not_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_png(&path).is_err());
        assert!(load_png(&dir.path().join("absent.png")).is_err());
    }
}
