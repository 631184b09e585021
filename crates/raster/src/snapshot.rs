//! PNG snapshots of a [`Frame`] or of the raw noise.
//!
//! This module is feature-gated behind `png` (default on) so that consumers
//! that only need the pixel buffer can skip the `image` crate.

use noise::NoiseFn;
use std::path::Path;
use wave_field_core::{Frame, Rgba, WaveError};

use crate::noise_map::noise_to_rgba;
use crate::pixel::frame_to_rgba;

/// Largest snapshot, in pixels, that will be rasterised.
pub const MAX_SNAPSHOT_PIXELS: usize = 4096 * 4096;

/// Writes `frame` as a `width` x `height` PNG composited over `background`.
///
/// Returns `WaveError::InvalidDimensions` if the image would exceed
/// [`MAX_SNAPSHOT_PIXELS`], or `WaveError::Io` on write failure.
pub fn write_png(
    frame: &Frame,
    width: usize,
    height: usize,
    background: Rgba,
    path: &Path,
) -> Result<(), WaveError> {
    let (w, h) = checked_size(width, height)?;
    save_rgba(frame_to_rgba(frame, width, height, background), w, h, path)
}

/// Writes a grayscale preview of `source`, one sample per pixel.
pub fn write_noise_png(
    source: &impl NoiseFn<f64, 2>,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), WaveError> {
    let (w, h) = checked_size(width, height)?;
    save_rgba(noise_to_rgba(source, width, height), w, h, path)
}

fn checked_size(width: usize, height: usize) -> Result<(u32, u32), WaveError> {
    let w = u32::try_from(width).map_err(|_| WaveError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| WaveError::InvalidDimensions)?;
    if width.checked_mul(height).map_or(true, |n| n > MAX_SNAPSHOT_PIXELS) {
        return Err(WaveError::InvalidDimensions);
    }
    Ok((w, h))
}

fn save_rgba(rgba: Vec<u8>, w: u32, h: u32, path: &Path) -> Result<(), WaveError> {
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| WaveError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| WaveError::Io(e.to_string()))?;
    log::debug!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_field_core::{Seed, WaveNoise};

    #[test]
    fn write_png_round_trip() {
        let mut seed = Seed::new(32.0, 24.0, 42.0);
        seed.start_ms = 1000.0;
        let (_, frame) = seed.replay().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waves.png");

        write_png(&frame, 32, 24, Rgba::from_rgb8(0, 0, 0, 1.0), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 24);
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn oversized_snapshot_is_refused_before_rasterising() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let result = write_png(&Frame::default(), 16_384, 16_384, Rgba::TRANSPARENT, &path);
        assert!(matches!(result, Err(WaveError::InvalidDimensions)));
        assert!(!path.exists());
    }

    #[test]
    fn noise_preview_is_opaque_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.png");
        let source = WaveNoise::new(3.0);
        write_noise_png(&noise::ScalePoint::new(source).set_scale(0.1), 16, 8, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert!(img.pixels().all(|p| p.0[3] == 255 && p.0[0] == p.0[1]));
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("waves.png");
        let result = write_png(&Frame::default(), 4, 4, Rgba::TRANSPARENT, &path);
        assert!(matches!(result, Err(WaveError::Io(_))));
    }
}
