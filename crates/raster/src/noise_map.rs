//! Grayscale previews of the noise that steers the lattice.
//!
//! Sampling goes through `noise::NoiseFn`, so any combinator from the `noise`
//! crate can be layered over [`WaveNoise`] before it is rasterised.

use noise::{NoiseFn, ScalePoint, TranslatePoint};
use wave_field_core::grid::{NOISE_SCALE_X, NOISE_SCALE_Y};
use wave_field_core::{WaveConfig, WaveNoise};

/// The noise a lattice point at pixel `(x, y)` reads at `time_ms`.
///
/// Matches `Grid::update` before the angle gain: the point drifts by the
/// wave speeds, then each axis is scaled into noise space.
pub fn lattice_noise(
    noise: WaveNoise,
    config: &WaveConfig,
    time_ms: f64,
) -> TranslatePoint<ScalePoint<WaveNoise>> {
    let scaled = ScalePoint::new(noise)
        .set_x_scale(NOISE_SCALE_X)
        .set_y_scale(NOISE_SCALE_Y);
    TranslatePoint::new(scaled)
        .set_x_translation(time_ms * config.wave_speed_x)
        .set_y_translation(time_ms * config.wave_speed_y)
}

/// Samples `source` at every pixel and maps [-1, 1] to opaque gray.
pub fn noise_to_rgba(source: &impl NoiseFn<f64, 2>, width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let v = source.get([x as f64, y as f64]);
            let level = ((v.clamp(-1.0, 1.0) * 0.5 + 0.5) * 255.0).round() as u8;
            out.extend_from_slice(&[level, level, level, 255]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::Constant;

    #[test]
    fn constant_source_fills_uniform_gray() {
        let buf = noise_to_rgba(&Constant::new(0.0), 3, 2);
        assert_eq!(buf.len(), 3 * 2 * 4);
        assert!(buf.chunks(4).all(|p| p == [128, 128, 128, 255]));
    }

    #[test]
    fn out_of_range_values_saturate() {
        assert_eq!(noise_to_rgba(&Constant::new(5.0), 1, 1), [255, 255, 255, 255]);
        assert_eq!(noise_to_rgba(&Constant::new(-5.0), 1, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn lattice_noise_reads_what_the_grid_reads() {
        let config = WaveConfig::default();
        let noise = WaveNoise::new(7.0);
        let t = 1500.0;
        let source = lattice_noise(noise.clone(), &config, t);
        let (x, y) = (120.0, 45.0);
        let expected = noise.perlin2(
            (x + t * config.wave_speed_x) * NOISE_SCALE_X,
            (y + t * config.wave_speed_y) * NOISE_SCALE_Y,
        );
        assert!((source.get([x, y]) - expected).abs() < 1e-12);
    }

    #[test]
    fn preview_varies_across_the_image() {
        let source = lattice_noise(WaveNoise::new(42.0), &WaveConfig::default(), 0.0);
        let buf = noise_to_rgba(&source, 256, 64);
        let first = buf[0];
        assert!(buf.chunks(4).any(|p| p[0] != first));
        assert!(buf.chunks(4).all(|p| p[0] == p[1] && p[1] == p[2] && p[3] == 255));
    }
}
