//! The lattice of points that the field lines are drawn through.
//!
//! Points are grouped into vertical lines: line `i` sits at a fixed base x,
//! its points step down the surface by `y_gap`. Every frame each point gets a
//! wave offset sampled from the noise field and a spring-damped cursor offset
//! pushed around by the pointer.

use crate::config::WaveConfig;
use crate::error::WaveError;
use crate::noise::WaveNoise;
use crate::pointer::PointerState;
use glam::DVec2;

/// Extra width the lattice covers beyond the viewport, split evenly per side.
pub const OVERFLOW_X: f64 = 200.0;
/// Extra height the lattice covers beyond the viewport, split evenly per side.
pub const OVERFLOW_Y: f64 = 30.0;
/// Spatial scale applied to the horizontal noise coordinate.
pub const NOISE_SCALE_X: f64 = 0.002;
/// Spatial scale applied to the vertical noise coordinate.
pub const NOISE_SCALE_Y: f64 = 0.0015;
/// A noise sample is multiplied by this to become an angle in radians.
pub const NOISE_TO_ANGLE: f64 = 12.0;
/// Minimum radius of pointer influence.
pub const MIN_INFLUENCE_RADIUS: f64 = 175.0;
/// Impulse gain of the pointer push.
pub const PUSH_GAIN: f64 = 0.00065;
/// Distance modulation of the pointer push.
const PUSH_FALLOFF: f64 = 0.001;
/// Largest accepted viewport side, in CSS pixels.
pub const MAX_VIEWPORT_SIDE: f64 = 16_384.0;
/// Upper bound on the number of lattice points.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Size and page offset of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl Viewport {
    /// A viewport at the page origin.
    ///
    /// Returns `WaveError::InvalidDimensions` if either size is negative,
    /// not finite, or larger than [`MAX_VIEWPORT_SIDE`].
    pub fn new(width: f64, height: f64) -> Result<Self, WaveError> {
        Self::with_offset(width, height, 0.0, 0.0)
    }

    /// A viewport whose top-left corner sits at `(left, top)` on the page.
    pub fn with_offset(width: f64, height: f64, left: f64, top: f64) -> Result<Self, WaveError> {
        let side_ok = |v: f64| v.is_finite() && (0.0..=MAX_VIEWPORT_SIDE).contains(&v);
        let sizes_ok = side_ok(width) && side_ok(height);
        if !sizes_ok || !left.is_finite() || !top.is_finite() {
            return Err(WaveError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            left,
            top,
        })
    }
}

/// One lattice node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Fixed anchor.
    pub base: DVec2,
    /// Noise-driven displacement, recomputed every frame.
    pub wave: DVec2,
    /// Spring-damped pointer displacement, carried across frames.
    pub cursor: DVec2,
    pub cursor_velocity: DVec2,
}

impl GridPoint {
    fn at(base: DVec2) -> Self {
        Self {
            base,
            wave: DVec2::ZERO,
            cursor: DVec2::ZERO,
            cursor_velocity: DVec2::ZERO,
        }
    }

    /// Displaced position rounded to one decimal place.
    ///
    /// `with_cursor = false` leaves out the cursor offset.
    pub fn displaced(&self, with_cursor: bool) -> DVec2 {
        let mut p = self.base + self.wave;
        if with_cursor {
            p += self.cursor;
        }
        DVec2::new(round_tenth(p.x), round_tenth(p.y))
    }
}

/// Rounds to one decimal with halves going toward positive infinity.
fn round_tenth(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}

/// The full lattice, stored line by line.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    lines: Vec<Vec<GridPoint>>,
}

impl Grid {
    /// Number of lines and points per line the lattice for `viewport` needs.
    ///
    /// Returns `WaveError::InvalidConfig` if a gap is not positive or the
    /// lattice would hold more than [`MAX_GRID_POINTS`] points.
    pub fn lattice_size(
        viewport: &Viewport,
        x_gap: f64,
        y_gap: f64,
    ) -> Result<(usize, usize), WaveError> {
        for (name, gap) in [("xGap", x_gap), ("yGap", y_gap)] {
            if !(gap.is_finite() && gap > 0.0) {
                return Err(WaveError::config(name, format!("must be greater than zero, got {gap}")));
            }
        }
        let lines = ((viewport.width + OVERFLOW_X) / x_gap).ceil() + 1.0;
        let points = ((viewport.height + OVERFLOW_Y) / y_gap).ceil() + 1.0;
        if !(lines * points <= MAX_GRID_POINTS as f64) {
            return Err(WaveError::config(
                "xGap/yGap",
                format!(
                    "{lines} x {points} lattice for a {}x{} viewport exceeds {MAX_GRID_POINTS} points",
                    viewport.width, viewport.height
                ),
            ));
        }
        Ok((lines as usize, points as usize))
    }

    /// Lays out a lattice covering `viewport` plus the overflow margins,
    /// centered on the viewport.
    ///
    /// Fails like [`Grid::lattice_size`], before anything is allocated.
    pub fn build(viewport: &Viewport, x_gap: f64, y_gap: f64) -> Result<Self, WaveError> {
        let (line_count, per_line) = Self::lattice_size(viewport, x_gap, y_gap)?;
        let x_start = (viewport.width - x_gap * (line_count - 1) as f64) / 2.0;
        let y_start = (viewport.height - y_gap * (per_line - 1) as f64) / 2.0;

        let lines = (0..line_count)
            .map(|i| {
                (0..per_line)
                    .map(|j| {
                        GridPoint::at(DVec2::new(
                            x_start + x_gap * i as f64,
                            y_start + y_gap * j as f64,
                        ))
                    })
                    .collect()
            })
            .collect();
        Ok(Self { lines })
    }

    /// Lines of points, left to right, each top to bottom.
    pub fn lines(&self) -> &[Vec<GridPoint>] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of points.
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Iterates over every point.
    pub fn points(&self) -> impl Iterator<Item = &GridPoint> {
        self.lines.iter().flatten()
    }

    /// Advances every point to `time_ms`.
    pub fn update(
        &mut self,
        noise: &WaveNoise,
        pointer: &PointerState,
        config: &WaveConfig,
        time_ms: f64,
    ) {
        let radius = MIN_INFLUENCE_RADIUS.max(pointer.smoothed_speed);
        let push = pointer.direction() * radius * pointer.smoothed_speed * PUSH_GAIN;
        let limit = config.max_cursor_move;

        for p in self.lines.iter_mut().flatten() {
            let angle = noise.perlin2(
                (p.base.x + time_ms * config.wave_speed_x) * NOISE_SCALE_X,
                (p.base.y + time_ms * config.wave_speed_y) * NOISE_SCALE_Y,
            ) * NOISE_TO_ANGLE;
            p.wave = DVec2::new(
                angle.cos() * config.wave_amp_x,
                angle.sin() * config.wave_amp_y,
            );

            let dist = p.base.distance(pointer.smoothed);
            if dist < radius {
                let falloff = 1.0 - dist / radius;
                p.cursor_velocity += push * ((dist * PUSH_FALLOFF).cos() * falloff);
            }

            p.cursor_velocity += -p.cursor * config.tension;
            p.cursor_velocity *= config.friction;
            p.cursor += p.cursor_velocity * 2.0;
            p.cursor = p.cursor.clamp(DVec2::splat(-limit), DVec2::splat(limit));
        }
    }
}
