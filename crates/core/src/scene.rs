//! The wave field as a whole: noise, lattice, and pointer owned together.
//!
//! [`WaveField`] holds everything one background instance needs and nothing
//! global, so any number of instances can run side by side. Hosts feed it
//! resize and pointer events and call [`WaveField::tick`] once per frame.

use crate::config::WaveConfig;
use crate::draw::{render, Frame};
use crate::error::WaveError;
use crate::grid::{Grid, Viewport};
use crate::noise::WaveNoise;
use crate::pointer::PointerState;
use glam::DVec2;

/// Half the size of the decorative dot that trails the pointer.
pub const FOLLOWER_RADIUS: f64 = 4.0;

/// One animated background.
#[derive(Debug, Clone)]
pub struct WaveField {
    config: WaveConfig,
    noise: WaveNoise,
    grid: Grid,
    pointer: PointerState,
    viewport: Viewport,
    ticks: u64,
}

impl WaveField {
    /// Creates a field for `viewport` with noise seeded by `seed`.
    ///
    /// Returns `WaveError::InvalidConfig` if the config fails validation or
    /// the lattice for `viewport` would be too large. Wave speeds are
    /// clamped as described in [`WaveConfig::validated`].
    pub fn new(config: WaveConfig, seed: f64, viewport: Viewport) -> Result<Self, WaveError> {
        let config = config.validated()?;
        let grid = Grid::build(&viewport, config.x_gap, config.y_gap)?;
        log::debug!(
            "wave field {}x{}: {} lines, {} points",
            viewport.width,
            viewport.height,
            grid.line_count(),
            grid.point_count()
        );
        Ok(Self {
            config,
            noise: WaveNoise::new(seed),
            grid,
            pointer: PointerState::default(),
            viewport,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn noise(&self) -> &WaveNoise {
        &self.noise
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Adopts a new viewport and rebuilds the lattice from scratch.
    ///
    /// Cursor offsets and velocities are discarded along with the old points.
    /// If the new lattice would be too large the field is left untouched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), WaveError> {
        self.grid = Grid::build(&viewport, self.config.x_gap, self.config.y_gap)?;
        self.viewport = viewport;
        log::debug!(
            "resized to {}x{}: {} lines, {} points",
            viewport.width,
            viewport.height,
            self.grid.line_count(),
            self.grid.point_count()
        );
        Ok(())
    }

    /// Records a pointer event at page coordinates `(x, y)`.
    ///
    /// The position is made relative to the surface's page offset and
    /// corrected by the current vertical scroll.
    pub fn pointer_moved(&mut self, x: f64, y: f64, scroll_y: f64) {
        let position = DVec2::new(
            x - self.viewport.left,
            y - self.viewport.top + scroll_y,
        );
        self.pointer.move_to(position);
    }

    /// Advances pointer kinematics and every grid point to `time_ms`.
    pub fn step(&mut self, time_ms: f64) {
        self.pointer.advance();
        self.grid
            .update(&self.noise, &self.pointer, &self.config, time_ms);
        self.ticks += 1;
    }

    /// Draw commands for the current state.
    pub fn render(&self) -> Frame {
        render(
            &self.grid,
            self.config.line_color,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// One full frame: [`step`](Self::step) then [`render`](Self::render).
    pub fn tick(&mut self, time_ms: f64) -> Frame {
        self.step(time_ms);
        self.render()
    }

    /// Top-left corner of the trailing dot, centered on the smoothed pointer.
    pub fn cursor_follower(&self) -> DVec2 {
        self.pointer.smoothed - DVec2::splat(FOLLOWER_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawCommand;
    use crate::grid::{NOISE_SCALE_X, NOISE_SCALE_Y, NOISE_TO_ANGLE};

    fn field(w: f64, h: f64) -> WaveField {
        WaveField::new(WaveConfig::default(), 42.0, Viewport::new(w, h).unwrap()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = WaveConfig {
            y_gap: -32.0,
            ..WaveConfig::default()
        };
        let result = WaveField::new(cfg, 1.0, Viewport::new(100.0, 100.0).unwrap());
        assert!(matches!(result, Err(WaveError::InvalidConfig { .. })));
    }

    #[test]
    fn new_clamps_wave_speed() {
        let cfg = WaveConfig {
            wave_speed_x: 40.0,
            ..WaveConfig::default()
        };
        let f = WaveField::new(cfg, 1.0, Viewport::new(10.0, 10.0).unwrap()).unwrap();
        assert_eq!(f.config().wave_speed_x, 1.0);
    }

    #[test]
    fn one_frame_at_one_second_gives_reference_wave_offsets() {
        let mut f = field(640.0, 480.0);
        f.tick(1000.0);
        let noise = WaveNoise::new(42.0);
        for p in f.grid().points() {
            let sample = noise.perlin2(
                (p.base.x + 1000.0 * 0.0125) * NOISE_SCALE_X,
                (p.base.y + 1000.0 * 0.005) * NOISE_SCALE_Y,
            ) * NOISE_TO_ANGLE;
            assert_eq!(p.wave.y, sample.sin() * 16.0);
            assert_eq!(p.wave.x, sample.cos() * 32.0);
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = field(320.0, 240.0);
        let mut b = field(320.0, 240.0);
        for i in 0..10 {
            let t = i as f64 * 16.6;
            a.pointer_moved(100.0 + i as f64 * 7.0, 50.0, 0.0);
            b.pointer_moved(100.0 + i as f64 * 7.0, 50.0, 0.0);
            assert_eq!(a.tick(t), b.tick(t));
        }
    }

    #[test]
    fn resize_rebuilds_grid_and_discards_cursor_state() {
        let mut f = field(400.0, 300.0);
        f.pointer_moved(200.0, 150.0, 0.0);
        for i in 0..20 {
            f.pointer_moved(200.0 + i as f64 * 15.0, 150.0, 0.0);
            f.tick(i as f64 * 16.0);
        }
        assert!(f.grid().points().any(|p| p.cursor != DVec2::ZERO));

        f.resize(Viewport::new(800.0, 600.0).unwrap()).unwrap();
        assert_eq!(f.viewport().width, 800.0);
        assert_eq!(f.grid().line_count(), 101);
        assert!(f.grid().points().all(|p| p.cursor == DVec2::ZERO
            && p.cursor_velocity == DVec2::ZERO));
    }

    #[test]
    fn fine_gap_on_huge_viewport_is_rejected() {
        let cfg = WaveConfig {
            x_gap: 0.5,
            ..WaveConfig::default()
        };
        assert!(WaveField::new(cfg, 1.0, Viewport::new(300.0, 200.0).unwrap()).is_ok());
        let result = WaveField::new(cfg, 1.0, Viewport::new(16_000.0, 16_000.0).unwrap());
        assert!(matches!(result, Err(WaveError::InvalidConfig { .. })));
    }

    #[test]
    fn failed_resize_keeps_previous_lattice() {
        let cfg = WaveConfig {
            x_gap: 0.5,
            ..WaveConfig::default()
        };
        let mut f = WaveField::new(cfg, 1.0, Viewport::new(300.0, 200.0).unwrap()).unwrap();
        let before = f.grid().point_count();
        assert!(f.resize(Viewport::new(16_000.0, 16_000.0).unwrap()).is_err());
        assert_eq!(f.viewport().width, 300.0);
        assert_eq!(f.grid().point_count(), before);
    }

    #[test]
    fn pointer_position_is_relative_to_surface_and_scroll() {
        let vp = Viewport::with_offset(400.0, 300.0, 50.0, 80.0).unwrap();
        let mut f = WaveField::new(WaveConfig::default(), 1.0, vp).unwrap();
        f.pointer_moved(150.0, 180.0, 25.0);
        assert_eq!(f.pointer().raw, DVec2::new(100.0, 125.0));
        assert_eq!(f.pointer().smoothed, DVec2::new(100.0, 125.0));
    }

    #[test]
    fn follower_trails_smoothed_pointer() {
        let mut f = field(400.0, 300.0);
        f.pointer_moved(100.0, 100.0, 0.0);
        f.pointer_moved(200.0, 100.0, 0.0);
        f.tick(0.0);
        assert_eq!(f.cursor_follower(), DVec2::new(106.0, 96.0));
    }

    #[test]
    fn tick_counts_and_renders_whole_viewport() {
        let mut f = field(200.0, 100.0);
        let frame = f.tick(16.0);
        assert_eq!(f.ticks(), 1);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Clear {
                width: 200.0,
                height: 100.0
            }
        );
        assert_eq!(frame.segment_count(), f.grid().point_count());
    }

    #[test]
    fn instances_are_independent() {
        let mut a = field(300.0, 300.0);
        let b = field(300.0, 300.0);
        a.pointer_moved(10.0, 10.0, 0.0);
        a.tick(500.0);
        assert!(!b.pointer().set);
        assert_eq!(b.ticks(), 0);
        assert!(b.grid().points().all(|p| p.wave == DVec2::ZERO));
    }
}
