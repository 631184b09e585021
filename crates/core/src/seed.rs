//! Reproducible description of an offline render.
//!
//! A [`Seed`] captures everything needed to recreate a frame of the
//! background: viewport, options, noise seed, the synthetic clock, and an
//! optional straight pointer drag. Two identical seeds replay to
//! bit-identical frames.

use crate::config::WaveConfig;
use crate::draw::Frame;
use crate::driver::{Driver, RecordingSurface};
use crate::error::WaveError;
use crate::frame_loop::ManualHost;
use crate::grid::Viewport;
use crate::scene::WaveField;
use serde::{Deserialize, Serialize};

/// A pointer moving in a straight line from `from` to `to` over the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

impl Drag {
    /// Position at fraction `t` in [0, 1] of the drag.
    pub fn at(&self, t: f64) -> (f64, f64) {
        let t = t.clamp(0.0, 1.0);
        (
            self.from[0] + (self.to[0] - self.from[0]) * t,
            self.from[1] + (self.to[1] - self.from[1]) * t,
        )
    }
}

/// Reproducible description of an offline render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: f64,
    pub height: f64,
    pub seed: f64,
    #[serde(default)]
    pub config: WaveConfig,
    pub frames: usize,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    #[serde(default)]
    pub start_ms: f64,
    #[serde(default)]
    pub drag: Option<Drag>,
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

impl Seed {
    /// Creates a seed with default options, one frame at t = 0, and no drag.
    pub fn new(width: f64, height: f64, seed: f64) -> Self {
        Self {
            width,
            height,
            seed,
            config: WaveConfig::default(),
            frames: 1,
            frame_ms: default_frame_ms(),
            start_ms: 0.0,
            drag: None,
        }
    }

    /// Validates the viewport, the options, and the clock.
    pub fn validate(&self) -> Result<(), WaveError> {
        Viewport::new(self.width, self.height)?;
        self.config.validate()?;
        if !self.frame_ms.is_finite() || self.frame_ms < 0.0 {
            return Err(WaveError::config(
                "frame_ms",
                format!("must be finite and non-negative, got {}", self.frame_ms),
            ));
        }
        if !self.start_ms.is_finite() {
            return Err(WaveError::config("start_ms", "must be a finite number"));
        }
        Ok(())
    }

    /// Timestamp of frame `index`.
    pub fn time_of(&self, index: usize) -> f64 {
        self.start_ms + index as f64 * self.frame_ms
    }

    /// Runs every frame through a manual frame loop and returns the final
    /// field state with the last frame drawn.
    ///
    /// With `frames == 0` the field is returned untouched with an empty frame.
    pub fn replay(&self) -> Result<(WaveField, Frame), WaveError> {
        self.validate()?;
        let viewport = Viewport::new(self.width, self.height)?;
        let field = WaveField::new(self.config, self.seed, viewport)?;
        let mut driver = Driver::new(field, ManualHost::default(), RecordingSurface::default());
        driver.start()?;

        for i in 0..self.frames {
            if let Some(drag) = &self.drag {
                let t = if self.frames > 1 {
                    i as f64 / (self.frames - 1) as f64
                } else {
                    1.0
                };
                let (x, y) = drag.at(t);
                driver.pointer_moved(x, y, 0.0);
            }
            driver.host_mut().fire();
            driver.on_frame(self.time_of(i))?;
        }

        let frame = driver.surface().last_frame.clone().unwrap_or_default();
        let field = driver.field().clone();
        driver.teardown();
        Ok((field, frame))
    }
}
