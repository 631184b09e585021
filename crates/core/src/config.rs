//! Tunable options of the wave field.
//!
//! [`WaveConfig`] is what the host passes at construction. It deserializes
//! from camelCase JSON with every key optional, and [`WaveConfig::from_json`]
//! offers the forgiving per-key fallback used for untyped JS option bags.

use crate::color::Rgba;
use crate::error::WaveError;
use crate::grid::{Grid, Viewport};
use crate::params::{param_color, param_f64};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default stroke color of the field lines.
pub const DEFAULT_LINE_COLOR: Rgba = Rgba {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.3,
};
/// Default fill behind the lines.
pub const DEFAULT_BACKGROUND_COLOR: Rgba = Rgba::TRANSPARENT;
/// Default horizontal scroll rate of the noise sample, px per ms.
pub const DEFAULT_WAVE_SPEED_X: f64 = 0.0125;
/// Default vertical scroll rate of the noise sample, px per ms.
pub const DEFAULT_WAVE_SPEED_Y: f64 = 0.005;
/// Default horizontal amplitude of the elliptical wave motion.
pub const DEFAULT_WAVE_AMP_X: f64 = 32.0;
/// Default vertical amplitude of the elliptical wave motion.
pub const DEFAULT_WAVE_AMP_Y: f64 = 16.0;
/// Default spacing between lines.
pub const DEFAULT_X_GAP: f64 = 10.0;
/// Default spacing between points on a line.
pub const DEFAULT_Y_GAP: f64 = 32.0;
/// Default per-frame velocity decay.
pub const DEFAULT_FRICTION: f64 = 0.925;
/// Default spring pull toward the anchor.
pub const DEFAULT_TENSION: f64 = 0.005;
/// Default clamp of the cursor-induced offset.
pub const DEFAULT_MAX_CURSOR_MOVE: f64 = 100.0;

/// Wave speeds beyond this (px per ms) scroll the field faster than a
/// 60 Hz display can resolve.
pub const MAX_WAVE_SPEED: f64 = 1.0;

/// Options controlling the look and feel of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaveConfig {
    pub line_color: Rgba,
    pub background_color: Rgba,
    pub wave_speed_x: f64,
    pub wave_speed_y: f64,
    pub wave_amp_x: f64,
    pub wave_amp_y: f64,
    pub x_gap: f64,
    pub y_gap: f64,
    pub friction: f64,
    pub tension: f64,
    pub max_cursor_move: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            wave_speed_x: DEFAULT_WAVE_SPEED_X,
            wave_speed_y: DEFAULT_WAVE_SPEED_Y,
            wave_amp_x: DEFAULT_WAVE_AMP_X,
            wave_amp_y: DEFAULT_WAVE_AMP_Y,
            x_gap: DEFAULT_X_GAP,
            y_gap: DEFAULT_Y_GAP,
            friction: DEFAULT_FRICTION,
            tension: DEFAULT_TENSION,
            max_cursor_move: DEFAULT_MAX_CURSOR_MOVE,
        }
    }
}

impl WaveConfig {
    /// Extracts options from a JSON object, falling back to defaults per key.
    ///
    /// Missing keys, wrongly typed values and unparseable colors all take the
    /// default. No validation happens here; see [`WaveConfig::validated`].
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            line_color: param_color(params, "lineColor", d.line_color),
            background_color: param_color(params, "backgroundColor", d.background_color),
            wave_speed_x: param_f64(params, "waveSpeedX", d.wave_speed_x),
            wave_speed_y: param_f64(params, "waveSpeedY", d.wave_speed_y),
            wave_amp_x: param_f64(params, "waveAmpX", d.wave_amp_x),
            wave_amp_y: param_f64(params, "waveAmpY", d.wave_amp_y),
            x_gap: param_f64(params, "xGap", d.x_gap),
            y_gap: param_f64(params, "yGap", d.y_gap),
            friction: param_f64(params, "friction", d.friction),
            tension: param_f64(params, "tension", d.tension),
            max_cursor_move: param_f64(params, "maxCursorMove", d.max_cursor_move),
        }
    }

    /// Checks every option against its accepted range.
    ///
    /// Gaps must be positive and coarse enough that the margins alone stay
    /// within [`MAX_GRID_POINTS`](crate::grid::MAX_GRID_POINTS). Amplitudes,
    /// tension and the cursor clamp must be non-negative, friction within
    /// [0, 1]. All numbers must be finite.
    pub fn validate(&self) -> Result<(), WaveError> {
        let finite = [
            ("waveSpeedX", self.wave_speed_x),
            ("waveSpeedY", self.wave_speed_y),
            ("waveAmpX", self.wave_amp_x),
            ("waveAmpY", self.wave_amp_y),
            ("xGap", self.x_gap),
            ("yGap", self.y_gap),
            ("friction", self.friction),
            ("tension", self.tension),
            ("maxCursorMove", self.max_cursor_move),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(WaveError::config(name, "must be a finite number"));
        }

        // Even an empty viewport gets the overflow margins laid out.
        Grid::lattice_size(&Viewport::default(), self.x_gap, self.y_gap)?;
        for (name, v) in [
            ("waveAmpX", self.wave_amp_x),
            ("waveAmpY", self.wave_amp_y),
            ("tension", self.tension),
            ("maxCursorMove", self.max_cursor_move),
        ] {
            if v < 0.0 {
                return Err(WaveError::config(name, format!("must not be negative, got {v}")));
            }
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(WaveError::config(
                "friction",
                format!("must lie in [0, 1], got {}", self.friction),
            ));
        }
        Ok(())
    }

    /// Validates and clamps the wave speeds to ±[`MAX_WAVE_SPEED`].
    pub fn validated(mut self) -> Result<Self, WaveError> {
        self.validate()?;
        self.wave_speed_x = self.wave_speed_x.clamp(-MAX_WAVE_SPEED, MAX_WAVE_SPEED);
        self.wave_speed_y = self.wave_speed_y.clamp(-MAX_WAVE_SPEED, MAX_WAVE_SPEED);
        Ok(self)
    }

    /// Current option values as a camelCase JSON object.
    pub fn params(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema describing every option, its type, range, and default.
    pub fn param_schema() -> Value {
        json!({
            "lineColor": {
                "type": "color",
                "default": DEFAULT_LINE_COLOR.to_css(),
                "description": "Stroke color of the field lines"
            },
            "backgroundColor": {
                "type": "color",
                "default": DEFAULT_BACKGROUND_COLOR.to_css(),
                "description": "Fill behind the canvas"
            },
            "waveSpeedX": {
                "type": "number",
                "default": DEFAULT_WAVE_SPEED_X,
                "min": -MAX_WAVE_SPEED,
                "max": MAX_WAVE_SPEED,
                "description": "Horizontal scroll rate of the noise sample (px per ms)"
            },
            "waveSpeedY": {
                "type": "number",
                "default": DEFAULT_WAVE_SPEED_Y,
                "min": -MAX_WAVE_SPEED,
                "max": MAX_WAVE_SPEED,
                "description": "Vertical scroll rate of the noise sample (px per ms)"
            },
            "waveAmpX": {
                "type": "number",
                "default": DEFAULT_WAVE_AMP_X,
                "min": 0.0,
                "description": "Horizontal amplitude of the wave motion"
            },
            "waveAmpY": {
                "type": "number",
                "default": DEFAULT_WAVE_AMP_Y,
                "min": 0.0,
                "description": "Vertical amplitude of the wave motion"
            },
            "xGap": {
                "type": "number",
                "default": DEFAULT_X_GAP,
                "exclusiveMin": 0.0,
                "description": "Horizontal spacing between lines"
            },
            "yGap": {
                "type": "number",
                "default": DEFAULT_Y_GAP,
                "exclusiveMin": 0.0,
                "description": "Vertical spacing between points on a line"
            },
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-frame velocity decay multiplier"
            },
            "tension": {
                "type": "number",
                "default": DEFAULT_TENSION,
                "min": 0.0,
                "description": "Spring pull of the cursor offset toward zero"
            },
            "maxCursorMove": {
                "type": "number",
                "default": DEFAULT_MAX_CURSOR_MOVE,
                "min": 0.0,
                "description": "Clamp magnitude of the cursor-induced offset"
            }
        })
    }
}
