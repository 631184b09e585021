//! Pointer kinematics feeding the cursor spring.
//!
//! Raw positions arrive from pointer events; once per frame the smoothed
//! position lags toward the raw one and the movement speed and angle are
//! recomputed from the distance travelled since the previous frame.

use glam::DVec2;

/// Fraction of the remaining distance the smoothed values cover each frame.
pub const POINTER_LAG: f64 = 0.1;
/// Upper bound of the smoothed pointer speed.
pub const MAX_SMOOTHED_SPEED: f64 = 100.0;
/// Raw position used before any pointer event has been seen.
pub const UNSET_POSITION: DVec2 = DVec2::new(-10.0, 0.0);

/// Pointer position and motion, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Latest position reported by an event.
    pub raw: DVec2,
    /// Raw position at the previous frame.
    pub last: DVec2,
    /// Lagged position the cursor spring reacts to.
    pub smoothed: DVec2,
    /// Distance travelled since the previous frame.
    pub speed: f64,
    /// Lagged speed, at most [`MAX_SMOOTHED_SPEED`].
    pub smoothed_speed: f64,
    /// Direction of travel in radians.
    pub angle: f64,
    /// Whether at least one pointer event has arrived.
    pub set: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            raw: UNSET_POSITION,
            last: DVec2::ZERO,
            smoothed: DVec2::ZERO,
            speed: 0.0,
            smoothed_speed: 0.0,
            angle: 0.0,
            set: false,
        }
    }
}

impl PointerState {
    /// Records a new raw position.
    ///
    /// The first event also seeds the smoothed and last positions so the
    /// field doesn't see a fly-in from the sentinel.
    pub fn move_to(&mut self, position: DVec2) {
        self.raw = position;
        if !self.set {
            self.smoothed = position;
            self.last = position;
            self.set = true;
        }
    }

    /// Advances the smoothed values by one frame.
    pub fn advance(&mut self) {
        self.smoothed += (self.raw - self.smoothed) * POINTER_LAG;

        let delta = self.raw - self.last;
        self.speed = delta.length();
        self.smoothed_speed += (self.speed - self.smoothed_speed) * POINTER_LAG;
        self.smoothed_speed = self.smoothed_speed.min(MAX_SMOOTHED_SPEED);
        self.last = self.raw;
        self.angle = delta.y.atan2(delta.x);
    }

    /// Unit vector along the direction of travel.
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin())
    }
}
