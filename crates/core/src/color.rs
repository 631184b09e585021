//! CSS-style colors for line strokes and backgrounds.
//!
//! [`Rgba`] stores straight (non-premultiplied) sRGB components in [0, 1].
//! It accepts whatever a canvas `strokeStyle` would (parsing is delegated to
//! `csscolorparser`) and serializes back to a CSS string, so the same value
//! can be handed to the canvas or written to a JSON seed.

use crate::error::WaveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Straight-alpha sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black, the CSS `transparent` keyword.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Builds a color from 8-bit channels and an alpha in [0, 1].
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parses a hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, WaveError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 3 | 4 | 6 | 8) {
            return Err(WaveError::InvalidColor(format!(
                "expected 3, 4, 6 or 8 hex digits, got '{hex}'"
            )));
        }
        Self::parse_css(&format!("#{digits}"))
    }

    /// Parses any CSS color: named colors, `transparent`, hex, and the
    /// `rgb()`, `hsl()`, `hwb()` functional forms in comma or space syntax.
    ///
    /// Channels are quantised to 8 bits and alpha to six decimals, so
    /// `rgba(255, 255, 255, 0.3)` yields exactly `a == 0.3`.
    pub fn parse_css(input: &str) -> Result<Self, WaveError> {
        let color = csscolorparser::parse(input.trim())
            .map_err(|e| WaveError::InvalidColor(format!("'{}': {e}", input.trim())))?;
        let [r, g, b, _] = color.to_rgba8();
        let alpha = (f64::from(color.a) * 1e6).round() / 1e6;
        Ok(Self::from_rgb8(r, g, b, alpha))
    }

    /// Formats as `rgba(r, g, b, a)` with 8-bit channels.
    pub fn to_css(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {a})")
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl FromStr for Rgba {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse_css(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn parses_default_line_color() {
        let c = Rgba::parse_css("rgba(255, 255, 255, 0.3)").unwrap();
        assert!(approx_eq(c.r, 1.0) && approx_eq(c.g, 1.0) && approx_eq(c.b, 1.0));
        assert!(approx_eq(c.a, 0.3));
    }

    #[test]
    fn parses_transparent_keyword() {
        let c = Rgba::parse_css("Transparent").unwrap();
        assert_eq!(c, Rgba::TRANSPARENT);
        assert!(c.is_transparent());
    }

    #[test]
    fn parses_rgb_without_alpha() {
        let c = Rgba::parse_css("rgb(255,0,0)").unwrap();
        assert!(approx_eq(c.r, 1.0) && approx_eq(c.g, 0.0) && approx_eq(c.a, 1.0));
    }

    #[test]
    fn parses_short_and_long_hex() {
        let short = Rgba::parse_css("#f0a").unwrap();
        let long = Rgba::parse_css("#ff00aa").unwrap();
        assert_eq!(short, long);
        let with_alpha = Rgba::from_hex("ff00aa80").unwrap();
        assert!((with_alpha.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_out_of_range_components() {
        let c = Rgba::parse_css("rgba(300, -5, 128, 2)").unwrap();
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 0.0));
        assert!(approx_eq(c.a, 1.0));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "rgba(1, 2)", "rgb(a, b, c)", "#12345", "#gg0000", "chartreuse-ish"] {
            assert!(Rgba::parse_css(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Rgba::parse_css("red").unwrap(), Rgba::from_rgb8(255, 0, 0, 1.0));
        assert_eq!(Rgba::parse_css(" Black ").unwrap(), Rgba::from_rgb8(0, 0, 0, 1.0));
        assert_eq!(
            Rgba::parse_css("rebeccapurple").unwrap(),
            Rgba::from_rgb8(102, 51, 153, 1.0)
        );
    }

    #[test]
    fn parses_hsl_and_space_separated_rgb() {
        assert_eq!(
            Rgba::parse_css("hsl(120, 100%, 50%)").unwrap(),
            Rgba::from_rgb8(0, 255, 0, 1.0)
        );
        assert_eq!(
            Rgba::parse_css("rgb(255 0 0 / 50%)").unwrap(),
            Rgba::from_rgb8(255, 0, 0, 0.5)
        );
    }

    #[test]
    fn from_hex_rejects_non_hex_forms() {
        assert!(Rgba::from_hex("red").is_err());
        assert!(Rgba::from_hex("#12").is_err());
    }

    #[test]
    fn to_css_formats_eight_bit_channels() {
        let c = Rgba::from_rgb8(255, 128, 0, 0.3);
        assert_eq!(c.to_css(), "rgba(255, 128, 0, 0.3)");
    }

    #[test]
    fn css_string_round_trip() {
        let c = Rgba::parse_css("rgba(12, 34, 56, 0.5)").unwrap();
        let again = Rgba::parse_css(&c.to_css()).unwrap();
        assert_eq!(c, again);
    }

    #[test]
    fn serializes_as_css_string() {
        let c = Rgba::from_rgb8(255, 255, 255, 0.3);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"rgba(255, 255, 255, 0.3)\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_rejects_invalid_color() {
        assert!(serde_json::from_str::<Rgba>("\"not a color\"").is_err());
    }

    #[test]
    fn from_str_delegates_to_parse_css() {
        let c: Rgba = "#000000".parse().unwrap();
        assert!(approx_eq(c.a, 1.0));
    }
}
