//! Pure helper functions for extracting typed options from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; host-supplied option bags are untyped and the
//! background should still come up with sensible values.

use crate::color::Rgba;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a CSS color from `params[name]`, returning `default` if missing,
/// not a string, or not a parseable color.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Rgba::parse_css(s).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"waveAmpX": 2.5});
        assert!((param_f64(&params, "waveAmpX", 1.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"xGap": 10});
        assert!((param_f64(&params, "xGap", 0.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_keeps_explicit_zero() {
        let params = json!({"tension": 0});
        assert_eq!(param_f64(&params, "tension", 0.005), 0.0);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "friction", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"friction": "high"});
        assert!((param_f64(&params, "friction", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "friction", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- param_color --

    #[test]
    fn param_color_parses_css_string() {
        let params = json!({"lineColor": "#ff0000"});
        let c = param_color(&params, "lineColor", Rgba::TRANSPARENT);
        assert_eq!(c, Rgba::from_rgb8(255, 0, 0, 1.0));
    }

    #[test]
    fn param_color_accepts_named_colors() {
        let params = json!({"lineColor": "red", "backgroundColor": "black"});
        let line = param_color(&params, "lineColor", Rgba::TRANSPARENT);
        let bg = param_color(&params, "backgroundColor", Rgba::TRANSPARENT);
        assert_eq!(line, Rgba::from_rgb8(255, 0, 0, 1.0));
        assert_eq!(bg, Rgba::from_rgb8(0, 0, 0, 1.0));
    }

    #[test]
    fn param_color_returns_default_for_unparseable_string() {
        let params = json!({"lineColor": "chartreuse-ish"});
        let c = param_color(&params, "lineColor", Rgba::TRANSPARENT);
        assert_eq!(c, Rgba::TRANSPARENT);
    }

    #[test]
    fn param_color_returns_default_for_wrong_type() {
        let params = json!({"lineColor": 12});
        let fallback = Rgba::from_rgb8(1, 2, 3, 1.0);
        assert_eq!(param_color(&params, "lineColor", fallback), fallback);
    }
}
