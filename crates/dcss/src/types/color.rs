//! RGBA color type with CSS color parsing.
//!
//! Channels are stored as `f64` in the range `0.0..=1.0`, which is what the
//! diagram renderer consumes directly.
//!
//! ## Supported Color Formats
//!
//! - **Hex**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - **RGB**: `rgb(r, g, b)`, `rgba(r, g, b, a)`, channels as `0-255` or percentages
//! - **HSL**: `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`
//! - **Named**: CSS color names like `red`, `aliceblue`, `rebeccapurple`
//! - **Special**: `transparent`

use thiserror::Error;

use crate::types::named_colors::NAMED_COLORS;

/// Error returned when color parsing fails.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{message}")]
pub struct ColorParseError {
    /// Human-readable description of the parsing error.
    pub message: String,
}

impl ColorParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A color with four normalized channels.
///
/// # Examples
///
/// ```
/// use dcss::types::Color;
///
/// let red = Color::parse("red").unwrap();
/// assert_eq!(red, Color::rgb8(255, 0, 0));
///
/// let faded = Color::parse("rgba(0, 0, 255, 0.5)").unwrap();
/// assert_eq!(faded.a, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha, `0.0` is fully transparent.
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::rgb8(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb8(255, 255, 255)
    }

    /// Returns a fully transparent color.
    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Builds an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            a,
        )
    }

    /// Returns a copy of this color with the specified alpha value.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { a: alpha, ..*self }
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Channels as a `(r, g, b, a)` tuple.
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.r, self.g, self.b, self.a)
    }

    /// Parse a color string in any of the supported formats.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError::new("empty color string"));
        }

        let lower = input.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::transparent());
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if lower.starts_with("rgb") {
            return Self::parse_rgb_func(&lower);
        }

        if lower.starts_with("hsl") {
            return Self::parse_hsl_func(&lower);
        }

        NAMED_COLORS
            .get(lower.as_str())
            .map(|&(r, g, b)| Self::rgb8(r, g, b))
            .ok_or_else(|| ColorParseError::new(format!("unknown color name: {}", input)))
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .chars()
            .map(Self::parse_hex_digit)
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            // #RGB -> #RRGGBB
            [r, g, b] => Ok(Self::rgb8(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Ok(Self::rgba8(r * 17, g * 17, b * 17, f64::from(a * 17) / 255.0)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb8(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::rgba8(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                f64::from(a1 * 16 + a2) / 255.0,
            )),
            _ => Err(ColorParseError::new(format!(
                "invalid hex color length: {}",
                digits.len()
            ))),
        }
    }

    fn parse_hex_digit(c: char) -> Result<u8, ColorParseError> {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| ColorParseError::new(format!("invalid hex digit: {}", c)))
    }

    /// Returns the comma separated arguments of `name(...)`.
    fn function_args<'a>(input: &'a str, name: &str) -> Result<Vec<&'a str>, ColorParseError> {
        let start = input
            .find('(')
            .ok_or_else(|| ColorParseError::new(format!("missing '(' in {} function", name)))?;
        if !input.ends_with(')') {
            return Err(ColorParseError::new(format!(
                "missing ')' in {} function",
                name
            )));
        }
        let content = &input[start + 1..input.len() - 1];
        Ok(content.split(',').map(str::trim).collect())
    }

    fn parse_rgb_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = Self::function_args(input, "rgb")?;
        if !(3..=4).contains(&parts.len()) {
            return Err(ColorParseError::new("rgb requires 3 or 4 components"));
        }

        let r = Self::parse_channel(parts[0])?;
        let g = Self::parse_channel(parts[1])?;
        let b = Self::parse_channel(parts[2])?;
        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Ok(Self::new(r, g, b, a))
    }

    fn parse_hsl_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = Self::function_args(input, "hsl")?;
        if !(3..=4).contains(&parts.len()) {
            return Err(ColorParseError::new("hsl requires 3 or 4 components"));
        }

        let h = Self::parse_f64(parts[0].trim_end_matches("deg"))?;
        let s = Self::parse_percentage(parts[1])?;
        let l = Self::parse_percentage(parts[2])?;
        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Ok(Self::from_hsl(h, s, l, a))
    }

    /// An `rgb()` channel: `0-255` or a percentage.
    fn parse_channel(s: &str) -> Result<f64, ColorParseError> {
        if s.ends_with('%') {
            return Self::parse_percentage(s);
        }
        let val = Self::parse_f64(s)?;
        if !(0.0..=255.0).contains(&val) {
            return Err(ColorParseError::new(format!(
                "value out of range (0-255): {}",
                s
            )));
        }
        Ok(val / 255.0)
    }

    fn parse_alpha(s: &str) -> Result<f64, ColorParseError> {
        let val = if s.ends_with('%') {
            Self::parse_percentage(s)?
        } else {
            Self::parse_f64(s)?
        };
        Ok(val.clamp(0.0, 1.0))
    }

    fn parse_f64(s: &str) -> Result<f64, ColorParseError> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|val| val.is_finite())
            .ok_or_else(|| ColorParseError::new(format!("invalid number: {}", s)))
    }

    fn parse_percentage(s: &str) -> Result<f64, ColorParseError> {
        let digits = s
            .strip_suffix('%')
            .ok_or_else(|| ColorParseError::new(format!("expected a percentage: {}", s)))?;
        let val = Self::parse_f64(digits)?;
        if !(0.0..=100.0).contains(&val) {
            return Err(ColorParseError::new(format!(
                "percentage out of range: {}",
                s
            )));
        }
        Ok(val / 100.0)
    }

    /// Creates a color from hue in degrees and saturation/lightness in `0.0..=1.0`.
    pub fn from_hsl(h: f64, s: f64, l: f64, a: f64) -> Self {
        if s == 0.0 {
            return Self::new(l, l, l, a);
        }

        let h = h.rem_euclid(360.0) / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::new(
            Self::hue_to_rgb(p, q, h + 1.0 / 3.0),
            Self::hue_to_rgb(p, q, h),
            Self::hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }

        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Color, expected: Color) {
        let (a, e) = (actual.to_tuple(), expected.to_tuple());
        for (x, y) in [(a.0, e.0), (a.1, e.1), (a.2, e.2), (a.3, e.3)] {
            assert!((x - y).abs() < 1e-6, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_hex_short_forms() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(Color::parse("#abc").unwrap(), Color::rgb8(0xaa, 0xbb, 0xcc));
        assert_eq!(Color::parse("#f00f").unwrap(), Color::rgba8(255, 0, 0, 1.0));
    }

    #[test]
    fn test_hex_long_forms() {
        assert_eq!(Color::parse("#00FF00").unwrap(), Color::rgb8(0, 255, 0));
        assert_eq!(Color::parse("#ff000000").unwrap().a, 0.0);
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::parse("#ff").is_err());
        assert!(Color::parse("#gggggg").is_err());
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(Color::parse("rgb(255, 0, 0)").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(
            Color::parse("rgba(0,0,255,0.25)").unwrap(),
            Color::rgba8(0, 0, 255, 0.25)
        );
        assert_eq!(Color::parse("rgb(100%, 0%, 0%)").unwrap(), Color::rgb8(255, 0, 0));
        assert_eq!(Color::parse("rgba(0, 0, 0, 50%)").unwrap().a, 0.5);
    }

    #[test]
    fn test_invalid_rgb() {
        assert!(Color::parse("rgb(256, 0, 0)").is_err());
        assert!(Color::parse("rgb(1, 2)").is_err());
        assert!(Color::parse("rgb(1, 2, 3").is_err());
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert!(Color::parse("rgba(0, 0, 0, NaN)").is_err());
        assert!(Color::parse("rgba(0, 0, 0, inf)").is_err());
        assert!(Color::parse("rgb(NaN, 0, 0)").is_err());
        assert!(Color::parse("hsl(inf, 50%, 50%)").is_err());
        assert!(Color::parse("hsl(NaN, 50%, 50%)").is_err());
        assert!(Color::parse("hsl(0, NaN%, 50%)").is_err());
    }

    #[test]
    fn test_hsl() {
        assert_close(Color::parse("hsl(0, 100%, 50%)").unwrap(), Color::rgb8(255, 0, 0));
        assert_close(
            Color::parse("hsla(120, 100%, 50%, 0.5)").unwrap(),
            Color::rgba8(0, 255, 0, 0.5),
        );
        assert_close(Color::parse("hsl(0, 0%, 50%)").unwrap(), Color::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_named() {
        assert_eq!(Color::parse("RebeccaPurple").unwrap(), Color::rgb8(102, 51, 153));
        assert_eq!(Color::parse("transparent").unwrap(), Color::transparent());
        assert!(Color::parse("notacolor").is_err());
        assert!(Color::parse("   ").is_err());
    }
}
