//! RGB / HSV conversion and hex encoding.
//!
//! Hue is in degrees `[0, 360)`, saturation and value are fractions in
//! `[0, 1]`, RGB channels are 8-bit. Every constructor clamps, so no value
//! produced here can leave its range.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("hex color must have 3 or 6 digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// A color in hue/saturation/value form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Hsv {
    /// Build a color, wrapping the hue and clamping saturation and value.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: clamp_unit(saturation),
            value: clamp_unit(value),
        }
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn with_hue(self, hue: f64) -> Self {
        Self::new(hue, self.saturation, self.value)
    }

    pub fn with_saturation(self, saturation: f64) -> Self {
        Self::new(self.hue, saturation, self.value)
    }

    pub fn with_value(self, value: f64) -> Self {
        Self::new(self.hue, self.saturation, value)
    }

    pub fn to_rgb(&self) -> Rgb {
        hsv_to_rgb(*self)
    }
}

impl Default for Hsv {
    /// Fully saturated red.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Wrap any real hue into `[0, 360)`. Non-finite hues become 0.
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(360.0);
    // rem_euclid rounds up to the modulus for tiny negative inputs
    if h >= 360.0 { 0.0 } else { h }
}

/// Clamp into `[0, 1]`; NaN maps to 0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Clamp into `[0, 255]`; NaN maps to 0.
pub fn clamp_channel(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 255.0) }
}

fn to_channel(x: f64) -> u8 {
    clamp_channel((x * 255.0).round()) as u8
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    rgb_to_hsv_f64(r as f64, g as f64, b as f64)
}

/// Same as [`rgb_to_hsv`] for real channels in `[0, 255]`.
///
/// Achromatic input (`max == min`) has no defined hue; it is reported as 0.
pub fn rgb_to_hsv_f64(r: f64, g: f64, b: f64) -> Hsv {
    let r = clamp_channel(r) / 255.0;
    let g = clamp_channel(g) / 255.0;
    let b = clamp_channel(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    Hsv::new(h, s, v)
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let (h, s, v) = (hsv.hue, hsv.saturation, hsv.value);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` in any case.
pub fn parse_hex(input: &str) -> Result<Rgb, HexError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(bad));
    }

    let nibbles: Vec<u8> = digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();

    match nibbles.as_slice() {
        [r, g, b] => Ok(Rgb::new(r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgb::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        other => Err(HexError::InvalidLength(other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120.0, 1.0, 1.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(240.0, 1.0, 1.0)), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(60.0, 1.0, 1.0)), Rgb::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(300.0, 1.0, 0.5)), Rgb::new(128, 0, 128));
    }

    #[test]
    fn test_rgb_to_hsv_secondary() {
        let hsv = rgb_to_hsv(0, 255, 255);
        assert!((hsv.hue() - 180.0).abs() < 1e-9);
        assert!((hsv.saturation() - 1.0).abs() < 1e-9);
        assert!((hsv.value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_sector_wraps() {
        // red is max and blue > green, so the raw formula goes negative
        let hsv = rgb_to_hsv(255, 0, 128);
        assert!(hsv.hue() > 300.0 && hsv.hue() < 360.0);
    }

    #[test]
    fn test_round_trip_exact() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hsv_to_rgb(rgb_to_hsv(r, g, b)), rgb, "round trip of {}", rgb);
                }
            }
        }
    }

    #[test]
    fn test_achromatic_convention() {
        let hsv = rgb_to_hsv(128, 128, 128);
        assert_eq!(hsv.saturation(), 0.0);
        assert_eq!(hsv.hue(), 0.0);
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(128, 128, 128));

        let black = rgb_to_hsv(0, 0, 0);
        assert_eq!((black.hue(), black.saturation(), black.value()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_hue() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert_eq!(normalize_hue(f64::NAN), 0.0);
        assert_eq!(normalize_hue(f64::INFINITY), 0.0);

        for h in [-1e-15, -1e-300, -720.5, 359.999_999_999, 1e12, -1e12] {
            let n = normalize_hue(h);
            assert!((0.0..360.0).contains(&n), "{} normalized to {}", h, n);
        }
    }

    #[test]
    fn test_hsv_constructor_clamps() {
        let hsv = Hsv::new(-30.0, 1.4, -0.2);
        assert_eq!(hsv.hue(), 330.0);
        assert_eq!(hsv.saturation(), 1.0);
        assert_eq!(hsv.value(), 0.0);

        let nan = Hsv::new(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!((nan.hue(), nan.saturation(), nan.value()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_real_channels_are_clamped() {
        let hsv = rgb_to_hsv_f64(300.0, -5.0, 0.0);
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(Rgb::new(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Rgb::new(1, 10, 171).to_hex(), "#010aab");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF8000"), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(parse_hex("  0a0b0c "), Ok(Rgb::new(10, 11, 12)));
        assert_eq!(parse_hex("#f0a"), Ok(Rgb::new(255, 0, 170)));
        assert_eq!("abc".parse::<Rgb>(), Ok(Rgb::new(170, 187, 204)));

        assert_eq!(parse_hex("#12345"), Err(HexError::InvalidLength(5)));
        assert_eq!(parse_hex(""), Err(HexError::InvalidLength(0)));
        assert_eq!(parse_hex("#gg0000"), Err(HexError::InvalidDigit('g')));
    }
}
