//! Color wheel geometry.
//!
//! The wheel lives in a normalized plane where the rim is the unit circle.
//! The angle of a point is its hue; what its distance from the center means
//! depends on the [`CenterMode`].

use crate::color_math::{normalize_hue, Hsv};
use serde::{Deserialize, Serialize};

/// Which color sits at the center of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterMode {
    /// Value is pinned at 1 and radius drives saturation.
    #[default]
    WhiteCenter,
    /// Saturation is pinned at 1 and radius drives value.
    BlackCenter,
}

impl CenterMode {
    pub fn toggled(self) -> Self {
        match self {
            CenterMode::WhiteCenter => CenterMode::BlackCenter,
            CenterMode::BlackCenter => CenterMode::WhiteCenter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CenterMode::WhiteCenter => "White",
            CenterMode::BlackCenter => "Black",
        }
    }

    /// Distance from the center at which this mode draws `hsv`.
    ///
    /// Only the channel the mode drives is consulted, so colors that don't
    /// fit the mode are drawn lossily.
    pub fn radius_of(self, hsv: &Hsv) -> f64 {
        match self {
            CenterMode::WhiteCenter => hsv.saturation(),
            CenterMode::BlackCenter => hsv.value(),
        }
    }

    /// Color at `radius` along the ray for `hue`.
    pub fn color_at(self, hue: f64, radius: f64) -> Hsv {
        match self {
            CenterMode::WhiteCenter => Hsv::new(hue, radius, 1.0),
            CenterMode::BlackCenter => Hsv::new(hue, 1.0, radius),
        }
    }
}

/// A position on the wheel in normalized coordinates, inside the unit disk.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelPoint {
    x: f64,
    y: f64,
}

impl WheelPoint {
    pub const CENTER: WheelPoint = WheelPoint { x: 0.0, y: 0.0 };

    /// Points outside the disk are pulled onto the rim along their ray.
    /// Non-finite coordinates collapse to the center.
    pub fn new(x: f64, y: f64) -> Self {
        if !x.is_finite() || !y.is_finite() {
            return Self::CENTER;
        }
        let radius = x.hypot(y);
        if radius > 1.0 {
            Self { x: x / radius, y: y / radius }
        } else {
            Self { x, y }
        }
    }

    /// Point at `radius` along the ray for `hue` degrees.
    pub fn from_polar(hue: f64, radius: f64) -> Self {
        let angle = hue.to_radians();
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y).clamp(0.0, 1.0)
    }

    /// Angle in degrees, `[0, 360)`. `None` at the exact center.
    pub fn hue(&self) -> Option<f64> {
        if self.radius() == 0.0 {
            None
        } else {
            Some(normalize_hue(self.y.atan2(self.x).to_degrees()))
        }
    }
}

/// Resolve a wheel position into a color.
///
/// The center has no angle, so `current_hue` is kept there instead of
/// snapping the selection back to 0°.
pub fn point_to_color(point: WheelPoint, mode: CenterMode, current_hue: f64) -> Hsv {
    let hue = point.hue().unwrap_or(current_hue);
    mode.color_at(hue, point.radius())
}

pub fn color_to_point(hsv: &Hsv, mode: CenterMode) -> WheelPoint {
    WheelPoint::from_polar(hsv.hue(), mode.radius_of(hsv))
}

/// Pixel geometry of the drawn wheel, supplied by the presentation layer.
///
/// Screen y grows downward and is used unflipped, so hue runs clockwise on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelBounds {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl WheelBounds {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self { center_x, center_y, radius }
    }

    /// Bounds of a wheel filling a `size`-pixel square whose top-left
    /// corner is at `(left, top)`.
    pub fn from_square(left: f64, top: f64, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(left + half, top + half, half)
    }

    pub fn to_point(&self, px: f64, py: f64) -> WheelPoint {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return WheelPoint::CENTER;
        }
        WheelPoint::new(
            (px - self.center_x) / self.radius,
            (py - self.center_y) / self.radius,
        )
    }

    pub fn to_pixel(&self, point: WheelPoint) -> (f64, f64) {
        (
            self.center_x + point.x * self.radius,
            self.center_y + point.y * self.radius,
        )
    }
}
