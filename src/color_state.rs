//! The picker's single source of truth.
//!
//! [`ColorState`] stores one HSV color and the wheel's [`CenterMode`].
//! RGB, hex and the wheel marker position are always derived from those two
//! on demand, so they cannot drift apart. Every update returns a
//! [`ColorSnapshot`] with everything a renderer needs.

use crate::color_math::{clamp_channel, parse_hex, rgb_to_hsv, HexError, Hsv, Rgb};
use crate::event::{PickerEvent, RgbChannel};
use crate::wheel::{color_to_point, point_to_color, CenterMode, WheelBounds, WheelPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When an edit from RGB or hex may change the center mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterSwitch {
    /// Full brightness selects the white center; nothing selects black.
    #[default]
    WhiteOnly,
    /// Full brightness selects the white center, anything darker the black.
    Symmetric,
}

impl CenterSwitch {
    fn implied_by_rgb(self, hsv: &Hsv) -> Option<CenterMode> {
        if hsv.value() == 1.0 {
            Some(CenterMode::WhiteCenter)
        } else {
            match self {
                CenterSwitch::WhiteOnly => None,
                CenterSwitch::Symmetric => Some(CenterMode::BlackCenter),
            }
        }
    }

    fn implied_by_value(self, value: f64) -> Option<CenterMode> {
        if value == 1.0 {
            Some(CenterMode::WhiteCenter)
        } else if value == 0.0 && self == CenterSwitch::Symmetric {
            Some(CenterMode::BlackCenter)
        } else {
            None
        }
    }
}

/// Everything derived from the current color, for one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSnapshot {
    pub hsv: Hsv,
    pub rgb: Rgb,
    /// `#rrggbb`, lowercase.
    pub hex: String,
    pub center_mode: CenterMode,
    pub wheel_point: WheelPoint,
}

impl fmt::Display for ColorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  rgb({}, {}, {})  hsv({:.1}°, {:.0}%, {:.0}%)  center={}  wheel=({:.3}, {:.3})",
            self.hex,
            self.rgb.r,
            self.rgb.g,
            self.rgb.b,
            self.hsv.hue(),
            self.hsv.saturation() * 100.0,
            self.hsv.value() * 100.0,
            self.center_mode.label(),
            self.wheel_point.x(),
            self.wheel_point.y(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    color: Hsv,
    center_mode: CenterMode,
    center_switch: CenterSwitch,
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new(CenterSwitch::default())
    }
}

impl ColorState {
    pub fn new(center_switch: CenterSwitch) -> Self {
        Self {
            color: Hsv::default(),
            center_mode: CenterMode::default(),
            center_switch,
        }
    }

    pub fn hsv(&self) -> Hsv {
        self.color
    }

    pub fn hue(&self) -> f64 {
        self.color.hue()
    }

    pub fn saturation(&self) -> f64 {
        self.color.saturation()
    }

    pub fn value(&self) -> f64 {
        self.color.value()
    }

    pub fn rgb(&self) -> Rgb {
        self.color.to_rgb()
    }

    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }

    pub fn center_mode(&self) -> CenterMode {
        self.center_mode
    }

    pub fn center_switch(&self) -> CenterSwitch {
        self.center_switch
    }

    /// Change the auto-switch policy. Takes effect on the next edit; the
    /// current color and mode are left alone.
    pub fn set_center_switch(&mut self, center_switch: CenterSwitch) {
        self.center_switch = center_switch;
    }

    /// Where the marker goes under the current center mode.
    pub fn wheel_point(&self) -> WheelPoint {
        color_to_point(&self.color, self.center_mode)
    }

    pub fn snapshot(&self) -> ColorSnapshot {
        let rgb = self.rgb();
        ColorSnapshot {
            hsv: self.color,
            rgb,
            hex: rgb.to_hex(),
            center_mode: self.center_mode,
            wheel_point: self.wheel_point(),
        }
    }

    pub fn apply(&mut self, event: PickerEvent) -> ColorSnapshot {
        match event {
            PickerEvent::WheelMoved(point) => self.set_from_wheel(point),
            PickerEvent::WheelPixel { x, y, bounds } => self.set_from_wheel_pixel(x, y, &bounds),
            PickerEvent::RgbChanged(rgb) => self.set_from_rgb(rgb.r, rgb.g, rgb.b),
            PickerEvent::ChannelChanged { channel, value } => self.set_channel(channel, value),
            PickerEvent::HueChanged(hue) => self.set_hue(hue),
            PickerEvent::SaturationChanged(saturation) => self.set_saturation(saturation),
            PickerEvent::ValueChanged(value) => self.set_value(value),
            PickerEvent::ToggleCenterMode => self.toggle_center_mode(),
            PickerEvent::Reset => self.reset(),
        }
    }

    /// Take the color under `point`. The wheel center keeps the current hue.
    pub fn set_from_wheel(&mut self, point: WheelPoint) -> ColorSnapshot {
        self.color = point_to_color(point, self.center_mode, self.color.hue());
        self.snapshot()
    }

    pub fn set_from_wheel_pixel(&mut self, x: f64, y: f64, bounds: &WheelBounds) -> ColorSnapshot {
        self.set_from_wheel(bounds.to_point(x, y))
    }

    /// Store the HSV form of an RGB color, switching the center mode if the
    /// color implies one.
    pub fn set_from_rgb(&mut self, r: u8, g: u8, b: u8) -> ColorSnapshot {
        let hsv = rgb_to_hsv(r, g, b);
        if let Some(mode) = self.center_switch.implied_by_rgb(&hsv) {
            self.switch_mode(mode, "rgb edit");
        }
        self.color = hsv;
        self.snapshot()
    }

    /// One slider moved; the other two channels keep their displayed values.
    pub fn set_channel(&mut self, channel: RgbChannel, value: f64) -> ColorSnapshot {
        let level = clamp_channel(value.round()) as u8;
        let rgb = channel.set(self.rgb(), level);
        self.set_from_rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Parse and take a hex color. On error nothing changes.
    pub fn set_from_hex(&mut self, hex: &str) -> Result<ColorSnapshot, HexError> {
        let rgb = parse_hex(hex)?;
        Ok(self.set_from_rgb(rgb.r, rgb.g, rgb.b))
    }

    pub fn set_hue(&mut self, hue: f64) -> ColorSnapshot {
        self.color = self.color.with_hue(hue);
        self.snapshot()
    }

    pub fn set_saturation(&mut self, saturation: f64) -> ColorSnapshot {
        self.color = self.color.with_saturation(saturation);
        self.snapshot()
    }

    pub fn set_value(&mut self, value: f64) -> ColorSnapshot {
        self.color = self.color.with_value(value);
        if let Some(mode) = self.center_switch.implied_by_value(self.color.value()) {
            self.switch_mode(mode, "value pole");
        }
        self.snapshot()
    }

    /// Flip the center mode. The color stays the same; only where it is
    /// drawn on the wheel changes.
    pub fn toggle_center_mode(&mut self) -> ColorSnapshot {
        self.switch_mode(self.center_mode.toggled(), "toggle");
        self.snapshot()
    }

    pub fn reset(&mut self) -> ColorSnapshot {
        self.color = Hsv::default();
        self.center_mode = CenterMode::default();
        self.snapshot()
    }

    fn switch_mode(&mut self, mode: CenterMode, reason: &str) {
        if self.center_mode != mode {
            tracing::debug!(from = ?self.center_mode, to = ?mode, reason, "center mode switched");
            self.center_mode = mode;
        }
    }
}
