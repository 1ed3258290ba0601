use crate::color_math::Rgb;
use crate::wheel::{WheelBounds, WheelPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

impl RgbChannel {
    pub fn set(self, rgb: Rgb, value: u8) -> Rgb {
        match self {
            RgbChannel::Red => Rgb { r: value, ..rgb },
            RgbChannel::Green => Rgb { g: value, ..rgb },
            RgbChannel::Blue => Rgb { b: value, ..rgb },
        }
    }
}

/// Something the presentation layer asks the picker to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerEvent {
    /// Pointer on the wheel, already in normalized coordinates.
    WheelMoved(WheelPoint),
    /// Pointer on the wheel in pixels, with the wheel's pixel geometry.
    WheelPixel { x: f64, y: f64, bounds: WheelBounds },
    RgbChanged(Rgb),
    /// One RGB slider moved; `value` is in slider units `[0, 255]`.
    ChannelChanged { channel: RgbChannel, value: f64 },
    HueChanged(f64),
    SaturationChanged(f64),
    ValueChanged(f64),
    ToggleCenterMode,
    Reset,
}

/// Events that arrive in bursts while a pointer is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Wheel,
    Channel(RgbChannel),
    Hue,
    Saturation,
    Value,
}

impl PickerEvent {
    /// Drag stream this event belongs to; only the latest of a run matters.
    pub fn drag_kind(&self) -> Option<DragKind> {
        match self {
            PickerEvent::WheelMoved(_) | PickerEvent::WheelPixel { .. } => Some(DragKind::Wheel),
            PickerEvent::ChannelChanged { channel, .. } => Some(DragKind::Channel(*channel)),
            PickerEvent::HueChanged(_) => Some(DragKind::Hue),
            PickerEvent::SaturationChanged(_) => Some(DragKind::Saturation),
            PickerEvent::ValueChanged(_) => Some(DragKind::Value),
            PickerEvent::RgbChanged(_) | PickerEvent::ToggleCenterMode | PickerEvent::Reset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_set() {
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(RgbChannel::Green.set(rgb, 0), Rgb::new(1, 0, 3));
        assert_eq!(RgbChannel::Blue.set(rgb, 200), Rgb::new(1, 2, 200));
    }

    #[test]
    fn test_drag_kinds() {
        let bounds = WheelBounds::new(0.0, 0.0, 10.0);
        assert_eq!(
            PickerEvent::WheelPixel { x: 1.0, y: 1.0, bounds }.drag_kind(),
            PickerEvent::WheelMoved(WheelPoint::CENTER).drag_kind()
        );
        assert_ne!(
            PickerEvent::ChannelChanged { channel: RgbChannel::Red, value: 1.0 }.drag_kind(),
            PickerEvent::ChannelChanged { channel: RgbChannel::Green, value: 1.0 }.drag_kind()
        );
        assert_eq!(PickerEvent::Reset.drag_kind(), None);
    }
}
