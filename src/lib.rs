pub mod logger;
pub mod color_math;
pub mod wheel;
pub mod event;
pub mod color_state;
pub mod session;
pub mod config;
pub mod command;

pub use logger::*;
pub use color_math::{Hsv, Rgb, HexError};
pub use wheel::{CenterMode, WheelPoint, WheelBounds};
pub use event::{PickerEvent, RgbChannel};
pub use color_state::{ColorState, ColorSnapshot, CenterSwitch};
pub use session::PickerSession;
pub use config::{Config, PickerConfig};
