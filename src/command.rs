//! Text commands for the terminal front end.

use crate::color_math::{clamp_channel, Rgb};
use crate::color_state::CenterSwitch;
use crate::event::{PickerEvent, RgbChannel};
use crate::wheel::{WheelBounds, WheelPoint};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  wheel X Y                 pointer at normalized wheel coordinates
  pixel PX PY CX CY R       pointer in pixels on a wheel centered at (CX, CY) with radius R
  rgb R G B                 set all three channels (0-255)
  r V | g V | b V           move one channel slider (0-255)
  hue H | sat S | val V     set hue (degrees), saturation or value (0-1)
  hex CODE                  set from #rrggbb or #rgb
  toggle                    switch the center blend between white and black
  reset                     back to pure red, white center
  policy white_only|symmetric
                            when RGB/hex edits switch the center blend (saved to config)
  show                      print the current color
  help | quit";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("invalid number for <{arg}>: '{value}'")]
    InvalidNumber { arg: &'static str, value: String },
    #[error("unknown center switch policy '{0}', expected white_only or symmetric")]
    UnknownPolicy(String),
    #[error("unexpected input '{0}'")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(PickerEvent),
    Hex(String),
    Policy(CenterSwitch),
    Show,
    Help,
    Quit,
}

struct Args<'a> {
    words: std::vec::IntoIter<&'a str>,
}

impl<'a> Args<'a> {
    fn word(&mut self, arg: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument(arg))
    }

    fn number(&mut self, arg: &'static str) -> Result<f64, CommandError> {
        let word = self.word(arg)?;
        word.parse::<f64>().map_err(|_| CommandError::InvalidNumber {
            arg,
            value: word.to_string(),
        })
    }

    /// Slider position; out-of-range values are clamped, not rejected.
    fn channel(&mut self, arg: &'static str) -> Result<u8, CommandError> {
        let value = self.number(arg)?;
        Ok(clamp_channel(value.round()) as u8)
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_string())),
            None => Ok(()),
        }
    }
}

/// Split a line into words, dropping a trailing `#` comment.
///
/// The word right after `hex` is kept even though it may start with `#`.
fn tokenize(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = Vec::new();
    for word in line.split_whitespace() {
        let is_hex_arg = words.len() == 1 && words[0].eq_ignore_ascii_case("hex");
        if word.starts_with('#') && !is_hex_arg {
            break;
        }
        words.push(word);
    }
    words
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut args = Args { words: tokenize(line).into_iter() };
    let name = args.words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

    let command = match name.as_str() {
        "wheel" => {
            let x = args.number("x")?;
            let y = args.number("y")?;
            Command::Event(PickerEvent::WheelMoved(WheelPoint::new(x, y)))
        }
        "pixel" => {
            let x = args.number("px")?;
            let y = args.number("py")?;
            let bounds = WheelBounds::new(args.number("cx")?, args.number("cy")?, args.number("r")?);
            Command::Event(PickerEvent::WheelPixel { x, y, bounds })
        }
        "rgb" => {
            let rgb = Rgb::new(args.channel("r")?, args.channel("g")?, args.channel("b")?);
            Command::Event(PickerEvent::RgbChanged(rgb))
        }
        "r" | "g" | "b" => {
            let channel = match name.as_str() {
                "r" => RgbChannel::Red,
                "g" => RgbChannel::Green,
                _ => RgbChannel::Blue,
            };
            let value = args.number("value")?;
            Command::Event(PickerEvent::ChannelChanged { channel, value })
        }
        "hue" | "h" => Command::Event(PickerEvent::HueChanged(args.number("degrees")?)),
        "sat" | "s" => Command::Event(PickerEvent::SaturationChanged(args.number("saturation")?)),
        "val" | "v" => Command::Event(PickerEvent::ValueChanged(args.number("value")?)),
        "hex" => Command::Hex(args.word("code")?.to_string()),
        "policy" => {
            let word = args.word("policy")?;
            let policy = match word.to_ascii_lowercase().replace('-', "_").as_str() {
                "white_only" | "white" => CenterSwitch::WhiteOnly,
                "symmetric" => CenterSwitch::Symmetric,
                _ => return Err(CommandError::UnknownPolicy(word.to_string())),
            };
            Command::Policy(policy)
        }
        "toggle" => Command::Event(PickerEvent::ToggleCenterMode),
        "reset" => Command::Event(PickerEvent::Reset),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    args.finish()?;
    Ok(command)
}
