use std::{path::PathBuf, str::FromStr};

use clap::Args;

use crate::{
    config::{InputState, LoadError},
    drivers::switch_pro::hid_report::{Button, Hat},
};

/// Input state given on the command line. Flags are applied on top of the
/// state loaded with `--state` (or from the device configuration).
#[derive(Args, Debug, Clone, Default)]
pub struct StateArgs {
    /// Load the input state from a YAML file
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Buttons to press, e.g. "A" or "ZL+ZR" (may be repeated)
    #[arg(short, long)]
    pub press: Vec<Button>,
    /// Raw button mask, e.g. 0x0005
    #[arg(long, value_parser = parse_mask)]
    pub mask: Option<u16>,
    /// Direction pad, e.g. "right" or "bottom-left"
    #[arg(long)]
    pub hat: Option<Hat>,
    /// Left stick as "x,y" between -1.0 and 1.0
    #[arg(long, value_parser = parse_axis_pair::<f32>, allow_hyphen_values = true)]
    pub left_stick: Option<(f32, f32)>,
    /// Right stick as "x,y" between -1.0 and 1.0
    #[arg(long, value_parser = parse_axis_pair::<f32>, allow_hyphen_values = true)]
    pub right_stick: Option<(f32, f32)>,
    /// Left stick as raw "x,y" bytes between 0 and 255
    #[arg(long, value_parser = parse_axis_pair::<u8>)]
    pub left_stick_raw: Option<(u8, u8)>,
    /// Right stick as raw "x,y" bytes between 0 and 255
    #[arg(long, value_parser = parse_axis_pair::<u8>)]
    pub right_stick_raw: Option<(u8, u8)>,
}

impl StateArgs {
    /// Build the input state, starting from `--state` if given or from `base`
    pub fn into_input_state(self, base: Option<InputState>) -> Result<InputState, LoadError> {
        let mut state = match self.state.as_ref() {
            Some(path) => InputState::from_yaml_file(path)?,
            None => base.unwrap_or_default(),
        };
        self.merge_into(&mut state);
        Ok(state)
    }

    /// Override the given state with the values set on the command line
    pub fn merge_into(&self, state: &mut InputState) {
        state.buttons.extend(self.press.iter().copied());
        if let Some(mask) = self.mask {
            state.button_mask = Some(mask);
        }
        if let Some(hat) = self.hat {
            state.hat = Some(hat);
        }
        if let Some((x, y)) = self.left_stick {
            state.left_stick = Some([x, y]);
            state.left_stick_raw = None;
        }
        if let Some((x, y)) = self.right_stick {
            state.right_stick = Some([x, y]);
            state.right_stick_raw = None;
        }
        if let Some((x, y)) = self.left_stick_raw {
            state.left_stick_raw = Some([x, y]);
        }
        if let Some((x, y)) = self.right_stick_raw {
            state.right_stick_raw = Some([x, y]);
        }
    }
}

/// Parse a button mask in hexadecimal ("0x1004") or decimal form
pub fn parse_mask(value: &str) -> Result<u16, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid button mask '{value}': {e}"))
}

/// Parse an "x,y" pair of values
pub fn parse_axis_pair<T>(value: &str) -> Result<(T, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some((x, y)) = value.split_once(',') else {
        return Err(format!("expected 'x,y' but got '{value}'"));
    };
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x value '{x}': {e}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y value '{y}': {e}"))?;
    Ok((x, y))
}
