use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::drivers::switch_pro::{
    encoder::ReportEncoder,
    hid_report::{union, Button, Hat},
};

use super::LoadError;

/// A complete controller state that can be written in YAML, e.g.:
///
/// ```yaml
/// buttons: [A, ZL+ZR]
/// hat: right
/// left_stick: [0.5, -1.0]
/// ```
///
/// Raw stick values take precedence over normalized ones for the same stick.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case", default)]
pub struct InputState {
    pub buttons: Vec<Button>,
    /// Raw button mask, combined with `buttons`
    pub button_mask: Option<u16>,
    pub hat: Option<Hat>,
    pub left_stick: Option<[f32; 2]>,
    pub right_stick: Option<[f32; 2]>,
    pub left_stick_raw: Option<[u8; 2]>,
    pub right_stick_raw: Option<[u8; 2]>,
}

impl InputState {
    /// Load an [InputState] from the given YAML string
    pub fn from_yaml(content: String) -> Result<InputState, LoadError> {
        let state: InputState = serde_yaml::from_str(content.as_str())?;
        Ok(state)
    }

    /// Load an [InputState] from the given YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<InputState, LoadError> {
        let file = std::fs::File::open(path)?;
        let state: InputState = serde_yaml::from_reader(file)?;
        Ok(state)
    }

    /// All buttons this state presses
    pub fn button_mask(&self) -> Button {
        let mask = Button::from_bits(self.button_mask.unwrap_or_default());
        self.buttons.iter().fold(mask, |mask, b| union(mask, *b))
    }

    /// Write this state into the encoder, replacing whatever it held before
    pub fn apply(&self, encoder: &mut ReportEncoder) {
        encoder.release_all();
        encoder.set_button_mask(self.button_mask().bits());
        if let Some(hat) = self.hat {
            encoder.set_hat(hat);
        }
        if let Some([x, y]) = self.left_stick {
            encoder.set_left_stick(x, y);
        }
        if let Some([x, y]) = self.right_stick {
            encoder.set_right_stick(x, y);
        }
        if let Some([x, y]) = self.left_stick_raw {
            encoder.set_left_stick_raw(x, y);
        }
        if let Some([x, y]) = self.right_stick_raw {
            encoder.set_right_stick_raw(x, y);
        }
    }
}
