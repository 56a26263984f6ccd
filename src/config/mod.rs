pub mod input_state;
pub mod path;

use std::{io, path::Path, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drivers::switch_pro::driver::{NAME, PID, VERSION, VID};

pub use input_state::InputState;

#[cfg(test)]
pub mod config_test;

/// Default interval between two input reports
const DEFAULT_POLL_INTERVAL_MS: u64 = 8;

/// Represents all possible errors loading a configuration file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

/// Identity and timing of the emulated controller. Every field is optional in
/// the YAML file and falls back to the HORIPAD S identity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case", default)]
pub struct DeviceConfig {
    /// Product name reported to the host
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    /// Device release number (bcdDevice)
    pub version: u16,
    /// Milliseconds between two input reports
    pub poll_interval_ms: u64,
    /// Input state to hold while emulating
    pub state: Option<InputState>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: NAME.to_string(),
            vendor_id: VID,
            product_id: PID,
            version: VERSION,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            state: None,
        }
    }
}

impl DeviceConfig {
    /// Load a [DeviceConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<DeviceConfig, LoadError> {
        let device: DeviceConfig = serde_yaml::from_str(content.as_str())?;
        Ok(device)
    }

    /// Load a [DeviceConfig] from the given YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<DeviceConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let device: DeviceConfig = serde_yaml::from_reader(file)?;
        Ok(device)
    }

    /// Interval between two input reports. Never zero.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
