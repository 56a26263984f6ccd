//! Module for searching for switchpad config files

use std::path::PathBuf;

/// Name of the device configuration file
const CONFIG_FILE: &str = "device.yaml";
/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/etc/switchpad";

/// Returns the path of the device configuration to use if one exists, looking
/// in the XDG config directories first (e.g. "~/.config/switchpad/device.yaml")
/// and then in "/etc/switchpad".
pub fn find_device_config() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("switchpad") {
        Ok(base_dirs) => {
            if let Some(path) = base_dirs.find_config_file(CONFIG_FILE) {
                return Some(path);
            }
        }
        Err(e) => log::warn!("Unable to determine config base path: {e:?}"),
    }

    let fallback = PathBuf::from(FALLBACK_BASE_PATH).join(CONFIG_FILE);
    if fallback.is_file() {
        return Some(fallback);
    }

    None
}
