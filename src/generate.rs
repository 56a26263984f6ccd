use std::fs::{self, File};
use std::io::Write;

use schemars::schema_for;
use switchpad::config::DeviceConfig;

fn main() {
    let device_config_schema = schema_for!(DeviceConfig);
    fs::create_dir_all("./rootfs/usr/share/switchpad/schema")
        .expect("Failed to create schema directory");
    let mut file = File::create("./rootfs/usr/share/switchpad/schema/device_config_v1.json")
        .expect("Failed to create schema file");
    write!(
        file,
        "{}",
        serde_json::to_string_pretty(&device_config_schema).unwrap()
    )
    .expect("Failed to write schema");
}
