use std::{error::Error, time::Duration};

use crate::{
    config::{DeviceConfig, InputState},
    drivers::switch_pro::{
        driver::{PID, VID},
        encoder::ReportEncoder,
        hid_report::{Button, Hat},
    },
};

#[test]
fn test_default_config() {
    let config = DeviceConfig::default();
    assert_eq!(config.vendor_id, VID);
    assert_eq!(config.product_id, PID);
    assert_eq!(config.poll_interval(), Duration::from_millis(8));
    assert!(config.state.is_none());
}

#[test]
fn test_partial_config_uses_defaults() -> Result<(), Box<dyn Error>> {
    let yaml = r#"
name: Test Pad
product_id: 0x0092
"#;
    let config = DeviceConfig::from_yaml(yaml.to_string())?;
    assert_eq!(config.name, "Test Pad");
    assert_eq!(config.product_id, 0x0092);
    assert_eq!(config.vendor_id, VID, "missing keys should use defaults");
    Ok(())
}

#[test]
fn test_zero_poll_interval() -> Result<(), Box<dyn Error>> {
    let config = DeviceConfig::from_yaml("poll_interval_ms: 0".to_string())?;
    assert_eq!(config.poll_interval(), Duration::from_millis(1));
    Ok(())
}

#[test]
fn test_invalid_config() {
    let result = DeviceConfig::from_yaml("vendor_id: [1, 2]".to_string());
    assert!(result.is_err(), "should reject a malformed vendor id");
}

#[test]
fn test_missing_config_file() {
    let result = DeviceConfig::from_yaml_file("/nonexistent/switchpad/device.yaml");
    assert!(result.is_err());
}

#[test]
fn test_config_with_state() -> Result<(), Box<dyn Error>> {
    let yaml = r#"
state:
  buttons: [A, ZL+ZR]
  hat: top_right
  left_stick: [1.0, -1.0]
"#;
    let config = DeviceConfig::from_yaml(yaml.to_string())?;
    let state = config.state.expect("should have a state");
    assert_eq!(state.buttons, vec![Button::A, Button::ZL | Button::ZR]);
    assert_eq!(state.hat, Some(Hat::TopRight));
    assert_eq!(state.left_stick, Some([1.0, -1.0]));
    Ok(())
}

#[test]
fn test_apply_state() -> Result<(), Box<dyn Error>> {
    let yaml = r#"
buttons: [B]
button_mask: 0x1000
hat: left
left_stick: [0.0, 0.0]
right_stick: [1.0, 1.0]
right_stick_raw: [10, 20]
"#;
    let state = InputState::from_yaml(yaml.to_string())?;
    assert_eq!(state.button_mask(), Button::B | Button::HOME);

    let mut encoder = ReportEncoder::new();
    encoder.press(Button::X);
    state.apply(&mut encoder);

    assert_eq!(
        encoder.current_report(),
        [0x02, 0x10, 0x06, 127, 127, 10, 20, 0],
        "raw stick values should win and previous state should be replaced"
    );
    Ok(())
}

#[test]
fn test_empty_state_is_neutral() {
    let mut encoder = ReportEncoder::new();
    encoder.set_hat(Hat::Bottom);
    InputState::default().apply(&mut encoder);
    assert_eq!(encoder.current_report(), ReportEncoder::new().current_report());
}
