use std::error::Error;

use packed_struct::prelude::*;

use crate::drivers::switch_pro::{
    driver::NEUTRAL_REPORT,
    hid_report::{intersect, union, Button, Hat, PackedInputDataReport, ParseError},
};

#[test]
fn test_button_values() {
    let expected: [u16; 14] = [
        0x0001, 0x0002, 0x0004, 0x0008, 0x0010, 0x0020, 0x0040, 0x0080, 0x0100, 0x0200, 0x0400,
        0x0800, 0x1000, 0x2000,
    ];
    for ((name, button), bits) in Button::ALL.into_iter().zip(expected) {
        assert_eq!(button.bits(), bits, "unexpected mask for {name}");
    }
    assert_eq!(Button::NONE.bits(), 0);
    assert_eq!(Button::default(), Button::NONE);
}

#[test]
fn test_button_set_operations() {
    let ab = union(Button::A, Button::B);
    assert_eq!(ab.bits(), 0x0006);
    assert_eq!(ab, Button::A | Button::B);
    assert_eq!(intersect(ab, Button::A), Button::A);
    assert_eq!(intersect(ab, Button::X), Button::NONE);
    assert_eq!(union(ab, Button::NONE), ab, "NONE should be the zero element");
    assert!(ab.contains(Button::B));
    assert!(!ab.contains(Button::X));

    let mut buttons = Button::NONE;
    buttons |= Button::HOME;
    buttons |= Button::CAPTURE;
    buttons &= Button::HOME;
    assert_eq!(buttons, Button::HOME);
}

#[test]
fn test_button_parse() -> Result<(), Box<dyn Error>> {
    assert_eq!("A".parse::<Button>()?, Button::A);
    assert_eq!("zl+ZR".parse::<Button>()?, Button::ZL | Button::ZR);
    assert_eq!(" l | r ".parse::<Button>()?, Button::L | Button::R);
    assert_eq!("none".parse::<Button>()?, Button::NONE);
    assert_eq!(
        "A+TURBO".parse::<Button>(),
        Err(ParseError::UnknownButton("TURBO".to_string()))
    );
    Ok(())
}

#[test]
fn test_button_display() {
    assert_eq!(Button::NONE.to_string(), "NONE");
    assert_eq!((Button::Y | Button::PLUS).to_string(), "Y+PLUS");
    assert_eq!(Button::from_bits(0x8001).to_string(), "Y+0x8000");
    assert_eq!(format!("{:?}", Button::HOME), "Button(HOME)");
}

#[test]
fn test_button_serde() -> Result<(), Box<dyn Error>> {
    let buttons: Vec<Button> = serde_yaml::from_str("[A, ZL+ZR, capture]")?;
    assert_eq!(buttons, vec![Button::A, Button::ZL | Button::ZR, Button::CAPTURE]);

    let yaml = serde_yaml::to_string(&(Button::B | Button::MINUS))?;
    assert_eq!(yaml.trim(), "B+MINUS");
    Ok(())
}

#[test]
fn test_button_unknown_bits_round_trip() -> Result<(), Box<dyn Error>> {
    let buttons = Button::from_bits(0xc001);
    assert_eq!(buttons.to_string().parse::<Button>()?, buttons);
    assert_eq!("0x8000".parse::<Button>()?, Button::from_bits(0x8000));
    assert_eq!(
        "A+0xzz".parse::<Button>(),
        Err(ParseError::UnknownButton("0xzz".to_string()))
    );

    let yaml = serde_yaml::to_string(&buttons)?;
    let parsed: Button = serde_yaml::from_str(&yaml)?;
    assert_eq!(parsed, buttons, "unknown bits should survive serialization");
    Ok(())
}

#[test]
fn test_hat_parse() -> Result<(), Box<dyn Error>> {
    assert_eq!("right".parse::<Hat>()?, Hat::Right);
    assert_eq!("Bottom-Left".parse::<Hat>()?, Hat::BottomLeft);
    assert_eq!("up".parse::<Hat>()?, Hat::Top);
    assert_eq!("neutral".parse::<Hat>()?, Hat::Center);
    assert!("sideways".parse::<Hat>().is_err());

    for hat in Hat::ALL {
        assert_eq!(hat.to_string().parse::<Hat>()?, hat, "{hat} should round trip");
    }
    Ok(())
}

#[test]
fn test_hat_values() {
    assert_eq!(Hat::Top.to_primitive(), 0);
    assert_eq!(Hat::TopLeft.to_primitive(), 7);
    assert_eq!(Hat::Center.to_primitive(), 8);
    assert_eq!(Hat::default(), Hat::Center);
}

#[test]
fn test_default_report_is_neutral() -> Result<(), Box<dyn Error>> {
    let report = PackedInputDataReport::default();
    assert_eq!(report.pack()?, NEUTRAL_REPORT);
    Ok(())
}

#[test]
fn test_pack_layout() -> Result<(), Box<dyn Error>> {
    let report = PackedInputDataReport {
        y: true,
        zr: true,
        minus: true,
        capture: true,
        hat: Hat::Right,
        joystick_l_x: 1,
        joystick_l_y: 2,
        joystick_r_x: 3,
        joystick_r_y: 4,
        ..Default::default()
    };
    assert_eq!(report.pack()?, [0x81, 0x21, 0x02, 1, 2, 3, 4, 0]);
    assert_eq!(
        report.buttons(),
        Button::Y | Button::ZR | Button::MINUS | Button::CAPTURE
    );
    Ok(())
}

#[test]
fn test_unpack_invalid_hat() {
    let data = [0x00, 0x00, 0x0c, 128, 128, 128, 128, 0];
    assert!(
        PackedInputDataReport::unpack(&data).is_err(),
        "hat value 12 should not decode"
    );
}
