//! Sources:
//! - https://github.com/celclow/SwitchControlLibrary
//! - https://github.com/progmem/Switch-Fightstick
use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
    str::FromStr,
};

use packed_struct::prelude::*;
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::driver::STICK_CENTER;

/// Error returned when a button or hat name cannot be parsed
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown button: {0}")]
    UnknownButton(String),
    #[error("Unknown hat direction: {0}")]
    UnknownHat(String),
}

/// Set of controller buttons stored as a 16-bit mask. Only the low 14 bits
/// name real buttons; the encoder masks anything above them away.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Button(u16);

impl Button {
    pub const NONE: Button = Button(0x0000);
    pub const Y: Button = Button(0x0001);
    pub const B: Button = Button(0x0002);
    pub const A: Button = Button(0x0004);
    pub const X: Button = Button(0x0008);
    pub const L: Button = Button(0x0010);
    pub const R: Button = Button(0x0020);
    pub const ZL: Button = Button(0x0040);
    pub const ZR: Button = Button(0x0080);
    pub const MINUS: Button = Button(0x0100);
    pub const PLUS: Button = Button(0x0200);
    pub const LCLICK: Button = Button(0x0400);
    pub const RCLICK: Button = Button(0x0800);
    pub const HOME: Button = Button(0x1000);
    pub const CAPTURE: Button = Button(0x2000);

    /// Bits that map to a physical button
    pub const VALID_BITS: u16 = 0x3fff;

    /// Every named button in bit order
    pub const ALL: [(&'static str, Button); 14] = [
        ("Y", Button::Y),
        ("B", Button::B),
        ("A", Button::A),
        ("X", Button::X),
        ("L", Button::L),
        ("R", Button::R),
        ("ZL", Button::ZL),
        ("ZR", Button::ZR),
        ("MINUS", Button::MINUS),
        ("PLUS", Button::PLUS),
        ("LCLICK", Button::LCLICK),
        ("RCLICK", Button::RCLICK),
        ("HOME", Button::HOME),
        ("CAPTURE", Button::CAPTURE),
    ];

    /// Wraps a raw mask. Bits outside [Button::VALID_BITS] are kept here and
    /// discarded when the mask is written into a report.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in this mask
    pub const fn contains(&self, other: Button) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates over the named buttons set in this mask
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Button)> + '_ {
        Button::ALL
            .into_iter()
            .filter(move |(_, button)| self.contains(*button))
    }
}

/// Combines two button masks
pub const fn union(a: Button, b: Button) -> Button {
    Button(a.0 | b.0)
}

/// Returns the buttons present in both masks
pub const fn intersect(a: Button, b: Button) -> Button {
    Button(a.0 & b.0)
}

impl BitOr for Button {
    type Output = Button;

    fn bitor(self, rhs: Self) -> Self::Output {
        union(self, rhs)
    }
}

impl BitOrAssign for Button {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = union(*self, rhs);
    }
}

impl BitAnd for Button {
    type Output = Button;

    fn bitand(self, rhs: Self) -> Self::Output {
        intersect(self, rhs)
    }
}

impl BitAndAssign for Button {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = intersect(*self, rhs);
    }
}

impl From<u16> for Button {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<Button> for u16 {
    fn from(button: Button) -> Self {
        button.0
    }
}

impl FromStr for Button {
    type Err = ParseError;

    /// Parses a single button name or a combination such as `A+B` or `L|R`.
    /// Raw bits may be given in hex (`A+0x8000`), as `Display` writes them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buttons = Button::NONE;
        for name in s.split(['+', '|']) {
            let name = name.trim();
            if name.eq_ignore_ascii_case("none") {
                continue;
            }
            if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
                let Ok(bits) = u16::from_str_radix(hex, 16) else {
                    return Err(ParseError::UnknownButton(name.to_string()));
                };
                buttons |= Button::from_bits(bits);
                continue;
            }
            let Some((_, button)) = Button::ALL
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(name))
            else {
                return Err(ParseError::UnknownButton(name.to_string()));
            };
            buttons |= *button;
        }
        Ok(buttons)
    }
}

impl TryFrom<String> for Button {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Button> for String {
    fn from(button: Button) -> Self {
        button.to_string()
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names: Vec<&str> = self.iter().map(|(name, _)| name).collect();
        write!(f, "{}", names.join("+"))?;
        let unknown = self.0 & !Button::VALID_BITS;
        if unknown != 0 {
            if !names.is_empty() {
                write!(f, "+")?;
            }
            write!(f, "{unknown:#06x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Button({self})")
    }
}

impl JsonSchema for Button {
    fn schema_name() -> String {
        "Button".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

/// Direction pad (hat switch) state. Exactly one value is active at a time;
/// [Hat::Center] is the null state declared in the report descriptor.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Hat {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
    #[default]
    Center = 8,
}

impl Hat {
    pub const ALL: [Hat; 9] = [
        Hat::Top,
        Hat::TopRight,
        Hat::Right,
        Hat::BottomRight,
        Hat::Bottom,
        Hat::BottomLeft,
        Hat::Left,
        Hat::TopLeft,
        Hat::Center,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hat::Top => "top",
            Hat::TopRight => "top_right",
            Hat::Right => "right",
            Hat::BottomRight => "bottom_right",
            Hat::Bottom => "bottom",
            Hat::BottomLeft => "bottom_left",
            Hat::Left => "left",
            Hat::TopLeft => "top_left",
            Hat::Center => "center",
        }
    }
}

impl FromStr for Hat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        let hat = match name.as_str() {
            "top" | "up" => Hat::Top,
            "top_right" | "up_right" => Hat::TopRight,
            "right" => Hat::Right,
            "bottom_right" | "down_right" => Hat::BottomRight,
            "bottom" | "down" => Hat::Bottom,
            "bottom_left" | "down_left" => Hat::BottomLeft,
            "left" => Hat::Left,
            "top_left" | "up_left" => Hat::TopLeft,
            "center" | "neutral" | "none" => Hat::Center,
            _ => return Err(ParseError::UnknownHat(s.to_string())),
        };
        Ok(hat)
    }
}

impl TryFrom<String> for Hat {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hat> for String {
    fn from(hat: Hat) -> Self {
        hat.as_str().to_string()
    }
}

impl fmt::Display for Hat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JsonSchema for Hat {
    fn schema_name() -> String {
        "Hat".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

/// Decoded view of the 8 byte input report. Button bits are numbered from the
/// least significant bit of each byte, so with msb0 numbering bit 7 is Y.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "8")]
pub struct PackedInputDataReport {
    // byte 0
    #[packed_field(bits = "0")]
    pub zr: bool,
    #[packed_field(bits = "1")]
    pub zl: bool,
    #[packed_field(bits = "2")]
    pub r: bool,
    #[packed_field(bits = "3")]
    pub l: bool,
    #[packed_field(bits = "4")]
    pub x: bool,
    #[packed_field(bits = "5")]
    pub a: bool,
    #[packed_field(bits = "6")]
    pub b: bool,
    #[packed_field(bits = "7")]
    pub y: bool,

    // byte 1
    #[packed_field(bits = "8..=9")]
    pub _button_padding: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "10")]
    pub capture: bool,
    #[packed_field(bits = "11")]
    pub home: bool,
    #[packed_field(bits = "12")]
    pub rclick: bool,
    #[packed_field(bits = "13")]
    pub lclick: bool,
    #[packed_field(bits = "14")]
    pub plus: bool,
    #[packed_field(bits = "15")]
    pub minus: bool,

    // byte 2
    #[packed_field(bits = "16..=19")]
    pub _hat_padding: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "20..=23", ty = "enum")]
    pub hat: Hat,

    // byte 3-6
    #[packed_field(bytes = "3")]
    pub joystick_l_x: u8,
    #[packed_field(bytes = "4")]
    pub joystick_l_y: u8,
    #[packed_field(bytes = "5")]
    pub joystick_r_x: u8,
    #[packed_field(bytes = "6")]
    pub joystick_r_y: u8,

    // byte 7
    #[packed_field(bytes = "7")]
    pub vendor: u8,
}

impl PackedInputDataReport {
    /// Rebuilds the button mask from the individual button fields
    pub fn buttons(&self) -> Button {
        let pressed = [
            (self.y, Button::Y),
            (self.b, Button::B),
            (self.a, Button::A),
            (self.x, Button::X),
            (self.l, Button::L),
            (self.r, Button::R),
            (self.zl, Button::ZL),
            (self.zr, Button::ZR),
            (self.minus, Button::MINUS),
            (self.plus, Button::PLUS),
            (self.lclick, Button::LCLICK),
            (self.rclick, Button::RCLICK),
            (self.home, Button::HOME),
            (self.capture, Button::CAPTURE),
        ];
        pressed
            .into_iter()
            .filter(|(is_pressed, _)| *is_pressed)
            .fold(Button::NONE, |mask, (_, button)| union(mask, button))
    }
}

impl Default for PackedInputDataReport {
    fn default() -> Self {
        Self {
            zr: false,
            zl: false,
            r: false,
            l: false,
            x: false,
            a: false,
            b: false,
            y: false,
            _button_padding: Integer::from_primitive(0),
            capture: false,
            home: false,
            rclick: false,
            lclick: false,
            plus: false,
            minus: false,
            _hat_padding: Integer::from_primitive(0),
            hat: Hat::Center,
            joystick_l_x: STICK_CENTER,
            joystick_l_y: STICK_CENTER,
            joystick_r_x: STICK_CENTER,
            joystick_r_y: STICK_CENTER,
            vendor: 0,
        }
    }
}
