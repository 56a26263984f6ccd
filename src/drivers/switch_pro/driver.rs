// Hardware IDs of the HORIPAD S, a wired pad the console accepts as a
// Pro Controller compatible device with this report layout.
pub const VID: u16 = 0x0f0d;
pub const PID: u16 = 0x00c1;
pub const VERSION: u16 = 0x0572;
pub const NAME: &str = "HORI CO.,LTD. HORIPAD S";

/// Input reports are sent without a report id prefix
pub const REPORT_ID: u8 = 0;
/// Size of the HID input report
pub const REPORT_SIZE: usize = 8;

// Byte offsets in the input report
pub const BUTTONS_LOW_BYTE: usize = 0;
pub const BUTTONS_HIGH_BYTE: usize = 1;
pub const HAT_BYTE: usize = 2;
pub const LEFT_STICK_X_BYTE: usize = 3;
pub const LEFT_STICK_Y_BYTE: usize = 4;
pub const RIGHT_STICK_X_BYTE: usize = 5;
pub const RIGHT_STICK_Y_BYTE: usize = 6;
pub const VENDOR_BYTE: usize = 7;

/// Only the low 6 bits of the second button byte are buttons
pub const BUTTONS_HIGH_MASK: u8 = 0x3f;
/// The hat value lives in the low nibble of its byte
pub const HAT_MASK: u8 = 0x0f;

// Stick ranges
pub const STICK_CENTER: u8 = 128;
pub const STICK_AXIS_MIN: f32 = -1.0;
pub const STICK_AXIS_MAX: f32 = 1.0;
/// Scale applied to `value + 1.0` to map [-1.0, 1.0] onto [0, 255]
pub const STICK_SCALE: f32 = 127.5;

/// Report written by a freshly constructed or fully released controller
pub const NEUTRAL_REPORT: [u8; REPORT_SIZE] = [
    0x00,
    0x00,
    0x08,
    STICK_CENTER,
    STICK_CENTER,
    STICK_CENTER,
    STICK_CENTER,
    0x00,
];
