use packed_struct::{prelude::*, PackingResult};

use crate::input::target::{DescriptorProvider, ReportSink, ReportSource, ReportType};

use super::{
    driver::{
        BUTTONS_HIGH_BYTE, BUTTONS_HIGH_MASK, BUTTONS_LOW_BYTE, HAT_BYTE, HAT_MASK,
        LEFT_STICK_X_BYTE, LEFT_STICK_Y_BYTE, NEUTRAL_REPORT, REPORT_SIZE, RIGHT_STICK_X_BYTE,
        RIGHT_STICK_Y_BYTE, STICK_AXIS_MAX, STICK_AXIS_MIN, STICK_SCALE,
    },
    hid_report::{Button, Hat, PackedInputDataReport},
    report_descriptor::REPORT_DESCRIPTOR,
};

/// Snapshot of the input report as it is sent to the host
pub type Report = [u8; REPORT_SIZE];

/// The [ReportEncoder] owns the input report of an emulated Switch pad and
/// translates logical controller state (buttons, hat, sticks) into the exact
/// byte layout declared by [REPORT_DESCRIPTOR].
///
/// Every mutator is total: out of range button bits are masked away and stick
/// values are clamped, so the report is always valid for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEncoder {
    report: Report,
    dirty: bool,
}

impl ReportEncoder {
    pub fn new() -> Self {
        let mut encoder = Self {
            report: [0; REPORT_SIZE],
            dirty: false,
        };
        encoder.release_all();
        encoder.dirty = false;
        encoder
    }

    /// Press the given button(s). Pressing an already pressed button does nothing.
    pub fn press(&mut self, button: Button) {
        let (low, high) = split_button_bits(button.bits());
        self.report[BUTTONS_LOW_BYTE] |= low;
        self.report[BUTTONS_HIGH_BYTE] |= high;
        self.dirty = true;
    }

    /// Release the given button(s). Releasing a button that is not pressed
    /// does nothing.
    pub fn release(&mut self, button: Button) {
        let (low, high) = split_button_bits(button.bits());
        self.report[BUTTONS_LOW_BYTE] &= !low;
        self.report[BUTTONS_HIGH_BYTE] &= !high;
        self.dirty = true;
    }

    /// Replace the entire button state with the given mask
    pub fn set_button_mask(&mut self, mask: u16) {
        let (low, high) = split_button_bits(mask);
        self.report[BUTTONS_LOW_BYTE] = low;
        self.report[BUTTONS_HIGH_BYTE] = high;
        self.dirty = true;
    }

    /// Reset every input to its neutral state: no buttons, centered hat and
    /// centered sticks.
    pub fn release_all(&mut self) {
        self.report = NEUTRAL_REPORT;
        self.dirty = true;
    }

    pub fn set_hat(&mut self, hat: Hat) {
        self.report[HAT_BYTE] = hat.to_primitive() & HAT_MASK;
        self.dirty = true;
    }

    /// Set the left stick from normalized values between -1.0 and 1.0
    pub fn set_left_stick(&mut self, x: f32, y: f32) {
        self.set_left_stick_raw(denormalize_stick_value(x), denormalize_stick_value(y));
    }

    /// Set the right stick from normalized values between -1.0 and 1.0
    pub fn set_right_stick(&mut self, x: f32, y: f32) {
        self.set_right_stick_raw(denormalize_stick_value(x), denormalize_stick_value(y));
    }

    pub fn set_left_stick_raw(&mut self, x: u8, y: u8) {
        self.report[LEFT_STICK_X_BYTE] = x;
        self.report[LEFT_STICK_Y_BYTE] = y;
        self.dirty = true;
    }

    pub fn set_right_stick_raw(&mut self, x: u8, y: u8) {
        self.report[RIGHT_STICK_X_BYTE] = x;
        self.report[RIGHT_STICK_Y_BYTE] = y;
        self.dirty = true;
    }

    /// Returns the currently pressed buttons
    pub fn buttons(&self) -> Button {
        let low = self.report[BUTTONS_LOW_BYTE] as u16;
        let high = self.report[BUTTONS_HIGH_BYTE] as u16;
        Button::from_bits((high << 8) | low)
    }

    /// Returns the current hat direction. The encoder only ever writes valid
    /// hat values, so anything else reads as centered.
    pub fn hat(&self) -> Hat {
        Hat::from_primitive(self.report[HAT_BYTE] & HAT_MASK).unwrap_or_default()
    }

    pub fn left_stick(&self) -> (u8, u8) {
        (
            self.report[LEFT_STICK_X_BYTE],
            self.report[LEFT_STICK_Y_BYTE],
        )
    }

    pub fn right_stick(&self) -> (u8, u8) {
        (
            self.report[RIGHT_STICK_X_BYTE],
            self.report[RIGHT_STICK_Y_BYTE],
        )
    }

    /// Returns the current input report
    pub fn current_report(&self) -> Report {
        self.report
    }

    /// Returns the HID report descriptor that declares the report layout
    pub fn descriptor(&self) -> &'static [u8] {
        &REPORT_DESCRIPTOR
    }

    /// Unpack the current report into its named fields
    pub fn decode(&self) -> PackingResult<PackedInputDataReport> {
        PackedInputDataReport::unpack(&self.report)
    }

    /// Returns true if the report changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorProvider for ReportEncoder {
    fn descriptor(&self) -> &[u8] {
        ReportEncoder::descriptor(self)
    }
}

impl ReportSource for ReportEncoder {
    fn current_report(&self) -> Report {
        ReportEncoder::current_report(self)
    }
}

/// Feature and output reports are not supported. Requests are accepted so the
/// transport can complete them, but no data is produced or consumed.
impl ReportSink for ReportEncoder {
    fn on_get_report(&mut self, report_id: u8, report_type: ReportType, _buf: &mut [u8]) -> usize {
        log::trace!("Ignoring GetReport: id: {report_id}, type: {report_type:?}");
        0
    }

    fn on_set_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]) {
        log::trace!(
            "Ignoring SetReport: id: {report_id}, type: {report_type:?}, data: {:?}",
            data
        );
    }
}

/// Split a button mask into the two report bytes, dropping the padding bits
fn split_button_bits(mask: u16) -> (u8, u8) {
    let low = (mask & 0x00ff) as u8;
    let high = ((mask >> 8) as u8) & BUTTONS_HIGH_MASK;
    (low, high)
}

/// Convert the given normalized value between -1.0 - 1.0 to a stick byte.
/// Values are clamped first and the result is truncated toward zero, so 0.0
/// maps to 127 rather than 128. NaN is treated as centered.
pub fn denormalize_stick_value(normal_value: f32) -> u8 {
    let value = if normal_value.is_nan() {
        0.0
    } else {
        normal_value.clamp(STICK_AXIS_MIN, STICK_AXIS_MAX)
    };
    ((value - STICK_AXIS_MIN) * STICK_SCALE) as u8
}
