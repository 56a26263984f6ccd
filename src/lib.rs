//! Emulates a Nintendo Switch compatible wired gamepad as a USB HID device.
//!
//! The [drivers::switch_pro::encoder::ReportEncoder] turns controller state
//! into the 8 byte input report the console expects, and the
//! [input::target::switch_pro::SwitchProController] hands that report to a
//! [transport::HidTransport].
pub mod cli;
pub mod config;
pub mod drivers;
pub mod input;
pub mod transport;
