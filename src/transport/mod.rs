use std::io;

use thiserror::Error;

use crate::input::target::ReportSink;

pub mod loopback;
pub mod uhid;

/// Possible errors raised by a [HidTransport]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Device is not attached")]
    NotAttached,
    #[error("Could not access device: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to communicate with device: {0}")]
    Stream(String),
    #[error("Invalid report: {0}")]
    InvalidReport(String),
}

/// A [HidTransport] is the USB/HID stack that exposes the emulated controller
/// to the host. It enumerates the device with the report descriptor, tells
/// whether the host is ready to receive input reports and carries the
/// reports across.
pub trait HidTransport {
    /// Register the device with the host using the given report descriptor
    fn attach(&mut self, descriptor: &[u8]) -> Result<(), TransportError>;

    /// Remove the device from the host
    fn detach(&mut self) -> Result<(), TransportError>;

    /// Returns true if an input report can be sent right now
    fn ready(&self) -> bool;

    /// Send the given input report. A report id of 0 means the report is
    /// sent without a report id prefix.
    fn send_report(&mut self, report_id: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Service pending requests from the host, delegating report requests to
    /// the given sink.
    fn poll(&mut self, sink: &mut dyn ReportSink) -> Result<(), TransportError>;
}

/// Build the bytes to write for a report, prefixing the report id if one is used
pub(crate) fn frame_report(report_id: u8, data: &[u8]) -> Vec<u8> {
    if report_id == 0 {
        return data.to_vec();
    }
    let mut frame = Vec::with_capacity(data.len() + 1);
    frame.push(report_id);
    frame.extend_from_slice(data);
    frame
}
