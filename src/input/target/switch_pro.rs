//! Emulates a Switch compatible wired pad as a target input device.
use std::{
    fmt::Debug,
    ops::{Deref, DerefMut},
};

use crate::{
    drivers::switch_pro::{
        driver::REPORT_ID,
        encoder::{Report, ReportEncoder},
    },
    transport::{HidTransport, TransportError},
};

use super::{DescriptorProvider, ReportSink, ReportSource, ReportType};

/// The [SwitchProController] binds a [ReportEncoder] to a [HidTransport]. The
/// encoder holds the controller state; the transport carries the descriptor
/// and the input reports to the host.
///
/// The encoder's mutators are reachable directly on the controller:
///
/// ```
/// use switchpad::drivers::switch_pro::hid_report::{Button, Hat};
/// use switchpad::input::target::switch_pro::SwitchProController;
/// use switchpad::transport::loopback::LoopbackTransport;
///
/// let mut controller = SwitchProController::new(LoopbackTransport::new());
/// controller.begin().unwrap();
/// controller.press(Button::A);
/// controller.set_hat(Hat::Right);
/// assert!(controller.send());
/// ```
pub struct SwitchProController<T: HidTransport> {
    encoder: ReportEncoder,
    transport: T,
    attached: bool,
}

impl<T: HidTransport> SwitchProController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            encoder: ReportEncoder::new(),
            transport,
            attached: false,
        }
    }

    /// Register the controller with the transport so the host can enumerate it
    pub fn begin(&mut self) -> Result<(), TransportError> {
        if self.attached {
            return Ok(());
        }
        log::debug!("Attaching controller");
        self.transport.attach(self.encoder.descriptor())?;
        self.attached = true;
        Ok(())
    }

    /// Remove the controller from the transport. Does nothing if the
    /// controller was never attached.
    pub fn end(&mut self) {
        if !self.attached {
            return;
        }
        log::debug!("Detaching controller");
        if let Err(e) = self.transport.detach() {
            log::warn!("Failed to detach controller: {e}");
        }
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Send the current report to the host. Returns false if the transport is
    /// not ready or the write failed; retrying is left to the caller.
    pub fn send(&mut self) -> bool {
        if !self.transport.ready() {
            log::trace!("Transport not ready, report not sent");
            return false;
        }
        let report = self.encoder.current_report();
        log::trace!("Sending report: {:02x?}", report);
        if let Err(e) = self.transport.send_report(REPORT_ID, &report) {
            log::warn!("Failed to send report: {e}");
            return false;
        }
        self.encoder.take_dirty();
        true
    }

    /// Let the transport service pending requests from the host
    pub fn poll(&mut self) -> Result<(), TransportError> {
        self.transport.poll(&mut self.encoder)
    }

    /// Copy the report descriptor into `buf`. Returns the number of bytes
    /// written, which is less than the descriptor size if `buf` is too small.
    pub fn on_get_descriptor(&self, buf: &mut [u8]) -> usize {
        let descriptor = self.encoder.descriptor();
        let size = descriptor.len().min(buf.len());
        buf[..size].copy_from_slice(&descriptor[..size]);
        size
    }

    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut ReportEncoder {
        &mut self.encoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: HidTransport> Deref for SwitchProController<T> {
    type Target = ReportEncoder;

    fn deref(&self) -> &Self::Target {
        &self.encoder
    }
}

impl<T: HidTransport> DerefMut for SwitchProController<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.encoder
    }
}

impl<T: HidTransport> DescriptorProvider for SwitchProController<T> {
    fn descriptor(&self) -> &[u8] {
        self.encoder.descriptor()
    }
}

impl<T: HidTransport> ReportSource for SwitchProController<T> {
    fn current_report(&self) -> Report {
        self.encoder.current_report()
    }
}

impl<T: HidTransport> ReportSink for SwitchProController<T> {
    fn on_get_report(&mut self, report_id: u8, report_type: ReportType, buf: &mut [u8]) -> usize {
        self.encoder.on_get_report(report_id, report_type, buf)
    }

    fn on_set_report(&mut self, report_id: u8, report_type: ReportType, data: &[u8]) {
        self.encoder.on_set_report(report_id, report_type, data)
    }
}

impl<T: HidTransport> Drop for SwitchProController<T> {
    fn drop(&mut self) {
        self.end();
    }
}

impl<T: HidTransport> Debug for SwitchProController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchProController")
            .field("report", &self.encoder.current_report())
            .field("attached", &self.attached)
            .finish()
    }
}
