//! Exposes the emulated controller to the local kernel as a virtual HID device
//! using uhid.
//! https://www.kernel.org/doc/html/latest/hid/uhid.html
use std::{fmt::Debug, fs::File};

use uhid_virt::{Bus, CreateParams, StreamError, UHIDDevice};

use crate::{
    config::DeviceConfig,
    input::target::{ReportSink, ReportType},
};

use super::{frame_report, HidTransport, TransportError};

/// Maximum size of a reply to a GET_REPORT request
const MAX_REPLY_SIZE: usize = 64;

/// The [UhidTransport] creates a uhid device with the configured identity and
/// the controller's report descriptor.
pub struct UhidTransport {
    config: DeviceConfig,
    device: Option<UHIDDevice<File>>,
    started: bool,
    opened: bool,
}

impl UhidTransport {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            device: None,
            started: false,
            opened: false,
        }
    }

    /// Returns true if some process is reading from the device
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Create the virtual device to emulate
    fn create_virtual_device(&self, descriptor: &[u8]) -> Result<UHIDDevice<File>, TransportError> {
        let device = UHIDDevice::create(CreateParams {
            name: self.config.name.clone(),
            phys: String::from(""),
            uniq: String::from(""),
            bus: Bus::USB,
            vendor: self.config.vendor_id as u32,
            product: self.config.product_id as u32,
            version: self.config.version as u32,
            country: 0,
            rd_data: descriptor.to_vec(),
        })
        .map_err(|e| TransportError::Stream(format!("Failed to create uhid device: {e:?}")))?;

        Ok(device)
    }

    /// Handle a GET_REPORT request. The kernel waits for a reply with the
    /// same id, so one is always written, even when no data is produced.
    fn handle_get_report(
        &mut self,
        sink: &mut dyn ReportSink,
        id: u32,
        report_number: u8,
        report_type: ReportType,
    ) -> Result<(), TransportError> {
        let mut buf = [0; MAX_REPLY_SIZE];
        let size = sink.on_get_report(report_number, report_type, &mut buf);
        let Some(data) = buf.get(..size) else {
            return Err(TransportError::InvalidReport(format!(
                "reply of {size} bytes exceeds {MAX_REPLY_SIZE}"
            )));
        };

        let Some(device) = self.device.as_mut() else {
            return Err(TransportError::NotAttached);
        };
        if let Err(e) = device.write_get_report_reply(id, 0, data.to_vec()) {
            log::warn!("Failed to write get report reply: {:?}", e);
            return Err(TransportError::Stream(e.to_string()));
        }

        Ok(())
    }

    fn handle_set_report(
        &mut self,
        sink: &mut dyn ReportSink,
        id: u32,
        report_number: u8,
        report_type: ReportType,
        data: Vec<u8>,
    ) -> Result<(), TransportError> {
        sink.on_set_report(report_number, report_type, &data);

        let Some(device) = self.device.as_mut() else {
            return Err(TransportError::NotAttached);
        };
        if let Err(e) = device.write_set_report_reply(id, 0) {
            log::warn!("Failed to write set report reply: {:?}", e);
            return Err(TransportError::Stream(e.to_string()));
        }

        Ok(())
    }
}

impl HidTransport for UhidTransport {
    fn attach(&mut self, descriptor: &[u8]) -> Result<(), TransportError> {
        if self.device.is_some() {
            log::debug!("uhid device already created");
            return Ok(());
        }
        log::debug!(
            "Creating uhid device '{}' ({:04x}:{:04x})",
            self.config.name,
            self.config.vendor_id,
            self.config.product_id
        );
        let device = self.create_virtual_device(descriptor)?;
        self.device = Some(device);
        self.started = false;
        self.opened = false;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), TransportError> {
        self.started = false;
        self.opened = false;
        let Some(mut device) = self.device.take() else {
            return Err(TransportError::NotAttached);
        };
        log::debug!("Destroying uhid device");
        if let Err(e) = device.destroy() {
            return Err(TransportError::Stream(format!(
                "Failed to destroy uhid device: {e:?}"
            )));
        }
        Ok(())
    }

    fn ready(&self) -> bool {
        self.device.is_some() && self.started
    }

    fn send_report(&mut self, report_id: u8, data: &[u8]) -> Result<(), TransportError> {
        let Some(device) = self.device.as_mut() else {
            return Err(TransportError::NotAttached);
        };
        let frame = frame_report(report_id, data);
        if let Err(e) = device.write(&frame) {
            return Err(TransportError::Stream(format!(
                "Failed to write input data report: {:?}",
                e
            )));
        }
        Ok(())
    }

    /// Read one pending event from the kernel and handle it.
    /// https://www.kernel.org/doc/html/latest/hid/uhid.html#read
    fn poll(&mut self, sink: &mut dyn ReportSink) -> Result<(), TransportError> {
        let Some(device) = self.device.as_mut() else {
            return Err(TransportError::NotAttached);
        };

        let event = match device.read() {
            Ok(event) => event,
            Err(err) => match err {
                // Nothing to read
                StreamError::Io(_e) => return Ok(()),
                StreamError::UnknownEventType(e) => {
                    log::debug!("Unknown event type: {:?}", e);
                    return Ok(());
                }
            },
        };

        match event {
            // Answer to UHID_CREATE. Reports may be sent from now on.
            uhid_virt::OutputEvent::Start { dev_flags: _ } => {
                log::debug!("Start event received");
                self.started = true;
            }
            // Answer to UHID_DESTROY
            uhid_virt::OutputEvent::Stop => {
                log::debug!("Stop event received");
                self.started = false;
            }
            // Some process started reading the device
            uhid_virt::OutputEvent::Open => {
                log::debug!("Open event received");
                self.opened = true;
            }
            uhid_virt::OutputEvent::Close => {
                log::debug!("Close event received");
                self.opened = false;
            }
            // Vendor output field, nothing consumes it
            uhid_virt::OutputEvent::Output { data } => {
                log::trace!("Got output data: {:?}", data);
            }
            uhid_virt::OutputEvent::GetReport {
                id,
                report_number,
                report_type,
            } => {
                log::trace!(
                    "Received GetReport event: id: {id}, num: {report_number}, type: {:?}",
                    report_type
                );
                let report_type = to_report_type(report_type);
                self.handle_get_report(sink, id, report_number, report_type)?;
            }
            uhid_virt::OutputEvent::SetReport {
                id,
                report_number,
                report_type,
                data,
            } => {
                log::debug!(
                    "Received SetReport event: id: {id}, num: {report_number}, type: {:?}, data: {:?}",
                    report_type,
                    data
                );
                let report_type = to_report_type(report_type);
                self.handle_set_report(sink, id, report_number, report_type, data)?;
            }
        }

        Ok(())
    }
}

impl Debug for UhidTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UhidTransport")
            .field("config", &self.config)
            .field("created", &self.device.is_some())
            .field("started", &self.started)
            .field("opened", &self.opened)
            .finish()
    }
}

fn to_report_type(report_type: uhid_virt::ReportType) -> ReportType {
    match report_type {
        uhid_virt::ReportType::Feature => ReportType::Feature,
        uhid_virt::ReportType::Output => ReportType::Output,
        uhid_virt::ReportType::Input => ReportType::Input,
    }
}
