use std::{cell::Cell, rc::Rc};

use crate::{
    drivers::switch_pro::{
        driver::{NEUTRAL_REPORT, REPORT_ID},
        hid_report::{Button, Hat},
        report_descriptor::REPORT_DESCRIPTOR,
    },
    input::target::{switch_pro::SwitchProController, ReportSink, ReportType},
    transport::{
        loopback::{HostRequest, LoopbackTransport},
        HidTransport, TransportError,
    },
};

#[test]
fn test_send_before_begin() {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    assert!(!controller.send(), "should not send before the device is attached");
    assert!(controller.transport().sent_reports().is_empty());
}

#[test]
fn test_begin_attaches_descriptor() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.begin()?;

    assert!(controller.is_attached());
    assert_eq!(controller.transport().attach_count(), 1, "begin should be idempotent");
    assert_eq!(
        controller.transport().descriptor(),
        Some(&REPORT_DESCRIPTOR[..])
    );
    Ok(())
}

#[test]
fn test_end_is_idempotent() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.end();
    assert_eq!(controller.transport().detach_count(), 0);

    controller.begin()?;
    controller.end();
    controller.end();
    assert!(!controller.is_attached());
    assert_eq!(controller.transport().detach_count(), 1);
    assert!(!controller.send(), "should not send after end");
    Ok(())
}

#[test]
fn test_send_current_report() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    assert!(controller.send());

    controller.press(Button::A);
    controller.set_hat(Hat::Right);
    controller.set_left_stick_raw(0, 255);
    assert!(controller.send());

    let sent = controller.transport().sent_reports();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].report_id, REPORT_ID);
    assert_eq!(sent[0].data, NEUTRAL_REPORT);
    assert_eq!(sent[1].data, controller.current_report());
    assert_eq!(sent[1].data, [0x04, 0x00, 0x02, 0, 255, 128, 128, 0]);
    Ok(())
}

#[test]
fn test_send_when_not_ready() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.transport_mut().set_ready(false);
    controller.press(Button::B);

    assert!(!controller.send());
    assert!(controller.transport().sent_reports().is_empty());
    assert!(controller.is_dirty(), "unsent changes should stay pending");

    controller.transport_mut().set_ready(true);
    assert!(controller.send(), "caller should be able to retry");
    assert!(!controller.is_dirty());
    Ok(())
}

#[test]
fn test_send_failure() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.transport_mut().set_fail_sends(true);
    controller.set_hat(Hat::Top);

    assert!(!controller.send(), "should report a failed write");
    assert!(controller.is_dirty());
    Ok(())
}

#[test]
fn test_get_descriptor() {
    let controller = SwitchProController::new(LoopbackTransport::new());

    let mut buf = [0; 128];
    let size = controller.on_get_descriptor(&mut buf);
    assert_eq!(size, REPORT_DESCRIPTOR.len());
    assert_eq!(buf[..size], REPORT_DESCRIPTOR);

    let mut small = [0; 10];
    let size = controller.on_get_descriptor(&mut small);
    assert_eq!(size, 10, "should truncate to the buffer size");
    assert_eq!(small, REPORT_DESCRIPTOR[..10]);
}

#[test]
fn test_host_requests() -> Result<(), TransportError> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.press(Button::X);
    let before = controller.current_report();

    controller.transport_mut().queue_request(HostRequest::GetReport {
        report_id: 0,
        report_type: ReportType::Feature,
    });
    controller.transport_mut().queue_request(HostRequest::SetReport {
        report_id: 0,
        report_type: ReportType::Output,
        data: vec![0xff; 8],
    });
    controller.poll()?;

    assert_eq!(controller.transport().pending_requests(), 0);
    assert_eq!(controller.transport().replies(), [Vec::<u8>::new()]);
    assert_eq!(
        controller.current_report(),
        before,
        "host requests should not change the input state"
    );
    Ok(())
}

#[test]
fn test_get_report_is_unsupported() {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    let mut buf = [0xaa; 8];
    let size = controller.on_get_report(1, ReportType::Input, &mut buf);
    assert_eq!(size, 0);
    assert_eq!(buf, [0xaa; 8], "buffer should be left untouched");
}

/// Transport that records detaches in a shared counter, so the count can be
/// read after the controller is dropped
struct SharedTransport {
    inner: LoopbackTransport,
    detached: Rc<Cell<usize>>,
}

impl HidTransport for SharedTransport {
    fn attach(&mut self, descriptor: &[u8]) -> Result<(), TransportError> {
        self.inner.attach(descriptor)
    }

    fn detach(&mut self) -> Result<(), TransportError> {
        self.detached.set(self.detached.get() + 1);
        self.inner.detach()
    }

    fn ready(&self) -> bool {
        self.inner.ready()
    }

    fn send_report(&mut self, report_id: u8, data: &[u8]) -> Result<(), TransportError> {
        self.inner.send_report(report_id, data)
    }

    fn poll(&mut self, sink: &mut dyn ReportSink) -> Result<(), TransportError> {
        self.inner.poll(sink)
    }
}

#[test]
fn test_drop_detaches() -> Result<(), TransportError> {
    let detached = Rc::new(Cell::new(0));
    let mut controller = SwitchProController::new(SharedTransport {
        inner: LoopbackTransport::new(),
        detached: detached.clone(),
    });
    controller.begin()?;
    drop(controller);
    assert_eq!(detached.get(), 1, "dropping should detach the device");

    let controller = SwitchProController::new(SharedTransport {
        inner: LoopbackTransport::new(),
        detached: detached.clone(),
    });
    drop(controller);
    assert_eq!(detached.get(), 1, "an unattached device should not detach");
    Ok(())
}
