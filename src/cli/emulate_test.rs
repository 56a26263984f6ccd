use std::error::Error;

use crate::{
    cli::emulate::{service, shutdown},
    drivers::switch_pro::{
        driver::NEUTRAL_REPORT,
        hid_report::{Button, Hat},
    },
    input::target::switch_pro::SwitchProController,
    transport::loopback::LoopbackTransport,
};

#[test]
fn test_service_survives_failed_poll() -> Result<(), Box<dyn Error>> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.press(Button::A);
    controller.transport_mut().set_fail_polls(true);

    assert!(
        service(&mut controller),
        "a failed poll should not keep the report from being sent"
    );
    assert!(service(&mut controller));
    assert_eq!(controller.transport().sent_reports().len(), 2);
    Ok(())
}

#[test]
fn test_shutdown_after_failed_poll() -> Result<(), Box<dyn Error>> {
    let mut controller = SwitchProController::new(LoopbackTransport::new());
    controller.begin()?;
    controller.press(Button::ZL | Button::ZR);
    controller.set_hat(Hat::Left);
    controller.transport_mut().set_fail_polls(true);
    service(&mut controller);

    shutdown(&mut controller);

    let last = controller
        .transport()
        .last_report()
        .expect("should send the released state");
    assert_eq!(last.data, NEUTRAL_REPORT, "inputs should be released before removal");
    assert!(!controller.is_attached());
    assert_eq!(controller.transport().detach_count(), 1);
    Ok(())
}
