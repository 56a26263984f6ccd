use std::{
    error::Error,
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::{
    config::{path::find_device_config, DeviceConfig},
    input::target::switch_pro::SwitchProController,
    transport::{uhid::UhidTransport, HidTransport},
};

use super::state::StateArgs;

/// Create a uhid backed controller and keep sending the given state until the
/// duration elapses or Ctrl+C is pressed. The controller is released before it
/// is removed so the host does not see stuck inputs.
pub async fn handle_emulate(
    config_path: Option<PathBuf>,
    duration_ms: Option<u64>,
    args: StateArgs,
) -> Result<(), Box<dyn Error>> {
    let config = match config_path.or_else(find_device_config) {
        Some(path) => {
            log::info!("Loading device config: {}", path.display());
            DeviceConfig::from_yaml_file(path)?
        }
        None => DeviceConfig::default(),
    };
    let state = args.into_input_state(config.state.clone())?;
    log::debug!("Emulating with state: {state:?}");

    let mut interval = tokio::time::interval(config.poll_interval());
    let deadline = duration_ms.map(|ms| Instant::now() + Duration::from_millis(ms));

    let mut controller = SwitchProController::new(UhidTransport::new(config.clone()));
    controller.begin()?;
    state.apply(controller.encoder_mut());
    log::info!(
        "Emulating '{}' ({:04x}:{:04x})",
        config.name,
        config.vendor_id,
        config.product_id
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut was_ready = false;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let sent = service(&mut controller);
                if sent != was_ready {
                    if sent {
                        log::info!("Host is receiving reports");
                    } else {
                        log::info!("Host is not receiving reports");
                    }
                    was_ready = sent;
                }
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    log::debug!("Emulation duration elapsed");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                log::info!("Received Ctrl+C");
                break;
            }
        }
    }

    shutdown(&mut controller);
    log::info!("Controller removed");

    Ok(())
}

/// Answer pending host requests and send the current report. Returns true if
/// the report was sent. A failed poll does not stop the controller.
pub fn service<T: HidTransport>(controller: &mut SwitchProController<T>) -> bool {
    if let Err(e) = controller.poll() {
        log::warn!("Failed to service host requests: {e}");
    }
    controller.send()
}

/// Release every input, let the host see it, then remove the controller
pub fn shutdown<T: HidTransport>(controller: &mut SwitchProController<T>) {
    controller.release_all();
    if !controller.send() {
        log::debug!("Unable to send released state");
    }
    controller.end();
}
