//! Helpers shared by command handlers.

use std::io::IsTerminal;

use cygnus_api::RawDevice;
use cygnus_core::{Device, DeviceIdentity, DeviceSource, filter};
use dialoguer::Confirm;

use crate::error::CliError;

/// Fetch the device list, narrowed by `search` when given.
pub async fn fetch<S: DeviceSource>(
    source: &S,
    search: Option<&str>,
) -> Result<Vec<RawDevice>, CliError> {
    let devices = source.fetch_devices().await?;
    Ok(match search {
        Some(term) => filter(&devices, term),
        None => devices,
    })
}

/// Look a device up by identity in a fetched list.
pub fn find(devices: &[RawDevice], identity: &DeviceIdentity) -> Result<Device, CliError> {
    devices
        .iter()
        .find(|raw| raw.identity.as_deref() == Some(identity.as_str()))
        .map(Device::from)
        .ok_or_else(|| CliError::NotFound {
            identity: identity.to_string(),
        })
}

/// Prompt for confirmation, auto-approving with `--yes`. Refuses to
/// block when stdin is not a terminal.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
