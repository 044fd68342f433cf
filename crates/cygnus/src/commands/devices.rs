//! Device command handlers.

use cygnus_core::render::ordered_services;
use cygnus_core::render::services::NO_SERVICES;
use cygnus_core::{Device, DeviceIdentity, DeviceRegistry, DeviceSource};
use tabled::Tabled;

use crate::cli::{ColorMode, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP Address")]
    address: String,
    #[tabled(rename = "IMEI")]
    imei: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Services")]
    services: String,
    #[tabled(rename = "Identity")]
    identity: String,
}

impl DeviceRow {
    fn new(device: &Device, admin: &str, color: ColorMode) -> Self {
        Self {
            status: output::status_label(device.status.is_online(), color),
            name: device.display_name.clone().unwrap_or_else(|| "-".into()),
            hostname: device.hostname.clone(),
            address: device.address.clone(),
            imei: device.imei.clone(),
            model: device.model.clone(),
            services: services_summary(device, admin),
            identity: device
                .identity
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
        }
    }
}

/// Service labels in display order, admin first.
fn services_summary(device: &Device, admin: &str) -> String {
    let labels: Vec<&str> = ordered_services(&device.services, admin)
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    if labels.is_empty() {
        NO_SERVICES.to_owned()
    } else {
        labels.join(", ")
    }
}

/// Identity for scripting; devices without one fall back to hostname.
fn plain_id(device: &Device) -> String {
    device
        .identity
        .as_ref()
        .map_or_else(|| device.hostname.clone(), ToString::to_string)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<B>(
    backend: &B,
    args: DevicesArgs,
    admin_service: &str,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    B: DeviceSource + DeviceRegistry,
{
    match args.command {
        DevicesCommand::List { search } => {
            let raw = util::fetch(backend, search.as_deref()).await?;
            tracing::debug!(count = raw.len(), "fetched devices");

            // JSON keeps the wire shape; table and plain use the display model.
            let out = output::render_list(
                global.output,
                &raw,
                |r| DeviceRow::new(&Device::from(r), admin_service, global.color),
                |r| plain_id(&Device::from(r)),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Rename { identity, name } => {
            let identity = DeviceIdentity::new(identity);
            let name = name.trim();
            DeviceRegistry::update_name(backend, &identity, name).await?;

            let message = if name.is_empty() {
                format!("Cleared the display name of {identity}")
            } else {
                format!("Renamed {identity} to '{name}'")
            };
            output::print_success(&message, global.color, global.quiet);
            Ok(())
        }

        DevicesCommand::Delete { identity } => {
            let identity = DeviceIdentity::new(identity);
            let devices = util::fetch(backend, None).await?;
            let device = util::find(&devices, &identity)?;

            let prompt = format!(
                "Are you sure you want to delete {}?",
                device.short_hostname()
            );
            if !util::confirm("devices delete", &prompt, global.yes)? {
                output::print_success("Nothing deleted", global.color, global.quiet);
                return Ok(());
            }

            DeviceRegistry::delete(backend, &identity).await?;
            output::print_success(
                &format!("Deleted {}", device.short_hostname()),
                global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}
