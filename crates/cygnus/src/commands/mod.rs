//! Command dispatch: CLI args -> backend calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod rediscover;
pub mod render;
pub mod util;

use cygnus_api::DeviceClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &DeviceClient,
    admin_service: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(client, args, admin_service, global).await,
        Command::Rediscover => rediscover::handle(client, global).await,
        Command::Render(args) => render::handle(client, args, admin_service, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command routed to the backend dispatcher".into(),
        )),
    }
}
