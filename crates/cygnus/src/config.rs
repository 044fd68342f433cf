//! Config resolution: file + environment from `cygnus-config`, then flags.

use std::path::PathBuf;

use cygnus_api::DeviceClient;
use cygnus_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file this invocation reads and writes.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(cygnus_config::config_path)
}

/// Load the file + environment layers and apply flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = cygnus_config::load_config_from(&config_path(global))?;

    if let Some(url) = &global.backend_url {
        config.backend_url.clone_from(url);
    }
    if global.insecure {
        config.defaults.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        if timeout == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        config.defaults.timeout = timeout;
    }
    Ok(config)
}

/// Resolved config plus a client for its backend.
pub fn client(global: &GlobalOpts) -> Result<(Config, DeviceClient), CliError> {
    let config = resolve(global)?;
    let client = config.client()?;
    tracing::debug!(backend = %client.base_url(), "using backend");
    Ok((config, client))
}
