//! `cygnus rediscover`

use cygnus_core::DeviceSource;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle<S: DeviceSource>(source: &S, global: &GlobalOpts) -> Result<(), CliError> {
    source.rediscover().await?;
    output::print_success(
        "Re-discovery triggered; new devices appear within a few seconds",
        global.color,
        global.quiet,
    );
    Ok(())
}
