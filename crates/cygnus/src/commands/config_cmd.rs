//! Config subcommand handlers. None of these contact the backend.

use dialoguer::{Confirm, Input};

use cygnus_config::{Config, save_config_to};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let out = output::render_single(
                global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |c| c.backend_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), false);
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);
    eprintln!("Cygnus CLI configuration");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = config::resolve(global).unwrap_or_default();

    cfg.backend_url = Input::new()
        .with_prompt("Discovery backend URL")
        .default(cfg.backend_url.clone())
        .interact_text()
        .map_err(prompt_err)?;
    cfg.backend_url()?;

    cfg.dashboard.poll_interval_secs = Input::new()
        .with_prompt("Poll interval (seconds)")
        .default(cfg.dashboard.poll_interval_secs)
        .validate_with(|v: &u64| if *v == 0 { Err("must be at least 1") } else { Ok(()) })
        .interact_text()
        .map_err(prompt_err)?;

    if cfg.backend_url.starts_with("https://") {
        cfg.defaults.insecure = Confirm::new()
            .with_prompt("Accept self-signed certificates?")
            .default(cfg.defaults.insecure)
            .interact()
            .map_err(prompt_err)?;
    }

    cfg.dashboard_config()?;
    save(&cfg, &path)?;
    output::print_success(
        &format!("Wrote {}", path.display()),
        global.color,
        global.quiet,
    );
    Ok(())
}

fn save(cfg: &Config, path: &std::path::Path) -> Result<(), CliError> {
    save_config_to(cfg, path)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
