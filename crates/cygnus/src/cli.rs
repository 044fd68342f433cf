//! Clap derive structures for the `cygnus` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cygnus_core::View;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cygnus -- inspect and manage discovered Cygnus IoT devices
#[derive(Debug, Parser)]
#[command(
    name = "cygnus",
    version,
    about = "Inspect and manage Cygnus IoT devices from the command line",
    long_about = "Talks to the Cygnus discovery backend: list the devices it has\n\
        found on the local network, rename or forget them, trigger a re-scan,\n\
        or render the dashboard views to HTML.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Discovery backend URL (overrides config)
    #[arg(long, short = 'u', env = "CYGNUS_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// One identity per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Color if stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, rename and delete discovered devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Ask the backend to re-scan the network
    Rediscover,

    /// Render a dashboard view to HTML on stdout
    Render(RenderArgs),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, optionally filtered by hostname or IP
    #[command(alias = "ls")]
    List {
        /// Case-insensitive substring of hostname or IP address
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Set a device's display name
    Rename {
        /// Device identity (see `devices list -o plain`)
        identity: String,

        /// New display name (trimmed; empty clears it)
        name: String,
    },

    /// Forget a device
    #[command(alias = "rm")]
    Delete {
        /// Device identity (see `devices list -o plain`)
        identity: String,
    },
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// View to render: cards or table
    #[arg(value_parser = parse_view)]
    pub view: View,

    /// Case-insensitive substring of hostname or IP address
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

fn parse_view(value: &str) -> Result<View, String> {
    value
        .parse()
        .map_err(|_| format!("unknown view '{value}' (expected cards or table)"))
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn view_argument_is_case_insensitive() {
        assert_eq!(parse_view("TABLE"), Ok(View::Table));
        assert!(parse_view("grid").is_err());
    }
}
