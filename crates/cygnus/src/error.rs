//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use cygnus_config::ConfigError;
use cygnus_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the discovery backend at {url}")]
    #[diagnostic(
        code(cygnus::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Set the URL with --backend-url, CYGNUS_BACKEND_URL, or `cygnus config init`."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the discovery backend timed out")]
    #[diagnostic(
        code(cygnus::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Backend error (HTTP {status}): {message}")]
    #[diagnostic(code(cygnus::backend))]
    Backend { status: u16, message: String },

    #[error("Backend refused the request: {reason}")]
    #[diagnostic(code(cygnus::rejected))]
    Rejected { reason: String },

    #[error("Device '{identity}' not found")]
    #[diagnostic(
        code(cygnus::not_found),
        help("Run: cygnus devices list -o plain to see known identities")
    )]
    NotFound { identity: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cygnus::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cygnus::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(cygnus::config),
        help("Inspect the resolved settings with: cygnus config show")
    )]
    Config(#[from] ConfigError),

    // ── Everything else ──────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(cygnus::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let reason = err.reason();
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::Backend { status, message } => Self::Backend { status, message },
            CoreError::Rejected { .. } => Self::Rejected { reason },
            CoreError::UnknownView(view) => Self::Validation {
                field: "view".into(),
                reason: format!("unknown view '{view}'"),
            },
            CoreError::MissingIdentity { .. }
            | CoreError::InvalidResponse { .. }
            | CoreError::Config { .. }
            | CoreError::Internal(_) => Self::Internal(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejected_keeps_server_reason() {
        let err = CliError::from(CoreError::Rejected {
            reason: Some("device not found".into()),
        });
        assert_eq!(err.to_string(), "Backend refused the request: device not found");
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }

    #[test]
    fn transport_failures_map_to_connection_codes() {
        let err = CliError::from(CoreError::ConnectionFailed {
            url: "http://10.0.0.1:5000/".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
    }
}
