// ── Core error types ──
//
// User-facing errors from cygnus-core. Consumers never see reqwest or
// serde failures directly: the `From<cygnus_api::Error>` impl translates
// transport-layer errors into the two failure families the dashboard
// distinguishes (transport vs. application-reported).

use thiserror::Error;

/// Fallback text when the backend refuses a request without a reason.
pub const GENERIC_FAILURE: &str = "Unknown error";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport failures ───────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    #[error("Backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid backend response: {message}")]
    InvalidResponse { message: String },

    // ── Application-reported failures ────────────────────────────────
    #[error("Request rejected: {}", .reason.as_deref().unwrap_or(GENERIC_FAILURE))]
    Rejected { reason: Option<String> },

    // ── Local failures ───────────────────────────────────────────────
    #[error("Device has no identity; it cannot be {operation}")]
    MissingIdentity { operation: &'static str },

    #[error("Unknown view: {0} (expected \"cards\" or \"table\")")]
    UnknownView(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this failure came from the transport rather than from the
    /// backend refusing the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout
                | Self::Backend { .. }
                | Self::InvalidResponse { .. }
        )
    }

    /// Short reason suitable for an alert line.
    ///
    /// Application-reported failures yield the server's reason verbatim (or
    /// the generic fallback); everything else yields its display text.
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected { reason } => reason
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or(GENERIC_FAILURE)
                .to_owned(),
            other => other.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cygnus_api::Error> for CoreError {
    fn from(err: cygnus_api::Error) -> Self {
        match err {
            cygnus_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if let Some(status) = e.status() {
                    CoreError::Backend {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            cygnus_api::Error::Http { status, message } => CoreError::Backend { status, message },
            cygnus_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
            cygnus_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid backend URL: {e}"),
            },
            cygnus_api::Error::Tls(message) => CoreError::Config { message },
        }
    }
}

/// Turn a `{success, error}` envelope into a result.
pub fn check_action(resp: cygnus_api::ActionResponse) -> Result<(), CoreError> {
    if resp.success {
        Ok(())
    } else {
        Err(CoreError::Rejected { reason: resp.error })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejected_without_reason_uses_generic_fallback() {
        let err = CoreError::Rejected { reason: None };
        assert_eq!(err.reason(), GENERIC_FAILURE);
        assert_eq!(err.to_string(), "Request rejected: Unknown error");
        assert!(!err.is_transport());
    }

    #[test]
    fn rejected_reason_is_passed_through() {
        let err = CoreError::Rejected {
            reason: Some("device not found".into()),
        };
        assert_eq!(err.reason(), "device not found");
    }

    #[test]
    fn http_status_maps_to_backend_error() {
        let err: CoreError = cygnus_api::Error::Http {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(err.is_transport());
        assert!(matches!(err, CoreError::Backend { status: 502, .. }));
    }

    #[test]
    fn action_response_converts_to_result() {
        let ok = check_action(cygnus_api::ActionResponse {
            success: true,
            error: None,
        });
        assert!(ok.is_ok());

        let refused = check_action(cygnus_api::ActionResponse {
            success: false,
            error: Some("locked".into()),
        });
        assert_eq!(refused.unwrap_err().reason(), "locked");
    }
}
