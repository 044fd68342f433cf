// ── Runtime dashboard configuration ──
//
// Describes *how* the engine paces itself. Never touches disk: the CLI/TUI
// load `cygnus-config` and hand a `DashboardConfig` in.

use std::time::Duration;

/// Service label that is always rendered first.
pub const DEFAULT_ADMIN_SERVICE: &str = "Cygnus Admin";

/// Timing and labelling knobs for a [`Dashboard`](crate::Dashboard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Fixed period between fetch-and-reconcile ticks.
    pub poll_interval: Duration,
    /// Wait between a successful re-scan request and the follow-up fetch.
    pub rediscover_grace: Duration,
    /// How long the manual refresh control stays disabled after a
    /// successful re-scan request.
    pub rediscover_cooldown: Duration,
    /// Service label promoted to the front of every service list.
    pub admin_service: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            rediscover_grace: Duration::from_secs(2),
            rediscover_cooldown: Duration::from_secs(5),
            admin_service: DEFAULT_ADMIN_SERVICE.to_owned(),
        }
    }
}
