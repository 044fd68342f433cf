// cygnus-core: view-reconciliation engine between cygnus-api and the hosts (CLI/TUI).

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod diff;
pub mod dom;
pub mod edit;
pub mod error;
pub mod filter;
pub mod model;
pub mod render;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{DeviceRegistry, DeviceSource};
pub use config::DashboardConfig;
pub use dashboard::{Alert, Dashboard, RefreshControl};
pub use diff::DiffGate;
pub use dom::{Container, Document, Element, Node};
pub use edit::{EditController, RowState};
pub use error::CoreError;
pub use filter::filter;
pub use model::{Device, DeviceIdentity, DeviceStatus, View};
pub use snapshot::Snapshot;
