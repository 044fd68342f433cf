// cygnus-api: Async Rust client for the Cygnus discovery backend
//
// The backend owns discovery (mDNS browsing) and name persistence. This crate
// only speaks its four HTTP endpoints and exposes the raw wire shapes; the
// normalization into domain types happens in `cygnus-core`.

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DeviceClient;
pub use error::Error;
pub use models::{ActionResponse, RawDevice};
pub use transport::{TlsMode, TransportConfig};
