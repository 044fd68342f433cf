// ── Domain model ──
//
// Normalized device records and the view selector.

mod device;
mod view;

pub use device::{Device, DeviceIdentity, DeviceStatus, PLACEHOLDER_MISSING, PLACEHOLDER_UNKNOWN};
pub use view::View;
