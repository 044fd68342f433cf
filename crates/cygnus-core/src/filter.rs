// ── Filter engine ──
//
// Client-side search over the device cache. Pure: the cache and the diff
// gate never see filtered data.

use cygnus_api::RawDevice;

/// Keep the devices whose hostname or address contains `term`,
/// case-insensitively. A blank term keeps everything.
pub fn filter(devices: &[RawDevice], term: &str) -> Vec<RawDevice> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return devices.to_vec();
    }
    devices
        .iter()
        .filter(|device| matches(device, &needle))
        .cloned()
        .collect()
}

/// Whether a single device matches an already-lowercased, trimmed needle.
fn matches(device: &RawDevice, needle: &str) -> bool {
    [device.hostname.as_deref(), device.address.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
