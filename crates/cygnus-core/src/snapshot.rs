// ── Device-set fingerprints ──
//
// A snapshot is the canonical JSON serialization of the full, unfiltered
// device list exactly as the backend sent it. Equality is structural and
// order sensitive: a reordered list or service map yields a different
// snapshot (a spurious re-render, never a missed one).

use cygnus_api::RawDevice;

/// Opaque structural fingerprint of a device set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    /// Fingerprint a device list.
    pub fn of(devices: &[RawDevice]) -> Self {
        // Plain data into a String; the error arm is unreachable in practice.
        Self(serde_json::to_string(devices).unwrap_or_else(|e| format!("<unserializable: {e}>")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
