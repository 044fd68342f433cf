// ── Device record model ──
//
// Normalizes raw backend records into the shape the renderers consume.
// Records are never dropped: missing scalars become fixed placeholders.

use std::fmt;

use chrono::{DateTime, Utc};
use cygnus_api::RawDevice;
use indexmap::IndexMap;
use strum::{Display, EnumString};

/// Placeholder for a missing hostname.
pub const PLACEHOLDER_UNKNOWN: &str = "Unknown";
/// Placeholder for every other missing scalar field.
pub const PLACEHOLDER_MISSING: &str = "N/A";

// ── DeviceIdentity ──────────────────────────────────────────────────

/// Stable key assigned by the backend. Never generated or altered here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DeviceIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ── DeviceStatus ────────────────────────────────────────────────────

/// Binary reachability as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl DeviceStatus {
    /// Lenient parse: anything other than `online` counts as offline.
    pub fn from_wire(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

// ── Device ──────────────────────────────────────────────────────────

/// One normalized device.
///
/// Scalar fields always hold displayable text; see [`PLACEHOLDER_UNKNOWN`]
/// and [`PLACEHOLDER_MISSING`].
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub identity: Option<DeviceIdentity>,
    pub hostname: String,
    pub address: String,
    pub port: Option<u16>,
    pub imei: String,
    pub device_id: String,
    pub model: String,
    pub firmware: String,
    pub status: DeviceStatus,
    pub services: IndexMap<String, Option<u16>>,
    pub display_name: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    /// The reported address, if any; service links need a real host.
    link_host: Option<String>,
}

impl Device {
    /// Hostname without its domain suffix (`dev1.local.` -> `dev1`).
    pub fn short_hostname(&self) -> &str {
        let trimmed = self.hostname.trim_end_matches('.');
        match trimmed.split_once('.') {
            Some((head, _)) if !head.is_empty() => head,
            _ => trimmed,
        }
    }

    /// Host used for service links, `None` when the backend sent no address.
    pub fn link_host(&self) -> Option<&str> {
        self.link_host.as_deref()
    }

    /// Current user-assigned name, empty when none is set.
    pub fn display_name_or_empty(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }

    /// Whether edit/delete affordances can be offered for this record.
    pub fn is_addressable(&self) -> bool {
        self.identity.is_some()
    }
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let link_host = present(raw.address.clone());
        Self {
            identity: present(raw.identity).map(DeviceIdentity),
            hostname: present(raw.hostname).unwrap_or_else(|| PLACEHOLDER_UNKNOWN.to_owned()),
            address: or_missing(raw.address),
            port: raw.port,
            imei: or_missing(raw.imei),
            device_id: or_missing(raw.device_id),
            model: or_missing(raw.model),
            firmware: or_missing(raw.firmware),
            status: DeviceStatus::from_wire(raw.status.as_deref()),
            services: raw.services,
            display_name: present(raw.display_name),
            last_seen: raw.last_seen.and_then(epoch_seconds),
            link_host,
        }
    }
}

impl From<&RawDevice> for Device {
    fn from(raw: &RawDevice) -> Self {
        Self::from(raw.clone())
    }
}

/// `None` for absent, empty or whitespace-only strings.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn or_missing(value: Option<String>) -> String {
    present(value).unwrap_or_else(|| PLACEHOLDER_MISSING.to_owned())
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let millis = (secs * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis)
}
