// Backend wire types
//
// The discovery backend emits whatever its mDNS TXT records carried, so every
// scalar is optional. Devices are decoded leniently, one record at a time: a
// mistyped field becomes `None` instead of failing the whole list. Unknown
// fields are preserved in `extra` so the full record takes part in change
// detection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Device ───────────────────────────────────────────────────────────

/// One device as returned by `GET /api/devices`.
///
/// `services` keeps the backend's key order: render order follows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawDevice {
    /// Stable key assigned by the backend (the mDNS service instance name).
    #[serde(rename = "name")]
    pub identity: Option<String>,
    pub hostname: Option<String>,
    #[serde(rename = "ip")]
    pub address: Option<String>,
    pub port: Option<u16>,
    pub imei: Option<String>,
    pub device_id: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "fw")]
    pub firmware: Option<String>,
    /// `"online"` or `"offline"`.
    pub status: Option<String>,
    /// Service label -> optional port. `null` means the bare address.
    pub services: IndexMap<String, Option<u16>>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    /// Unix timestamp (seconds, fractional) of the last mDNS announcement.
    pub last_seen: Option<f64>,
    /// Catch-all for fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawDevice {
    /// Decode one record. Never fails: anything that is not an object
    /// yields an empty device.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        Self {
            identity: take_first(&mut fields, &["name", "identity", "id"], as_text),
            hostname: take_first(&mut fields, &["hostname"], as_text),
            address: take_first(&mut fields, &["ip", "address"], as_text),
            port: take_first(&mut fields, &["port"], as_port),
            imei: take_first(&mut fields, &["imei"], as_text),
            device_id: take_first(&mut fields, &["device_id"], as_text),
            model: take_first(&mut fields, &["model"], as_text),
            firmware: take_first(&mut fields, &["fw", "firmware"], as_text),
            status: take_first(&mut fields, &["status"], as_text),
            services: fields
                .remove("services")
                .map(as_services)
                .unwrap_or_default(),
            display_name: take_first(&mut fields, &["displayName", "display_name"], as_text),
            last_seen: take_first(&mut fields, &["last_seen"], Value::as_f64),
            extra: fields,
        }
    }
}

impl From<Value> for RawDevice {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Remove `keys` in order until one converts. Keys after the winner stay
/// in the map.
fn take_first<T>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .find_map(|key| fields.remove(*key).and_then(|value| convert(&value)))
}

/// Strings as-is; numbers and booleans in their JSON spelling.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A non-object becomes an empty map; an unusable port becomes `None`.
fn as_services(value: Value) -> IndexMap<String, Option<u16>> {
    match value {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(label, port)| (label, as_port(&port)))
            .collect(),
        _ => IndexMap::new(),
    }
}

// ── Actions ──────────────────────────────────────────────────────────

/// Envelope returned by every mutating endpoint.
///
/// ```json
/// { "success": false, "error": "device not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/devices/name`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateNameRequest<'a> {
    pub identity: &'a str,
    #[serde(rename = "displayName")]
    pub display_name: &'a str,
}

/// Body of `POST /api/devices/delete`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub identity: &'a str,
}
