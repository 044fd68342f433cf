// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding.
// Endpoint methods live in `devices.rs` as inherent methods so this module
// stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ActionResponse;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the discovery backend.
///
/// Cheap to clone: `reqwest::Client` is internally reference counted.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://192.168.1.20:5000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{path}`, tolerating a trailing slash on the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        decode(&body)
    }

    /// Send a POST request (optionally with a JSON body) and decode the
    /// `{success, error}` envelope.
    ///
    /// The backend reports refusals as `success: false`, sometimes with a
    /// 4xx/5xx status. Any body that decodes as an [`ActionResponse`] is
    /// returned as-is regardless of status; only undecodable failures
    /// become [`Error::Http`].
    pub(crate) async fn post_action(
        &self,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<ActionResponse, Error> {
        debug!("POST {}", url);

        let builder = self.http.post(url);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        trace!(status = status.as_u16(), body = preview(&text), "action response");

        match serde_json::from_str::<ActionResponse>(&text) {
            Ok(action) => Ok(action),
            Err(_) if !status.is_success() => Err(Error::Http {
                status: status.as_u16(),
                message: preview(&text).to_owned(),
            }),
            Err(e) => Err(Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&text)),
                body: text,
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}

/// First `BODY_PREVIEW_LEN` bytes of `body`, cut on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let client = DeviceClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://10.0.0.2:5000/").unwrap(),
        );
        assert_eq!(
            client.api_url("devices").unwrap().as_str(),
            "http://10.0.0.2:5000/api/devices"
        );
    }

    #[test]
    fn api_url_keeps_base_path_prefix() {
        let client = DeviceClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://gateway.lan/cygnus").unwrap(),
        );
        assert_eq!(
            client.api_url("devices/name").unwrap().as_str(),
            "http://gateway.lan/cygnus/api/devices/name"
        );
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= BODY_PREVIEW_LEN);
        assert!(body.starts_with(cut));
    }
}
