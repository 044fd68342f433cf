// Device endpoints
//
// Listing, renaming, deletion and the manual re-discovery trigger.

use tracing::debug;

use crate::client::DeviceClient;
use crate::error::Error;
use crate::models::{ActionResponse, DeleteRequest, RawDevice, UpdateNameRequest};

impl DeviceClient {
    /// List every device the backend currently knows about.
    ///
    /// `GET /api/devices` -- full snapshot, no pagination.
    pub async fn list_devices(&self) -> Result<Vec<RawDevice>, Error> {
        let url = self.api_url("devices")?;
        self.get_json(url).await
    }

    /// Assign a display name to a device.
    ///
    /// `POST /api/devices/name` with `{"identity": "...", "displayName": "..."}`
    pub async fn update_name(
        &self,
        identity: &str,
        display_name: &str,
    ) -> Result<ActionResponse, Error> {
        let url = self.api_url("devices/name")?;
        debug!(identity, display_name, "updating device name");
        let body = UpdateNameRequest {
            identity,
            display_name,
        };
        self.post_action(url, Some(&body)).await
    }

    /// Forget a device.
    ///
    /// `POST /api/devices/delete` with `{"identity": "..."}`
    pub async fn delete_device(&self, identity: &str) -> Result<ActionResponse, Error> {
        let url = self.api_url("devices/delete")?;
        debug!(identity, "deleting device");
        self.post_action(url, Some(&DeleteRequest { identity })).await
    }

    /// Ask the backend to re-run network discovery.
    ///
    /// `POST /api/discovery/refresh` with no body.
    pub async fn trigger_rediscovery(&self) -> Result<ActionResponse, Error> {
        let url = self.api_url("discovery/refresh")?;
        debug!("triggering re-discovery");
        self.post_action(url, None::<&()>).await
    }
}
