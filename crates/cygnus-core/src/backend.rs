// ── Collaborator interfaces ──
//
// The engine reaches the outside world through two narrow traits so hosts
// and tests can swap the HTTP client for anything that answers the same
// questions. `DeviceClient` implements both.

use std::future::Future;

use cygnus_api::{DeviceClient, RawDevice};

use crate::error::{CoreError, check_action};
use crate::model::DeviceIdentity;

/// Source of device snapshots and the re-scan trigger.
pub trait DeviceSource: Send + Sync + 'static {
    /// Full, unfiltered device list.
    fn fetch_devices(&self) -> impl Future<Output = Result<Vec<RawDevice>, CoreError>> + Send;

    /// Ask the discovery service to re-scan the network.
    fn rediscover(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Mutations keyed by device identity.
pub trait DeviceRegistry: Send + Sync + 'static {
    fn update_name(
        &self,
        identity: &DeviceIdentity,
        display_name: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete(&self, identity: &DeviceIdentity) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl DeviceSource for DeviceClient {
    async fn fetch_devices(&self) -> Result<Vec<RawDevice>, CoreError> {
        Ok(self.list_devices().await?)
    }

    async fn rediscover(&self) -> Result<(), CoreError> {
        check_action(self.trigger_rediscovery().await?)
    }
}

impl DeviceRegistry for DeviceClient {
    async fn update_name(
        &self,
        identity: &DeviceIdentity,
        display_name: &str,
    ) -> Result<(), CoreError> {
        check_action(DeviceClient::update_name(self, identity.as_str(), display_name).await?)
    }

    async fn delete(&self, identity: &DeviceIdentity) -> Result<(), CoreError> {
        check_action(self.delete_device(identity.as_str()).await?)
    }
}
