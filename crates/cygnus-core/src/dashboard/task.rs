// ── Background work ──
//
// Requests and timers run as spawned futures; each resolves to exactly one
// `Completion` that the dashboard applies between awaits.

use std::sync::Arc;
use std::time::Duration;

use cygnus_api::RawDevice;
use tokio::task::{Id, JoinSet};

use crate::backend::{DeviceRegistry, DeviceSource};
use crate::error::CoreError;
use crate::model::DeviceIdentity;

#[derive(Debug)]
pub(crate) enum Completion {
    Fetched {
        generation: u64,
        result: Result<Vec<RawDevice>, CoreError>,
    },
    Renamed {
        identity: DeviceIdentity,
        result: Result<(), CoreError>,
    },
    Deleted {
        identity: DeviceIdentity,
        result: Result<(), CoreError>,
    },
    Rediscovered(Result<(), CoreError>),
    GraceElapsed,
    CooldownElapsed,
}

/// What a task holds while it runs, released if it dies without a
/// completion.
#[derive(Debug)]
pub(crate) enum Owner {
    Rename(DeviceIdentity),
    Rediscover,
}

pub(crate) fn spawn_fetch<B: DeviceSource>(
    tasks: &mut JoinSet<Completion>,
    backend: &Arc<B>,
    generation: u64,
) {
    let backend = Arc::clone(backend);
    tasks.spawn(async move {
        Completion::Fetched {
            generation,
            result: backend.fetch_devices().await,
        }
    });
}

pub(crate) fn spawn_rename<B: DeviceRegistry>(
    tasks: &mut JoinSet<Completion>,
    backend: &Arc<B>,
    identity: DeviceIdentity,
    name: String,
) -> Id {
    let backend = Arc::clone(backend);
    tasks
        .spawn(async move {
            let result = backend.update_name(&identity, &name).await;
            Completion::Renamed { identity, result }
        })
        .id()
}

pub(crate) fn spawn_delete<B: DeviceRegistry>(
    tasks: &mut JoinSet<Completion>,
    backend: &Arc<B>,
    identity: DeviceIdentity,
) {
    let backend = Arc::clone(backend);
    tasks.spawn(async move {
        let result = backend.delete(&identity).await;
        Completion::Deleted { identity, result }
    });
}

pub(crate) fn spawn_rediscover<B: DeviceSource>(
    tasks: &mut JoinSet<Completion>,
    backend: &Arc<B>,
) -> Id {
    let backend = Arc::clone(backend);
    tasks
        .spawn(async move { Completion::Rediscovered(backend.rediscover().await) })
        .id()
}

pub(crate) fn spawn_timer(tasks: &mut JoinSet<Completion>, after: Duration, fire: Completion) {
    tasks.spawn(async move {
        tokio::time::sleep(after).await;
        fire
    });
}
