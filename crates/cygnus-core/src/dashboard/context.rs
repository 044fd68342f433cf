// ── Reconcile context ──
//
// Everything the reconcile pass remembers between ticks. Owned by one
// `Dashboard`; reset on restart.

use chrono::{DateTime, Local};
use cygnus_api::RawDevice;

use crate::diff::DiffGate;
use crate::edit::EditController;
use crate::filter::filter;
use crate::model::{Device, DeviceIdentity};

#[derive(Debug, Default)]
pub(crate) struct ReconcileContext {
    pub gate: DiffGate,
    /// Last successful, unfiltered fetch.
    pub cache: Vec<RawDevice>,
    pub search: String,
    pub edits: EditController,
    pub last_updated: Option<DateTime<Local>>,
    /// Whether any fetch has been applied yet.
    pub loaded: bool,
    issued: u64,
    applied: u64,
}

impl ReconcileContext {
    /// Stamp a new fetch.
    pub fn next_generation(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Accept a fetch result unless a newer one was already applied.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        true
    }

    /// Cached devices that pass the current search, normalized.
    pub fn visible(&self) -> Vec<Device> {
        filter(&self.cache, &self.search)
            .into_iter()
            .map(Device::from)
            .collect()
    }

    pub fn find(&self, identity: &DeviceIdentity) -> Option<&RawDevice> {
        self.cache
            .iter()
            .find(|d| d.identity.as_deref() == Some(identity.as_str()))
    }

    pub fn find_mut(&mut self, identity: &DeviceIdentity) -> Option<&mut RawDevice> {
        self.cache
            .iter_mut()
            .find(|d| d.identity.as_deref() == Some(identity.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn older_generations_are_rejected() {
        let mut ctx = ReconcileContext::default();
        let first = ctx.next_generation();
        let second = ctx.next_generation();

        assert!(ctx.accept(second));
        assert!(!ctx.accept(first));
        assert!(!ctx.accept(second));
        assert!(ctx.accept(ctx.issued + 1));
    }

    #[test]
    fn visible_applies_search() {
        let mut ctx = ReconcileContext::default();
        ctx.cache = vec![
            RawDevice {
                address: Some("10.0.0.5".into()),
                ..RawDevice::default()
            },
            RawDevice {
                address: Some("192.168.1.1".into()),
                ..RawDevice::default()
            },
        ];
        ctx.search = "192".into();
        let visible = ctx.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].address, "192.168.1.1");
    }
}
