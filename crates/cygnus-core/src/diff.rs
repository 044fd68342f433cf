// ── Diff gate ──
//
// Remembers the last rendered snapshot per view and answers "does this view
// need a re-render?". Each view has its own slot so one view can be forced
// to refresh (e.g. after an edit completes) without touching the other.

use std::collections::HashMap;

use crate::model::View;
use crate::snapshot::Snapshot;

/// Per-view change detector.
#[derive(Debug, Default, Clone)]
pub struct DiffGate {
    last: HashMap<View, Snapshot>,
}

impl DiffGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and remembers `snapshot` iff it differs from what
    /// `view` last rendered.
    pub fn should_render(&mut self, view: View, snapshot: &Snapshot) -> bool {
        if self.last.get(&view) == Some(snapshot) {
            return false;
        }
        self.last.insert(view, snapshot.clone());
        true
    }

    /// Forget the remembered snapshot so the next check renders.
    pub fn invalidate(&mut self, view: View) {
        self.last.remove(&view);
    }

    pub fn invalidate_all(&mut self) {
        self.last.clear();
    }

    pub fn last(&self, view: View) -> Option<&Snapshot> {
        self.last.get(&view)
    }
}
