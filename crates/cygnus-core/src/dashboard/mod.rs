// ── Dashboard ──
//
// Owns the document and the reconcile context, and drives the poll loop.
// Single logical thread: hosts call `step()` in their own event loop and
// mutate the dashboard only through `&mut self` between awaits. Network
// requests and timers run in a `JoinSet` and report back as completions.

mod context;
mod task;

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use cygnus_api::RawDevice;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::backend::{DeviceRegistry, DeviceSource};
use crate::config::DashboardConfig;
use crate::dom::{ClickTarget, Container, Document, RowAction};
use crate::edit::{EditController, RowState, SaveOutcome};
use crate::error::CoreError;
use crate::model::{Device, DeviceIdentity, View};
use crate::render::{
    render_cards, render_device_count, render_refresh_info, render_row, render_table,
};
use crate::snapshot::Snapshot;

use self::context::ReconcileContext;
use self::task::{Completion, Owner};

/// Floor for the poll period; `tokio::time::interval` rejects zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ── RefreshControl ──────────────────────────────────────────────────

/// State of the manual "refresh now" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshControl {
    #[default]
    Enabled,
    /// Re-scan request in flight.
    Requesting,
    /// Re-scan accepted; waiting out the cool-down.
    CoolingDown,
}

impl RefreshControl {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

// ── Alert ───────────────────────────────────────────────────────────

/// A user-visible failure the host must surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ── Dashboard ───────────────────────────────────────────────────────

/// The view-reconciliation engine.
pub struct Dashboard<B> {
    backend: Arc<B>,
    config: DashboardConfig,
    ctx: ReconcileContext,
    document: Document,
    view: View,
    refresh: RefreshControl,
    pending_delete: Option<DeviceIdentity>,
    alerts: VecDeque<Alert>,
    tasks: JoinSet<Completion>,
    /// Rename and re-discovery tasks still running.
    owners: HashMap<Id, Owner>,
    ticker: Interval,
}

impl<B> Dashboard<B>
where
    B: DeviceSource + DeviceRegistry,
{
    /// Create a dashboard. Must be called from within a Tokio runtime.
    ///
    /// Nothing is fetched until the first [`step`](Self::step), whose tick
    /// fires immediately.
    pub fn new(backend: B, config: DashboardConfig) -> Self {
        Self::with_shared(Arc::new(backend), config)
    }

    /// Like [`new`](Self::new) for a backend the caller also holds.
    pub fn with_shared(backend: Arc<B>, config: DashboardConfig) -> Self {
        let mut ticker = tokio::time::interval(config.poll_interval.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            backend,
            config,
            ctx: ReconcileContext::default(),
            document: Document::new(),
            view: View::default(),
            refresh: RefreshControl::default(),
            pending_delete: None,
            alerts: VecDeque::new(),
            tasks: JoinSet::new(),
            owners: HashMap::new(),
            ticker,
        }
    }

    // ── Event loop ───────────────────────────────────────────────────

    /// Wait for the next poll tick or background completion and apply it.
    ///
    /// Cancel safe: hosts may race this against their own input.
    pub async fn step(&mut self) {
        tokio::select! {
            _ = self.ticker.tick() => self.refresh(),
            Some(joined) = self.tasks.join_next_with_id(), if !self.tasks.is_empty() => match joined {
                Ok((id, completion)) => {
                    self.owners.remove(&id);
                    self.apply(completion);
                }
                Err(e) => self.recover(&e),
            },
        }
    }

    /// Start a fetch-and-reconcile now, outside the regular tick.
    pub fn refresh(&mut self) {
        let generation = self.ctx.next_generation();
        debug!(generation, "polling devices");
        task::spawn_fetch(&mut self.tasks, &self.backend, generation);
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched { generation, result } => match result {
                Ok(devices) => {
                    if self.ctx.accept(generation) {
                        self.reconcile(devices);
                    } else {
                        debug!(generation, "discarding stale device list");
                    }
                }
                Err(e) => warn!(generation, error = %e, "device poll failed; keeping previous render"),
            },
            Completion::Renamed { identity, result } => self.finish_rename(&identity, result),
            Completion::Deleted { identity, result } => match result {
                Ok(()) => {
                    info!(%identity, "device deleted");
                    self.ctx.edits.forget(&identity);
                    self.refresh();
                }
                Err(e) => self.alert(format!("Failed to delete device: {}", e.reason())),
            },
            Completion::Rediscovered(result) => match result {
                Ok(()) => {
                    info!("re-discovery started");
                    self.refresh = RefreshControl::CoolingDown;
                    task::spawn_timer(
                        &mut self.tasks,
                        self.config.rediscover_grace,
                        Completion::GraceElapsed,
                    );
                    task::spawn_timer(
                        &mut self.tasks,
                        self.config.rediscover_cooldown,
                        Completion::CooldownElapsed,
                    );
                }
                Err(e) => {
                    self.refresh = RefreshControl::Enabled;
                    self.alert(format!("Failed to trigger re-discovery: {}", e.reason()));
                }
            },
            Completion::GraceElapsed => self.refresh(),
            Completion::CooldownElapsed => self.refresh = RefreshControl::Enabled,
        }
    }

    /// A background task panicked or was aborted. Release whatever that
    /// task held; other in-flight requests are left alone.
    fn recover(&mut self, err: &JoinError) {
        error!(error = %err, "background task failed");
        match self.owners.remove(&err.id()) {
            Some(Owner::Rename(identity)) => {
                self.ctx
                    .edits
                    .complete(&identity, Err(CoreError::Internal(err.to_string())));
                self.patch_row(&identity);
            }
            Some(Owner::Rediscover) => {
                if self.refresh == RefreshControl::Requesting {
                    self.refresh = RefreshControl::Enabled;
                }
            }
            None => {}
        }
        self.alert(format!("Background request failed: {err}"));
    }

    // ── Reconcile ────────────────────────────────────────────────────

    fn reconcile(&mut self, devices: Vec<RawDevice>) {
        let snapshot = Snapshot::of(&devices);
        debug!(count = devices.len(), "applying device list");
        let dropped = self.ctx.edits.retain(|identity| {
            devices
                .iter()
                .any(|d| d.identity.as_deref() == Some(identity.as_str()))
        });
        if dropped > 0 {
            debug!(dropped, "closed edits for devices that left the list");
        }
        self.ctx.cache = devices;
        self.ctx.loaded = true;
        self.render_views(&snapshot);

        let now = Local::now();
        self.ctx.last_updated = Some(now);
        self.document
            .replace_children(Container::RefreshInfo, render_refresh_info(&now));
    }

    /// Re-render each view whose gate reports a change.
    fn render_views(&mut self, snapshot: &Snapshot) {
        let cards = self.ctx.gate.should_render(View::Cards, snapshot);
        let table = self.ctx.gate.should_render(View::Table, snapshot);
        if !cards && !table {
            return;
        }

        let visible = self.ctx.visible();
        let admin = self.config.admin_service.as_str();
        if cards {
            self.document
                .replace_children(Container::CardGrid, render_cards(&visible, admin));
            self.document.replace_children(
                Container::DeviceCount,
                render_device_count(self.ctx.cache.len()),
            );
        }
        if table {
            self.document.replace_children(
                Container::TableBody,
                render_table(&visible, admin, &self.ctx.edits),
            );
        }
    }

    /// Rebuild one table row from the cache in its current edit state.
    fn patch_row(&mut self, identity: &DeviceIdentity) {
        let Some(raw) = self.ctx.find(identity) else {
            return;
        };
        let row = render_row(
            &Device::from(raw),
            &self.config.admin_service,
            self.ctx.edits.state(identity),
        );
        self.document.replace_row(identity, row);
    }

    // ── Search & view ────────────────────────────────────────────────

    /// Change the search term and re-render both views from the cache.
    pub fn set_search(&mut self, term: &str) {
        if self.ctx.search == term {
            return;
        }
        term.clone_into(&mut self.ctx.search);
        self.ctx.gate.invalidate_all();
        if self.ctx.loaded {
            let snapshot = Snapshot::of(&self.ctx.cache);
            self.render_views(&snapshot);
        }
    }

    pub fn search(&self) -> &str {
        &self.ctx.search
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Switch views by selector string (`"cards"`, `"table"`).
    pub fn switch_view(&mut self, selector: &str) -> Result<View, CoreError> {
        let view = selector
            .parse::<View>()
            .map_err(|_| CoreError::UnknownView(selector.to_owned()))?;
        self.view = view;
        Ok(view)
    }

    // ── Delegated clicks ─────────────────────────────────────────────

    /// Single entry point for clicks inside a container. `path` is the
    /// child-index chain to the clicked node.
    pub fn click(&mut self, container: Container, path: &[usize]) -> Option<ClickTarget> {
        let target = self.document.dispatch_click(container, path)?;
        match target.action {
            RowAction::Edit => {
                self.begin_edit(&target.identity);
            }
            RowAction::Save => {
                self.submit_edit(&target.identity);
            }
            RowAction::Delete => {
                self.request_delete(&target.identity);
            }
        }
        Some(target)
    }

    // ── Inline edit ──────────────────────────────────────────────────

    /// Open the name input for a row, pre-filled with its display name.
    pub fn begin_edit(&mut self, identity: &DeviceIdentity) -> bool {
        let Some(raw) = self.ctx.find(identity) else {
            return false;
        };
        let current = raw.display_name.clone().unwrap_or_default();
        if !self.ctx.edits.begin_edit(identity, &current) {
            return false;
        }
        self.patch_row(identity);
        true
    }

    /// Replace the text in an open name input.
    pub fn input(&mut self, identity: &DeviceIdentity, text: &str) -> bool {
        if !self.ctx.edits.input(identity, text) {
            return false;
        }
        self.patch_row(identity);
        true
    }

    /// Save an open name input (the save button or Enter).
    pub fn submit_edit(&mut self, identity: &DeviceIdentity) -> bool {
        let Some(name) = self.ctx.edits.submit(identity) else {
            return false;
        };
        debug!(%identity, name = %name, "saving display name");
        self.patch_row(identity);
        let id = task::spawn_rename(&mut self.tasks, &self.backend, identity.clone(), name);
        self.owners.insert(id, Owner::Rename(identity.clone()));
        true
    }

    /// Close an open name input without saving.
    pub fn cancel_edit(&mut self, identity: &DeviceIdentity) -> bool {
        if self.ctx.edits.cancel(identity).is_none() {
            return false;
        }
        self.patch_row(identity);
        true
    }

    fn finish_rename(&mut self, identity: &DeviceIdentity, result: Result<(), CoreError>) {
        match self.ctx.edits.complete(identity, result) {
            SaveOutcome::Committed { name } => {
                info!(%identity, name = %name, "display name saved");
                if let Some(raw) = self.ctx.find_mut(identity) {
                    raw.display_name = Some(name).filter(|n| !n.is_empty());
                }
                self.patch_row(identity);
                self.refresh();
            }
            SaveOutcome::Reverted { reason, .. } => {
                self.patch_row(identity);
                self.alert(format!("Failed to update name: {reason}"));
            }
            SaveOutcome::Ignored => debug!(%identity, "ignoring rename completion for idle row"),
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Ask for confirmation before deleting. Returns `false` for unknown
    /// identities.
    pub fn request_delete(&mut self, identity: &DeviceIdentity) -> bool {
        if self.ctx.find(identity).is_none() {
            return false;
        }
        self.pending_delete = Some(identity.clone());
        true
    }

    pub fn pending_delete(&self) -> Option<&DeviceIdentity> {
        self.pending_delete.as_ref()
    }

    /// Confirmation text for the pending delete.
    pub fn delete_prompt(&self) -> Option<String> {
        let identity = self.pending_delete.as_ref()?;
        let label = self.ctx.find(identity).map_or_else(
            || identity.to_string(),
            |raw| Device::from(raw).short_hostname().to_owned(),
        );
        Some(format!("Are you sure you want to delete {label}?"))
    }

    /// Answer the confirmation prompt. Returns `true` if a delete was sent.
    pub fn confirm_delete(&mut self, confirmed: bool) -> bool {
        let Some(identity) = self.pending_delete.take() else {
            return false;
        };
        if !confirmed {
            debug!(%identity, "delete cancelled");
            return false;
        }
        debug!(%identity, "deleting device");
        task::spawn_delete(&mut self.tasks, &self.backend, identity);
        true
    }

    // ── Manual re-discovery ──────────────────────────────────────────

    /// Press the "refresh now" control. Ignored while it is disabled.
    pub fn refresh_now(&mut self) -> bool {
        if !self.refresh.is_enabled() {
            return false;
        }
        self.refresh = RefreshControl::Requesting;
        let id = task::spawn_rediscover(&mut self.tasks, &self.backend);
        self.owners.insert(id, Owner::Rediscover);
        true
    }

    pub fn refresh_control(&self) -> RefreshControl {
        self.refresh
    }

    // ── Alerts ───────────────────────────────────────────────────────

    fn alert(&mut self, message: String) {
        warn!(%message, "alert");
        self.alerts.push_back(Alert { message });
    }

    /// Drain alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        self.alerts.drain(..).collect()
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Last successful fetch, unfiltered.
    pub fn devices(&self) -> &[RawDevice] {
        &self.ctx.cache
    }

    /// Cached devices passing the current search.
    pub fn visible_devices(&self) -> Vec<Device> {
        self.ctx.visible()
    }

    pub fn edits(&self) -> &EditController {
        &self.ctx.edits
    }

    pub fn row_state(&self, identity: &DeviceIdentity) -> &RowState {
        self.ctx.edits.state(identity)
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.ctx.last_updated
    }

    /// Snapshot the given view last rendered.
    pub fn rendered_snapshot(&self, view: View) -> Option<&Snapshot> {
        self.ctx.gate.last(view)
    }

    /// Background requests and timers still outstanding.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}
