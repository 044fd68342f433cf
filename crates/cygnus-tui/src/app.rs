//! Application core: event loop, input modes, key dispatch.
//!
//! The dashboard owns every piece of device state. The app only tracks
//! which input mode is active and which row is selected, and turns key
//! presses into the same delegated clicks and input events a pointer
//! would produce on the rendered document.

use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use cygnus_core::dom::{Container, Element, RowAction};
use cygnus_core::{
    Alert, Dashboard, DeviceIdentity, DeviceRegistry, DeviceSource, RowState, View,
};

use crate::event::{Event, EventReader};
use crate::screens;
use crate::tui::Tui;

/// ~30 FPS.
const RENDER_RATE: Duration = Duration::from_millis(33);

/// Where key presses go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the search bar.
    Search,
    /// Typing into a row's name input.
    Editing(DeviceIdentity),
    Help,
}

pub struct App<B> {
    dashboard: Dashboard<B>,
    mode: Mode,
    running: bool,
    /// Index into the rendered device rows.
    selected: usize,
    /// Unacknowledged failures, oldest first.
    alerts: VecDeque<Alert>,
}

impl<B> App<B>
where
    B: DeviceSource + DeviceRegistry,
{
    pub fn new(dashboard: Dashboard<B>) -> Self {
        Self {
            dashboard,
            mode: Mode::default(),
            running: true,
            selected: 0,
            alerts: VecDeque::new(),
        }
    }

    /// Drive input, redraws and the dashboard until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let mut events = EventReader::new(RENDER_RATE);

        info!("TUI event loop started");

        while self.running {
            tokio::select! {
                event = events.next() => match event {
                    Some(Event::Key(key)) => self.handle_key(key),
                    Some(Event::Render) => {
                        let app = &*self;
                        tui.draw(|frame| screens::render(frame, app))?;
                    }
                    None => break,
                },
                () = self.dashboard.step() => self.absorb(),
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Pick up what the last dashboard step changed.
    fn absorb(&mut self) {
        self.alerts.extend(self.dashboard.take_alerts());

        let edit_closed = matches!(
            &self.mode,
            Mode::Editing(identity) if !self.dashboard.row_state(identity).is_active()
        );
        if edit_closed {
            self.mode = Mode::Normal;
        }
        self.clamp_selection();
    }

    // ── Key dispatch ─────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        // Modal layers first: alerts, then the delete confirmation.
        if self.alerts.pop_front().is_some() {
            return;
        }
        if self.dashboard.pending_delete().is_some() {
            self.answer_delete(key);
            return;
        }

        match self.mode.clone() {
            Mode::Normal => self.normal_key(key),
            Mode::Search => self.search_key(key),
            Mode::Editing(identity) => self.edit_key(&identity, key),
            Mode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                    self.mode = Mode::Normal;
                }
            }
        }
    }

    fn normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.mode = Mode::Help,
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Char('1') => self.dashboard.set_view(View::Cards),
            KeyCode::Char('2') => self.dashboard.set_view(View::Table),
            KeyCode::Tab | KeyCode::BackTab => {
                let next = match self.dashboard.view() {
                    View::Cards => View::Table,
                    View::Table => View::Cards,
                };
                self.dashboard.set_view(next);
            }
            KeyCode::Char('r') => {
                if !self.dashboard.refresh_now() {
                    debug!(state = ?self.dashboard.refresh_control(), "refresh control busy");
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.select(self.selected.saturating_add(1)),
            KeyCode::Char('k') | KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Char('g') | KeyCode::Home => self.select(0),
            KeyCode::Char('G') | KeyCode::End => self.select(usize::MAX),
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(identity) = self.selected_identity() {
                    self.press(RowAction::Delete, &identity);
                }
            }
            _ => {}
        }
    }

    fn search_key(&mut self, key: KeyEvent) {
        let mut term = self.dashboard.search().to_owned();
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                return;
            }
            KeyCode::Esc => {
                term.clear();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) => term.push(c),
            _ => return,
        }
        self.dashboard.set_search(&term);
        self.selected = 0;
    }

    fn edit_key(&mut self, identity: &DeviceIdentity, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.dashboard.cancel_edit(identity);
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                self.press(RowAction::Save, identity);
            }
            KeyCode::Backspace => {
                if let Some(mut draft) = self.draft(identity) {
                    draft.pop();
                    self.dashboard.input(identity, &draft);
                }
            }
            KeyCode::Char(c) => {
                if let Some(mut draft) = self.draft(identity) {
                    draft.push(c);
                    self.dashboard.input(identity, &draft);
                }
            }
            _ => {}
        }
    }

    fn answer_delete(&mut self, key: KeyEvent) {
        let confirmed = match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => true,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
            _ => return,
        };
        self.dashboard.confirm_delete(confirmed);
    }

    // ── Row actions ──────────────────────────────────────────────────

    fn start_edit(&mut self) {
        if self.dashboard.view() != View::Table {
            return;
        }
        let Some(identity) = self.selected_identity() else {
            return;
        };
        if self.press(RowAction::Edit, &identity) || self.dashboard.edits().is_active(&identity) {
            self.mode = Mode::Editing(identity);
        }
    }

    /// Click the `action` button of the row tagged `identity`.
    fn press(&mut self, action: RowAction, identity: &DeviceIdentity) -> bool {
        let action = action.to_string();
        let path = self.dashboard.document().path_to(Container::TableBody, &|el: &Element| {
            el.attr_value("data-action") == Some(action.as_str())
                && el.attr_value("data-identity") == Some(identity.as_str())
        });
        let Some(path) = path else {
            debug!(%identity, action = %action, "no such control on screen");
            return false;
        };
        self.dashboard.click(Container::TableBody, &path).is_some()
    }

    /// Current text of an open name input.
    fn draft(&self, identity: &DeviceIdentity) -> Option<String> {
        match self.dashboard.row_state(identity) {
            RowState::Editing { draft, .. } => Some(draft.clone()),
            _ => None,
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    fn device_rows(&self) -> impl Iterator<Item = &Element> {
        self.dashboard
            .document()
            .rows()
            .filter(|row| row.has_class("device-row"))
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.device_rows().count();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn selected_identity(&self) -> Option<DeviceIdentity> {
        self.device_rows()
            .nth(self.selected)
            .and_then(|row| row.attr_value("data-identity"))
            .map(DeviceIdentity::from)
    }

    // ── Read access for drawing ──────────────────────────────────────

    pub fn dashboard(&self) -> &Dashboard<B> {
        &self.dashboard
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Oldest unacknowledged alert.
    pub fn alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use cygnus_api::RawDevice;
    use cygnus_core::{CoreError, DashboardConfig};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Stub {
        devices: Mutex<Vec<RawDevice>>,
        renames: Mutex<Vec<(String, String)>>,
        deletes: Mutex<Vec<String>>,
    }

    impl DeviceSource for Stub {
        async fn fetch_devices(&self) -> Result<Vec<RawDevice>, CoreError> {
            Ok(self.devices.lock().unwrap().clone())
        }

        async fn rediscover(&self) -> Result<(), CoreError> {
            Ok(())
        }
    }

    impl DeviceRegistry for Stub {
        async fn update_name(
            &self,
            identity: &DeviceIdentity,
            display_name: &str,
        ) -> Result<(), CoreError> {
            self.renames
                .lock()
                .unwrap()
                .push((identity.to_string(), display_name.to_owned()));
            Ok(())
        }

        async fn delete(&self, identity: &DeviceIdentity) -> Result<(), CoreError> {
            self.deletes.lock().unwrap().push(identity.to_string());
            Err(CoreError::Rejected {
                reason: Some("device busy".into()),
            })
        }
    }

    fn device(identity: &str, hostname: &str, name: Option<&str>) -> RawDevice {
        RawDevice {
            identity: Some(identity.into()),
            hostname: Some(hostname.into()),
            address: Some("10.0.0.5".into()),
            display_name: name.map(Into::into),
            status: Some("online".into()),
            ..RawDevice::default()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<Stub>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// App over a stub, after the first poll has landed.
    async fn loaded() -> (App<Stub>, Arc<Stub>) {
        let stub = Arc::new(Stub {
            devices: Mutex::new(vec![
                device("a", "lab-sensor.local", Some("Lab")),
                device("b", "garage.local", None),
            ]),
            ..Stub::default()
        });
        let dashboard = Dashboard::with_shared(Arc::clone(&stub), DashboardConfig::default());
        let mut app = App::new(dashboard);
        app.dashboard.step().await; // first tick spawns the fetch
        app.dashboard.step().await; // fetch result applied
        app.absorb();
        (app, stub)
    }

    /// Apply one background completion.
    async fn settle(app: &mut App<Stub>) {
        app.dashboard.step().await;
        app.absorb();
    }

    #[tokio::test(start_paused = true)]
    async fn view_keys_switch_views() {
        let (mut app, _) = loaded().await;
        assert_eq!(app.dashboard.view(), View::Cards);

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.dashboard.view(), View::Table);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.dashboard.view(), View::Cards);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.dashboard.view(), View::Cards);
    }

    #[tokio::test(start_paused = true)]
    async fn selection_is_clamped_to_rows() {
        let (mut app, _) = loaded().await;
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected(), 1);
        assert_eq!(app.selected_identity(), Some(DeviceIdentity::from("b")));

        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.selected(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn search_filters_as_you_type_and_esc_clears() {
        let (mut app, _) = loaded().await;
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.mode(), &Mode::Search);

        type_text(&mut app, "GARAGE");
        assert_eq!(app.dashboard.search(), "GARAGE");
        assert_eq!(app.device_rows().count(), 1);

        // 'q' is text here, not quit.
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.dashboard.search(), "GARAGEq");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.dashboard.search(), "GARAGE");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.dashboard.search(), "");
        assert_eq!(app.device_rows().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_only_opens_in_table_view() {
        let (mut app, _) = loaded().await;
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode(), &Mode::Normal);

        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode(), &Mode::Editing(DeviceIdentity::from("a")));
        assert_eq!(app.draft(&DeviceIdentity::from("a")).as_deref(), Some("Lab"));
    }

    #[tokio::test(start_paused = true)]
    async fn enter_saves_and_returns_to_normal() {
        let (mut app, stub) = loaded().await;
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, " 2q");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));

        let id = DeviceIdentity::from("a");
        assert!(matches!(app.dashboard.row_state(&id), RowState::Saving { .. }));
        // Keys are ignored while the save is in flight.
        type_text(&mut app, "zz");

        settle(&mut app).await;
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(
            stub.renames.lock().unwrap().clone(),
            vec![("a".to_owned(), "Lab 2".to_owned())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn edit_mode_ends_when_the_device_disappears() {
        let (mut app, stub) = loaded().await;
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.mode(), &Mode::Editing(DeviceIdentity::from("a")));

        stub.devices
            .lock()
            .unwrap()
            .retain(|d| d.identity.as_deref() != Some("a"));
        app.dashboard.refresh();
        settle(&mut app).await;

        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.dashboard.row_state(&DeviceIdentity::from("a")), &RowState::Display);
        assert_eq!(app.selected_identity(), Some(DeviceIdentity::from("b")));
    }

    #[tokio::test(start_paused = true)]
    async fn esc_cancels_edit() {
        let (mut app, stub) = loaded().await;
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "junk");
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.dashboard.row_state(&DeviceIdentity::from("a")), &RowState::Display);
        assert!(stub.renames.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_asks_first_and_surfaces_failure() {
        let (mut app, stub) = loaded().await;
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(
            app.dashboard.delete_prompt().as_deref(),
            Some("Are you sure you want to delete lab-sensor?")
        );

        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.dashboard.pending_delete().is_none());
        assert_eq!(app.dashboard.in_flight(), 0);

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        settle(&mut app).await;

        assert_eq!(stub.deletes.lock().unwrap().clone(), vec!["a".to_owned()]);
        assert_eq!(
            app.alert().map(ToString::to_string).as_deref(),
            Some("Failed to delete device: device busy")
        );

        // Any key acknowledges the alert without acting.
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.alert().is_none());
        assert!(app.running);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_key_disables_control() {
        let (mut app, _) = loaded().await;
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.dashboard.refresh_control(), cygnus_core::RefreshControl::Requesting);
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.dashboard.in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn help_and_quit() {
        let (mut app, _) = loaded().await;
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.mode(), &Mode::Help);
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.mode(), &Mode::Normal);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);
    }
}
