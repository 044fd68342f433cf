// ── Inline edit controller ──
//
// Per-row state machine for renaming a device:
//
//   Display --begin_edit--> Editing --submit--> Saving --ok--> Display
//                              ^  |                |
//                              |  +--cancel--> Display
//                              +------ failure ----+
//
// Rows are independent. Nothing here performs I/O; the dashboard sends the
// request and feeds the outcome back through `complete`.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::DeviceIdentity;

static DISPLAY: RowState = RowState::Display;

/// Edit state of one table row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Display,
    /// Input open. `original` is restored on cancel.
    Editing { draft: String, original: String },
    /// Request in flight; the save control is disabled.
    Saving { submitted: String, original: String },
}

impl RowState {
    /// Shared `Display` state for rows the controller does not track.
    pub fn display() -> &'static RowState {
        &DISPLAY
    }

    /// `Editing` or `Saving`.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Display)
    }
}

/// How a save round trip ended.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Backend confirmed; the row shows `name` again in display mode.
    Committed { name: String },
    /// Backend refused or the request failed; the row is back in editing
    /// mode with `attempted` still in the field.
    Reverted { attempted: String, reason: String },
    /// The row was not saving (e.g. a duplicate completion).
    Ignored,
}

/// Tracks every row that is not in display mode.
#[derive(Debug, Default, Clone)]
pub struct EditController {
    rows: HashMap<DeviceIdentity, RowState>,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, identity: &DeviceIdentity) -> &RowState {
        self.rows.get(identity).unwrap_or(&DISPLAY)
    }

    /// Identities currently editing or saving.
    pub fn active(&self) -> impl Iterator<Item = &DeviceIdentity> {
        self.rows.keys()
    }

    pub fn is_active(&self, identity: &DeviceIdentity) -> bool {
        self.rows.contains_key(identity)
    }

    /// `Display -> Editing`, pre-filling the field with `current_name`.
    ///
    /// Returns `false` if the row is already editing or saving.
    pub fn begin_edit(&mut self, identity: &DeviceIdentity, current_name: &str) -> bool {
        if self.is_active(identity) {
            return false;
        }
        self.rows.insert(
            identity.clone(),
            RowState::Editing {
                draft: current_name.to_owned(),
                original: current_name.to_owned(),
            },
        );
        true
    }

    /// Replace the draft text of an editing row.
    pub fn input(&mut self, identity: &DeviceIdentity, text: &str) -> bool {
        match self.rows.get_mut(identity) {
            Some(RowState::Editing { draft, .. }) => {
                text.clone_into(draft);
                true
            }
            _ => false,
        }
    }

    /// `Editing -> Saving`. Returns the trimmed value to send.
    pub fn submit(&mut self, identity: &DeviceIdentity) -> Option<String> {
        let state = self.rows.get_mut(identity)?;
        let RowState::Editing { draft, original } = state else {
            return None;
        };
        let submitted = draft.trim().to_owned();
        *state = RowState::Saving {
            submitted: submitted.clone(),
            original: std::mem::take(original),
        };
        Some(submitted)
    }

    /// `Editing -> Display`, discarding the draft. Returns the original name.
    pub fn cancel(&mut self, identity: &DeviceIdentity) -> Option<String> {
        if !matches!(self.rows.get(identity), Some(RowState::Editing { .. })) {
            return None;
        }
        match self.rows.remove(identity) {
            Some(RowState::Editing { original, .. }) => Some(original),
            _ => None,
        }
    }

    /// Feed the save result back. `Saving -> Display` on success,
    /// `Saving -> Editing` on any failure.
    pub fn complete(
        &mut self,
        identity: &DeviceIdentity,
        result: Result<(), CoreError>,
    ) -> SaveOutcome {
        if !matches!(self.rows.get(identity), Some(RowState::Saving { .. })) {
            return SaveOutcome::Ignored;
        }
        let Some(RowState::Saving {
            submitted,
            original,
        }) = self.rows.remove(identity)
        else {
            return SaveOutcome::Ignored;
        };

        match result {
            Ok(()) => SaveOutcome::Committed { name: submitted },
            Err(e) => {
                self.rows.insert(
                    identity.clone(),
                    RowState::Editing {
                        draft: submitted.clone(),
                        original,
                    },
                );
                SaveOutcome::Reverted {
                    attempted: submitted,
                    reason: e.reason(),
                }
            }
        }
    }

    /// Stop tracking a row (e.g. its device was deleted).
    pub fn forget(&mut self, identity: &DeviceIdentity) {
        self.rows.remove(identity);
    }

    /// Keep only rows for which `keep` holds; the rest drop back to
    /// display. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&DeviceIdentity) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|identity, _| keep(identity));
        before - self.rows.len()
    }
}
