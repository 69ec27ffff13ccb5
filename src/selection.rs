//! Selection mode and the set of selected photos

use crate::types::{PhotoId, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Taps choose a single photo
    #[default]
    Browsing,
    /// Taps toggle membership in the multi-selection
    Selecting,
}

/// What happens when the last selected photo is deselected or deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Stay in `Selecting` with nothing selected; the host exits explicitly
    #[default]
    StaySelecting,
    /// Drop back to `Browsing`
    ExitToBrowsing,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    mode: SelectionMode,
    selected: HashSet<PhotoId>,
}

impl SelectionState {
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    pub fn contains(&self, id: PhotoId) -> bool {
        self.selected.contains(&id)
    }

    /// Switch to `Selecting` with `id` selected. Returns false if nothing changed.
    pub fn enter(&mut self, id: PhotoId) -> bool {
        let was_selecting = self.is_selecting();
        self.mode = SelectionMode::Selecting;
        self.selected.insert(id) || !was_selecting
    }

    /// Flip membership of `id`. Only meaningful while selecting.
    pub fn toggle(&mut self, id: PhotoId, policy: EmptySelectionPolicy) {
        debug_assert!(self.is_selecting());
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.apply_policy(policy);
    }

    /// Back to `Browsing` with nothing selected. Returns false if already there.
    pub fn clear(&mut self) -> bool {
        let changed = self.is_selecting() || !self.selected.is_empty();
        self.mode = SelectionMode::Browsing;
        self.selected.clear();
        changed
    }

    /// Drop ids missing from `snapshot`. Returns true if any were dropped.
    pub fn retain_live(&mut self, snapshot: &Snapshot, policy: EmptySelectionPolicy) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| snapshot.contains(*id));
        let shrank = self.selected.len() < before;
        if shrank {
            self.apply_policy(policy);
        }
        shrank
    }

    fn apply_policy(&mut self, policy: EmptySelectionPolicy) {
        if self.selected.is_empty() && policy == EmptySelectionPolicy::ExitToBrowsing {
            self.mode = SelectionMode::Browsing;
        }
    }
}
