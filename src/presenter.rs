//! Grid presenter: projects the live photo view into cells and runs the
//! Browsing/Selecting state machine.
//!
//! The store's listener only enqueues snapshots on a channel. They are applied
//! by [`GridPresenter::sync`], which the host calls from its own loop, so store
//! notifications never mutate presenter state re-entrantly.

use crate::error::Result;
use crate::selection::{EmptySelectionPolicy, SelectionMode, SelectionState};
use crate::store::PhotoStore;
use crate::types::{CellDescriptor, PhotoId, PhotoRecord, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, trace, warn};

/// Scroll direction of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// Knobs covering the gallery screen variants
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub axis: ScrollAxis,
    /// When false, long-press and "enter selection" are ignored
    pub selection_enabled: bool,
    pub show_add_button: bool,
    pub empty_selection: EmptySelectionPolicy,
    pub cell_size: f32,
    pub spacing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            selection_enabled: true,
            show_add_button: true,
            empty_selection: EmptySelectionPolicy::StaySelecting,
            cell_size: 100.0,
            spacing: 10.0,
        }
    }
}

type PhotoChosen = Box<dyn FnMut(&PhotoRecord)>;
type SelectionChanged = Box<dyn FnMut(&[PhotoRecord])>;

pub struct GridPresenter {
    store: PhotoStore,
    config: GridConfig,
    selection: SelectionState,
    changes: UnboundedReceiver<Snapshot>,
    on_photo_chosen: Option<PhotoChosen>,
    on_selection_changed: Option<SelectionChanged>,
}

impl GridPresenter {
    /// Take ownership of `store` and become its listener
    pub fn new(mut store: PhotoStore, config: GridConfig) -> Self {
        let (tx, changes) = unbounded_channel();
        store.attach_listener(move |snapshot| {
            // Receiver lives as long as the presenter, which owns the store
            let _ = tx.send(snapshot);
        });
        Self {
            store,
            config,
            selection: SelectionState::default(),
            changes,
            on_photo_chosen: None,
            on_selection_changed: None,
        }
    }

    pub fn set_on_photo_chosen(&mut self, callback: impl FnMut(&PhotoRecord) + 'static) {
        self.on_photo_chosen = Some(Box::new(callback));
    }

    pub fn set_on_selection_changed(&mut self, callback: impl FnMut(&[PhotoRecord]) + 'static) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        if !config.selection_enabled && self.selection.is_selecting() {
            self.exit_selection_mode();
        }
        self.config = config;
    }

    pub fn store(&self) -> &PhotoStore {
        &self.store
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selected_ids(&self) -> Vec<PhotoId> {
        self.selected_records().into_iter().map(|r| r.id).collect()
    }

    /// Selected records in grid order
    pub fn selected_records(&self) -> Vec<PhotoRecord> {
        self.store
            .snapshot()
            .iter()
            .filter(|r| self.selection.contains(r.id))
            .cloned()
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.store.count()
    }

    pub fn cell_at(&self, index: usize) -> Result<CellDescriptor> {
        let record = self.store.record_at(index)?;
        Ok(CellDescriptor {
            is_selected: self.selection.contains(record.id),
            id: record.id,
            image_bytes: record.image_bytes,
        })
    }

    pub fn on_tap(&mut self, index: usize) -> Result<()> {
        let record = self.store.record_at(index)?;
        match self.selection.mode() {
            SelectionMode::Browsing => {
                debug!(id = %record.id, "Photo chosen");
                if let Some(cb) = self.on_photo_chosen.as_mut() {
                    cb(&record);
                }
            }
            SelectionMode::Selecting => {
                self.selection.toggle(record.id, self.config.empty_selection);
                self.emit_selection_changed();
            }
        }
        Ok(())
    }

    pub fn on_long_press(&mut self, index: usize) -> Result<()> {
        self.enter_selection(index)
    }

    /// Context menu "enter selection"
    pub fn on_context_menu_select(&mut self, index: usize) -> Result<()> {
        self.enter_selection(index)
    }

    /// Context menu "delete". A persistence failure is returned after logging;
    /// the view and selection stay as they were.
    pub fn on_context_menu_delete(&mut self, index: usize) -> Result<()> {
        let record = self.store.record_at(index)?;
        if let Err(e) = self.store.delete(&record) {
            warn!(id = %record.id, error = %e, "Delete from context menu failed");
            return Err(e);
        }
        self.sync();
        Ok(())
    }

    pub fn exit_selection_mode(&mut self) {
        if self.selection.clear() {
            debug!("Selection mode exited");
            self.emit_selection_changed();
        }
    }

    /// Persist a new photo and reconcile
    pub fn add_photo(&mut self, image_bytes: impl Into<Arc<[u8]>>) -> Result<PhotoRecord> {
        let record = self.store.add(image_bytes)?;
        self.sync();
        Ok(record)
    }

    /// Check for commits from other store handles, then apply pending changes
    pub fn refresh(&mut self) -> Result<bool> {
        self.store.poll_external_changes()?;
        Ok(self.sync())
    }

    /// Apply every queued store notification. Returns true if any arrived.
    pub fn sync(&mut self) -> bool {
        let mut any = false;
        while let Ok(snapshot) = self.changes.try_recv() {
            any = true;
            self.on_store_changed(&snapshot);
        }
        any
    }

    /// Reconcile the selection against a new snapshot
    pub fn on_store_changed(&mut self, snapshot: &Snapshot) {
        trace!(count = snapshot.len(), "Store changed");
        if self.selection.retain_live(snapshot, self.config.empty_selection) {
            self.emit_selection_changed();
        }
    }

    fn enter_selection(&mut self, index: usize) -> Result<()> {
        let record = self.store.record_at(index)?;
        if !self.config.selection_enabled {
            trace!(index, "Selection disabled, ignoring");
            return Ok(());
        }
        if self.selection.enter(record.id) {
            self.emit_selection_changed();
        }
        Ok(())
    }

    fn emit_selection_changed(&mut self) {
        let selected = self.selected_records();
        debug!(count = selected.len(), mode = ?self.selection.mode(), "Selection changed");
        if let Some(cb) = self.on_selection_changed.as_mut() {
            cb(&selected);
        }
    }
}
