//! App module - contains the main application state and logic

mod context_menu;
mod imports;
mod thumbnails;
mod views;

use crate::constants::TOAST_SECONDS;
use crate::error::GalleryError;
use crate::presenter::GridPresenter;
use crate::settings::Settings;
use crate::swatch;
use crate::theme;
use crate::types::{PhotoId, PhotoRecord};
use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub use imports::ImportQueue;
pub(crate) use context_menu::PhotoMenuAction;
use imports::IMAGE_EXTENSIONS;
use thumbnails::ThumbnailCache;

/// Outbound presenter events, queued by its callbacks and handled once per frame
#[derive(Debug, Clone)]
pub(crate) enum GridEvent {
    PhotoChosen(PhotoRecord),
    SelectionChanged(Vec<PhotoId>),
}

/// Input on a single cell, applied after the grid has been drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellAction {
    Tap(usize),
    LongPress(usize),
    Menu(usize, PhotoMenuAction),
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) presenter: GridPresenter,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) thumbnails: ThumbnailCache,
    pub(crate) imports: ImportQueue,
    pub(crate) events: Rc<RefCell<Vec<GridEvent>>>,
    pub(crate) selected_count: usize,
    // Single photo opened by a tap while browsing
    pub(crate) viewer_photo: Option<PhotoRecord>,
    // Cell whose current press already fired a long-press
    pub(crate) long_press_fired: Option<PhotoId>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<Instant>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut presenter: GridPresenter,
        imports: ImportQueue,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        presenter.set_on_photo_chosen(move |record| {
            sink.borrow_mut().push(GridEvent::PhotoChosen(record.clone()));
        });
        let sink = events.clone();
        presenter.set_on_selection_changed(move |records| {
            let ids = records.iter().map(|r| r.id).collect();
            sink.borrow_mut().push(GridEvent::SelectionChanged(ids));
        });

        Self {
            presenter,
            settings,
            data_dir,
            thumbnails: ThumbnailCache::default(),
            imports,
            events,
            selected_count: 0,
            viewer_photo: None,
            long_press_fired: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
        }
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(Instant::now());
    }

    pub(crate) fn toast_expired(&self) -> bool {
        self.toast_start
            .map_or(true, |t| t.elapsed().as_secs_f32() >= TOAST_SECONDS)
    }

    fn report(&mut self, what: &str, e: &GalleryError) {
        error!(error = %e, "{} failed", what);
        self.show_toast(format!("{} failed: {}", what, e));
    }

    // ========================================================================
    // Store / background polling
    // ========================================================================

    /// Pull in external store changes and finished imports. Runs once per frame.
    pub(crate) fn poll_background(&mut self) {
        match self.presenter.refresh() {
            Ok(true) => self.thumbnails.retain_live(&self.presenter.store().snapshot()),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Failed to check for store changes"),
        }

        for outcome in self.imports.drain() {
            match outcome.result {
                Ok(bytes) => {
                    if let Err(e) = self.presenter.add_photo(bytes) {
                        self.report("Saving imported photo", &e);
                    } else {
                        info!(path = %outcome.path.display(), "Photo imported");
                    }
                }
                Err(e) => {
                    let name = outcome
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    self.report(&format!("Importing {}", name), &e);
                }
            }
        }
    }

    /// Handle events queued by presenter callbacks
    pub(crate) fn handle_grid_events(&mut self) {
        let events: Vec<GridEvent> = self.events.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                GridEvent::PhotoChosen(record) => {
                    debug!(id = %record.id, "Opening photo");
                    self.viewer_photo = Some(record);
                }
                GridEvent::SelectionChanged(ids) => {
                    self.selected_count = ids.len();
                }
            }
        }
        // The viewer must not outlive its photo
        if let Some(photo) = &self.viewer_photo {
            if !self.presenter.store().snapshot().contains(photo.id) {
                self.viewer_photo = None;
            }
        }
    }

    // ========================================================================
    // User actions
    // ========================================================================

    pub(crate) fn add_swatch(&mut self) {
        let result = swatch::random_swatch(self.settings.swatch_size, self.settings.jpeg_quality)
            .and_then(|bytes| self.presenter.add_photo(bytes));
        match result {
            Ok(record) => debug!(id = %record.id, "Swatch added"),
            Err(e) => self.report("Adding photo", &e),
        }
    }

    pub(crate) fn pick_files(&mut self, ctx: &egui::Context) {
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Add photos")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        else {
            return;
        };
        for path in paths {
            self.imports.request(ctx, path, self.settings.jpeg_quality);
        }
    }

    pub(crate) fn apply_cell_action(&mut self, action: CellAction) {
        let result = match action {
            CellAction::Tap(index) => self.presenter.on_tap(index),
            CellAction::LongPress(index) => self.presenter.on_long_press(index),
            CellAction::Menu(index, PhotoMenuAction::EnterSelection) => {
                self.presenter.on_context_menu_select(index)
            }
            CellAction::Menu(index, PhotoMenuAction::Delete) => {
                let result = self.presenter.on_context_menu_delete(index);
                self.thumbnails.retain_live(&self.presenter.store().snapshot());
                result
            }
        };
        match result {
            Ok(()) => {}
            Err(e) if e.is_persistence() => self.report("Deleting photo", &e),
            // The grid only hands out indices it just drew
            Err(e) => error!(error = %e, ?action, "Cell action on stale index"),
        }
    }

    pub(crate) fn exit_selection(&mut self) {
        self.presenter.exit_selection_mode();
    }

    pub(crate) fn toggle_axis(&mut self) {
        use crate::presenter::ScrollAxis;
        self.settings.scroll_axis = match self.settings.scroll_axis {
            ScrollAxis::Vertical => ScrollAxis::Horizontal,
            ScrollAxis::Horizontal => ScrollAxis::Vertical,
        };
        self.presenter.set_config(self.settings.grid_config());
    }
}
