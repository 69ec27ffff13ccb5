//! Context menu for grid cells

use super::App;
use crate::theme;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhotoMenuAction {
    EnterSelection,
    Delete,
}

impl App {
    pub(crate) fn photo_context_menu(&self, ui: &mut egui::Ui, is_selected: bool) -> Option<PhotoMenuAction> {
        ui.spacing_mut().item_spacing.y = 2.0;
        let mut action = None;

        if self.presenter.config().selection_enabled && !is_selected {
            if theme::menu_item(
                ui,
                egui_phosphor::regular::CHECK_CIRCLE,
                "Select",
                theme::TEXT_SECONDARY,
            ) {
                action = Some(PhotoMenuAction::EnterSelection);
                ui.close_menu();
            }
            ui.separator();
        }
        if theme::menu_item(ui, egui_phosphor::regular::TRASH, "Delete", theme::STATUS_ERROR) {
            action = Some(PhotoMenuAction::Delete);
            ui.close_menu();
        }

        action
    }
}
