//! View rendering (toolbar, photo grid, viewer, toast)

use super::thumbnails::fill_uv;
use super::{App, CellAction, PhotoMenuAction};
use crate::presenter::ScrollAxis;
use crate::selection::SelectionMode;
use crate::theme;
use crate::ui::components::{paint_selected, photo_count_label};
use crate::utils::format_bytes;
use eframe::egui;
use std::time::Duration;

impl App {
    pub(crate) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar")
            .exact_height(theme::TOOLBAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(theme::SPACING_LG as i8, 0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new("Photos").size(18.0).color(theme::TEXT_PRIMARY));
                    ui.add_space(theme::SPACING_MD);

                    let status = match self.presenter.mode() {
                        SelectionMode::Browsing => photo_count_label(self.presenter.cell_count()),
                        SelectionMode::Selecting => format!("{} selected", self.selected_count),
                    };
                    ui.label(egui::RichText::new(status).color(theme::TEXT_DIM));

                    if self.imports.pending() > 0 {
                        ui.spinner();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.presenter.mode() == SelectionMode::Selecting
                            && ui.add(theme::button_accent("Done")).clicked()
                        {
                            self.exit_selection();
                        }

                        if self.presenter.config().show_add_button {
                            let add = ui
                                .add(theme::button(egui_phosphor::regular::PLUS))
                                .on_hover_text("Add color swatch");
                            if add.clicked() {
                                self.add_swatch();
                            }
                            let import = ui
                                .add(theme::button(egui_phosphor::regular::IMAGE))
                                .on_hover_text("Add photos from files");
                            if import.clicked() {
                                self.pick_files(ctx);
                            }
                        }

                        let (icon, hint) = match self.presenter.config().axis {
                            ScrollAxis::Vertical => (egui_phosphor::regular::COLUMNS, "Scroll horizontally"),
                            ScrollAxis::Horizontal => (egui_phosphor::regular::ROWS, "Scroll vertically"),
                        };
                        if ui.add(theme::button(icon)).on_hover_text(hint).clicked() {
                            self.toggle_axis();
                        }
                    });
                });
            });
    }

    pub(crate) fn render_grid_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let cell = self.presenter.config().cell_size;
        let spacing = self.presenter.config().spacing;
        let count = self.presenter.cell_count();

        if count == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No photos yet").color(theme::TEXT_DIM));
            });
            return;
        }

        let mut action: Option<CellAction> = None;

        match self.presenter.config().axis {
            ScrollAxis::Vertical => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .id_salt("grid_scroll")
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                            for index in 0..count {
                                if let Some(a) = self.render_cell(ui, ctx, index, cell) {
                                    action = Some(a);
                                }
                            }
                        });
                    });
            }
            ScrollAxis::Horizontal => {
                let rows = ((ui.available_height() + spacing) / (cell + spacing))
                    .floor()
                    .max(1.0) as usize;
                egui::ScrollArea::horizontal()
                    .auto_shrink([false, false])
                    .id_salt("grid_scroll_h")
                    .show(ui, |ui| {
                        ui.horizontal_top(|ui| {
                            ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                            // Column-major: fill each column top to bottom
                            for first in (0..count).step_by(rows) {
                                ui.vertical(|ui| {
                                    for index in first..(first + rows).min(count) {
                                        if let Some(a) = self.render_cell(ui, ctx, index, cell) {
                                            action = Some(a);
                                        }
                                    }
                                });
                            }
                        });
                    });
            }
        }

        // A released button ends any long-press in progress
        if !ui.input(|i| i.pointer.any_down()) {
            self.long_press_fired = None;
        }

        if let Some(action) = action {
            self.apply_cell_action(action);
        }
    }

    fn render_cell(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        index: usize,
        size: f32,
    ) -> Option<CellAction> {
        let Ok(cell) = self.presenter.cell_at(index) else {
            return None;
        };
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let texture = self.thumbnails.get(ctx, cell.id, &cell.image_bytes);
            let painter = ui.painter();
            match texture {
                Some(tex) => {
                    painter.image(tex.id(), rect, fill_uv(tex.size()), egui::Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_CELL_EMPTY);
                }
            }
            if cell.is_selected {
                paint_selected(painter, rect);
            } else if response.hovered() {
                painter.rect_stroke(
                    rect,
                    theme::RADIUS_DEFAULT,
                    egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
                    egui::StrokeKind::Inside,
                );
            }
        }

        let mut action = None;

        // Long-press: held on this cell past the threshold, fires once per press
        if response.is_pointer_button_down_on() && self.long_press_fired != Some(cell.id) {
            let held = ui.input(|i| i.pointer.press_start_time().map(|t| i.time - t));
            match held {
                Some(held) if held >= theme::LONG_PRESS_SECONDS => {
                    self.long_press_fired = Some(cell.id);
                    action = Some(CellAction::LongPress(index));
                }
                _ => ctx.request_repaint_after(Duration::from_millis(50)),
            }
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            if self.long_press_fired == Some(cell.id) {
                // Release of a long-press, not a tap
            } else if ui.input(|i| i.modifiers.command) {
                action = Some(CellAction::LongPress(index));
            } else {
                action = Some(CellAction::Tap(index));
            }
        }

        response.context_menu(|ui| {
            if let Some(choice) = self.photo_context_menu(ui, cell.is_selected) {
                action = Some(CellAction::Menu(index, choice));
            }
        });

        action
    }

    pub(crate) fn render_viewer(&mut self, ctx: &egui::Context) {
        let Some(photo) = self.viewer_photo.clone() else {
            return;
        };
        let mut open = true;
        let mut delete = false;
        egui::Window::new("Photo")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([420.0, 460.0])
            .show(ctx, |ui| {
                if let Some(tex) = self.thumbnails.get(ctx, photo.id, &photo.image_bytes) {
                    let side = ui.available_width().min(ui.available_height() - 40.0).max(64.0);
                    ui.add(
                        egui::Image::new((tex.id(), egui::vec2(side, side)))
                            .uv(fill_uv(tex.size()))
                            .corner_radius(theme::RADIUS_LARGE),
                    );
                }
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}  •  {}",
                            photo.created_at.format("%Y-%m-%d %H:%M:%S"),
                            format_bytes(photo.image_bytes.len() as u64)
                        ))
                        .color(theme::TEXT_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(format!("{}  Delete", egui_phosphor::regular::TRASH)))
                            .clicked()
                        {
                            delete = true;
                        }
                    });
                });
            });

        if delete {
            if let Some(index) = self.presenter.store().snapshot().position(photo.id) {
                self.apply_cell_action(CellAction::Menu(index, PhotoMenuAction::Delete));
            }
            open = false;
        }
        if !open {
            self.viewer_photo = None;
        }
    }

    pub(crate) fn render_toast(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        if self.toast_expired() {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }
        let margin = theme::SPACING_LG;
        egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_SURFACE)
                    .stroke(egui::Stroke::new(1.0, theme::STATUS_ERROR))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(theme::TEXT_SECONDARY));
                    });
            });
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
