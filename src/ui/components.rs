//! Reusable UI components

use crate::theme;
use eframe::egui;

/// Paint the check badge in the top-right corner of a selected cell
pub fn paint_check_badge(painter: &egui::Painter, cell: egui::Rect) {
    let size = theme::CHECK_BADGE_SIZE;
    let center = egui::pos2(cell.right() - 4.0 - size / 2.0, cell.top() + 4.0 + size / 2.0);
    painter.circle_filled(center, size / 2.0, theme::ACCENT);
    painter.circle_stroke(center, size / 2.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::CHECK,
        egui::FontId::proportional(size * 0.65),
        egui::Color32::WHITE,
    );
}

/// Paint a selected cell: dimming overlay, accent border, check badge
pub fn paint_selected(painter: &egui::Painter, cell: egui::Rect) {
    painter.rect_filled(cell, theme::RADIUS_DEFAULT, theme::SELECTED_OVERLAY);
    painter.rect_stroke(
        cell,
        theme::RADIUS_DEFAULT,
        egui::Stroke::new(theme::STROKE_SELECTED, theme::ACCENT),
        egui::StrokeKind::Inside,
    );
    paint_check_badge(painter, cell);
}

/// "1 photo" / "3 photos"
pub fn photo_count_label(n: usize) -> String {
    if n == 1 {
        "1 photo".to_string()
    } else {
        format!("{} photos", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(photo_count_label(0), "0 photos");
        assert_eq!(photo_count_label(1), "1 photo");
        assert_eq!(photo_count_label(12), "12 photos");
    }
}
