//! Theme constants for Photo Grid
//! Colors, sizes and small styled widgets shared by the views

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0c, 0x0c, 0x0f);
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1f);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x26, 0x26, 0x2c);
pub const BG_CELL_EMPTY: Color32 = Color32::from_rgb(0x3a, 0x3a, 0x40); // placeholder while decoding

// =============================================================================
// COLORS - Accent (blue)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6); // blue-500
pub const ACCENT_DARK: Color32 = Color32::from_rgb(0x1e, 0x40, 0xaf); // blue-800

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a);

// =============================================================================
// COLORS - Borders / overlays
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x30);
pub const SELECTED_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 77); // 30% black

// =============================================================================
// COLORS - Buttons / status
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const TOOLBAR_HEIGHT: f32 = 44.0;
pub const CHECK_BADGE_SIZE: f32 = 20.0;
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const STROKE_SELECTED: f32 = 2.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;

/// Held this long without moving counts as a long-press
pub const LONG_PRESS_SECONDS: f64 = 0.5;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(1.0, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        menu_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Buttons
// =============================================================================

pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_PRIMARY))
        .fill(ACCENT_DARK)
        .corner_radius(RADIUS_DEFAULT)
}

/// Context menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str, color: Color32) -> bool {
    let w = ui.available_width().max(160.0);
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, BG_SURFACE);
    }
    ui.painter().text(
        rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        format!("{}  {}", icon, label),
        egui::FontId::proportional(13.0),
        color,
    );
    response.clicked()
}
