//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_SWATCH_SIZE, SETTINGS_FILE_NAME};
use crate::presenter::{GridConfig, ScrollAxis};
use crate::selection::EmptySelectionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Grid
    pub scroll_axis: ScrollAxis,
    pub cell_size: f32,
    pub cell_spacing: f32,

    // Behaviour
    pub selection_enabled: bool,
    pub show_add_button: bool,
    pub empty_selection: EmptySelectionPolicy,

    // New photos
    pub swatch_size: u32,
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            scroll_axis: grid.axis,
            cell_size: grid.cell_size,
            cell_spacing: grid.spacing,
            selection_enabled: grid.selection_enabled,
            show_add_button: grid.show_add_button,
            empty_selection: grid.empty_selection,
            swatch_size: DEFAULT_SWATCH_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            axis: self.scroll_axis,
            selection_enabled: self.selection_enabled,
            show_add_button: self.show_add_button,
            empty_selection: self.empty_selection,
            cell_size: self.cell_size.clamp(32.0, 512.0),
            spacing: self.cell_spacing.max(0.0),
        }
    }
}
