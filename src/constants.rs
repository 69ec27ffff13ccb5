//! Application constants and configuration

pub const APP_NAME: &str = "Photo Grid";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under the user data dir
pub const DATA_DIR_NAME: &str = "Photo Grid";
pub const DB_FILE_NAME: &str = "photos.db";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LOG_FILE_NAME: &str = "photo-grid.log";

/// Edge length of generated color swatches, in pixels
pub const DEFAULT_SWATCH_SIZE: u32 = 100;
/// JPEG quality used for swatches and imported files (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// How long a toast stays on screen
pub const TOAST_SECONDS: f32 = 3.0;
