#![windows_subsystem = "windows"]
//! Photo Grid - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod db;
mod error;
mod presenter;
mod selection;
mod settings;
mod store;
mod swatch;
mod theme;
mod types;
mod ui;
mod utils;

use app::{App, ImportQueue};
use constants::*;
use eframe::egui;
use presenter::GridPresenter;
use store::PhotoStore;
use tracing::{error, info};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,photo_grid=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Photo Grid starting");

    let db_path = data_dir.join(DB_FILE_NAME);
    let store = match PhotoStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open database");
            panic!("Failed to open database: {}", e);
        }
    };

    let imports = match ImportQueue::new() {
        Ok(queue) => queue,
        Err(e) => {
            error!(error = %e, "Failed to start import runtime");
            panic!("Failed to start import runtime: {}", e);
        }
    };

    let settings = settings::Settings::load(&data_dir);
    let presenter = GridPresenter::new(store, settings.grid_config());

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(match (settings.window_w, settings.window_h) {
            (Some(w), Some(h)) => egui::vec2(w, h),
            _ => egui::vec2(760.0, 560.0),
        })
        .with_min_inner_size([360.0, 280.0])
        .with_title(APP_NAME);
    if let (Some(x), Some(y)) = (settings.window_x, settings.window_y) {
        viewport = viewport.with_position(egui::pos2(x, y));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, presenter, imports, settings, data_dir)))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Store changes from other handles, finished imports, then presenter events
        self.poll_background();
        self.handle_grid_events();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.exit_selection();
        }

        self.render_toolbar(ctx);

        let panel = egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_LG as i8)),
            )
            .show(ctx, |ui| {
                self.render_grid_view(ui, ctx);
                ui.max_rect()
            });

        self.render_viewer(ctx);
        self.render_toast(ctx, panel.inner);

        // Actions taken this frame may have queued more events
        self.handle_grid_events();

        // Cheap poll for writes from other processes
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
