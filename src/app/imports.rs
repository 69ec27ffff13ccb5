//! Background decoding of files chosen in the picker

use crate::error::Result;
use crate::swatch;
use eframe::egui;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

/// Image file extensions offered in the picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

pub struct ImportOutcome {
    pub path: PathBuf,
    /// JPEG payload ready for the store
    pub result: Result<Vec<u8>>,
}

/// Decodes and re-encodes picked files off the UI thread.
///
/// Finished imports are collected with [`ImportQueue::drain`] on the UI thread,
/// which is where they get added to the store.
pub struct ImportQueue {
    runtime: tokio::runtime::Runtime,
    tx: UnboundedSender<ImportOutcome>,
    rx: UnboundedReceiver<ImportOutcome>,
    pending: usize,
}

impl ImportQueue {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("photo-import")
            .build()?;
        let (tx, rx) = unbounded_channel();
        Ok(Self {
            runtime,
            tx,
            rx,
            pending: 0,
        })
    }

    pub fn request(&mut self, ctx: &egui::Context, path: PathBuf, quality: u8) {
        self.spawn(ctx, path, move |path| swatch::import_file(path, quality));
    }

    // Every job sends exactly one outcome, even if the decoder panics,
    // so `pending` always drains back to zero.
    fn spawn<F>(&mut self, ctx: &egui::Context, path: PathBuf, job: F)
    where
        F: FnOnce(&Path) -> Result<Vec<u8>> + Send + 'static,
    {
        debug!(path = %path.display(), "Import queued");
        self.pending += 1;
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| job(&path))).unwrap_or_else(|_| {
                error!(path = %path.display(), "Import panicked");
                Err(io::Error::other("decoder panicked").into())
            });
            let _ = tx.send(ImportOutcome { path, result });
            ctx.request_repaint();
        });
    }

    pub fn drain(&mut self) -> Vec<ImportOutcome> {
        let mut done = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            done.push(outcome);
        }
        self.pending = self.pending.saturating_sub(done.len());
        done
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use std::time::{Duration, Instant};

    fn drain_until(queue: &mut ImportQueue, n: usize) -> Vec<ImportOutcome> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut done = Vec::new();
        while done.len() < n && Instant::now() < deadline {
            done.extend(queue.drain());
            std::thread::sleep(Duration::from_millis(10));
        }
        done
    }

    #[test]
    fn imports_files_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("red.png");
        image::RgbImage::from_pixel(5, 5, image::Rgb([255, 0, 0]))
            .save(&good)
            .unwrap();
        let missing = dir.path().join("missing.png");

        let ctx = egui::Context::default();
        let mut queue = ImportQueue::new().unwrap();
        queue.request(&ctx, good.clone(), 80);
        queue.request(&ctx, missing.clone(), 80);
        assert_eq!(queue.pending(), 2);

        let done = drain_until(&mut queue, 2);

        assert_eq!(done.len(), 2);
        assert_eq!(queue.pending(), 0);
        for outcome in done {
            if outcome.path == good {
                let bytes = outcome.result.unwrap();
                assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
            } else {
                assert_eq!(outcome.path, missing);
                assert!(matches!(outcome.result, Err(GalleryError::Io(_))));
            }
        }
    }

    #[test]
    fn panicking_import_still_reports_back() {
        let ctx = egui::Context::default();
        let mut queue = ImportQueue::new().unwrap();
        let path = PathBuf::from("broken.png");
        queue.spawn(&ctx, path.clone(), |_| panic!("bad decoder"));
        assert_eq!(queue.pending(), 1);

        let done = drain_until(&mut queue, 1);

        assert_eq!(done.len(), 1);
        assert_eq!(queue.pending(), 0);
        assert_eq!(done[0].path, path);
        assert!(matches!(done[0].result, Err(GalleryError::Io(_))));
    }
}
