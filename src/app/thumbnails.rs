//! Decoded photo textures, keyed by photo id

use crate::types::{PhotoId, Snapshot};
use eframe::egui;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Default)]
pub struct ThumbnailCache {
    // None marks a payload that failed to decode, so it is not retried every frame
    textures: HashMap<PhotoId, Option<egui::TextureHandle>>,
}

impl ThumbnailCache {
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        id: PhotoId,
        image_bytes: &[u8],
    ) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(&id) {
            return cached.clone();
        }

        let texture = match image::load_from_memory(image_bytes) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                Some(ctx.load_texture(
                    format!("photo-{}", id),
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to decode photo");
                None
            }
        };
        self.textures.insert(id, texture.clone());
        texture
    }

    /// Drop textures of photos that are no longer in the store
    pub fn retain_live(&mut self, snapshot: &Snapshot) {
        let before = self.textures.len();
        self.textures.retain(|id, _| snapshot.contains(*id));
        let dropped = before - self.textures.len();
        if dropped > 0 {
            debug!(dropped, "Pruned thumbnails");
        }
    }
}

/// UV rect that center-crops a `[w, h]` texture to fill a square cell
pub fn fill_uv(size: [usize; 2]) -> egui::Rect {
    let (w, h) = (size[0].max(1) as f32, size[1].max(1) as f32);
    if w > h {
        let f = h / w;
        let x0 = (1.0 - f) / 2.0;
        egui::Rect::from_min_max(egui::pos2(x0, 0.0), egui::pos2(x0 + f, 1.0))
    } else {
        let f = w / h;
        let y0 = (1.0 - f) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, y0), egui::pos2(1.0, y0 + f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swatch;

    #[test]
    fn fill_uv_crops_the_long_side() {
        let wide = fill_uv([200, 100]);
        assert_eq!(wide.min, egui::pos2(0.25, 0.0));
        assert_eq!(wide.max, egui::pos2(0.75, 1.0));

        let square = fill_uv([64, 64]);
        assert_eq!(square, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)));
    }

    #[test]
    fn caches_decoded_and_failed_payloads() {
        let ctx = egui::Context::default();
        let mut cache = ThumbnailCache::default();
        let good = PhotoId::new();
        let bad = PhotoId::new();
        let bytes = swatch::solid_swatch([10, 20, 30], 8, 80).unwrap();

        let tex = cache.get(&ctx, good, &bytes).unwrap();
        assert_eq!(tex.size(), [8, 8]);
        assert!(cache.get(&ctx, bad, b"junk").is_none());
        assert_eq!(cache.textures.len(), 2);

        cache.retain_live(&Snapshot::default());
        assert!(cache.textures.is_empty());
    }
}
