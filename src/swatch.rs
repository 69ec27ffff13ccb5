//! Image payloads: generated color swatches and imported files, both stored as JPEG

use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Random opaque color. Uses the v4 UUID generator as the entropy source.
pub fn random_color() -> [u8; 3] {
    let bytes = Uuid::new_v4().into_bytes();
    [bytes[0], bytes[1], bytes[2]]
}

/// Square image of a single color, JPEG-encoded
pub fn solid_swatch(color: [u8; 3], size: u32, quality: u8) -> Result<Vec<u8>> {
    let img = RgbImage::from_pixel(size.max(1), size.max(1), Rgb(color));
    encode_jpeg(&DynamicImage::ImageRgb8(img), quality)
}

pub fn random_swatch(size: u32, quality: u8) -> Result<Vec<u8>> {
    solid_swatch(random_color(), size, quality)
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).encode_image(&rgb)?;
    Ok(out)
}

/// Decode any supported format and re-encode as JPEG
pub fn normalize(bytes: &[u8], quality: u8) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    debug!(width = img.width(), height = img.height(), "Decoded import");
    encode_jpeg(&img, quality)
}

pub fn import_file(path: &Path, quality: u8) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    normalize(&bytes, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use image::{GenericImageView, ImageFormat};
    use std::io::Cursor;

    #[test]
    fn swatch_is_decodable_jpeg_of_requested_size() {
        let bytes = random_swatch(100, 80).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
    }

    #[test]
    fn solid_swatch_keeps_its_color() {
        let bytes = solid_swatch([200, 30, 30], 16, 95).unwrap();
        let px = image::load_from_memory(&bytes).unwrap().to_rgb8().get_pixel(8, 8).0;
        // JPEG is lossy, allow some drift
        assert!(px[0] > 170 && px[1] < 60 && px[2] < 60, "{px:?}");
    }

    #[test]
    fn normalize_converts_png_to_jpeg() {
        let png = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([0, 255, 0])));
        let mut buf = Vec::new();
        png.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();

        let jpeg = normalize(&buf, 80).unwrap();

        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&jpeg).unwrap().dimensions(), (4, 3));
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(normalize(b"not an image", 80), Err(GalleryError::Image(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_file(&dir.path().join("nope.png"), 80).unwrap_err();
        assert!(matches!(err, GalleryError::Io(_)));
    }
}
