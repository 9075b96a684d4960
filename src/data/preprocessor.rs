// ============================================================
// Layer 4 — Image Preprocessor
// ============================================================
// Normalizes an arbitrary uploaded image into the exact shape
// and numeric range the trained model expects. This is the one
// piece of the system every input goes through, so its output
// contract is strict:
//
//   - exactly 28×28 pixels
//   - single grayscale channel
//   - f32 values in [0, 1]
//
// Steps (applied in order):
//   1. Decode the bytes (any format the image crate supports)
//   2. Convert to grayscale (luma)
//   3. Resize to 28×28
//   4. Optionally invert: MNIST digits are white-on-black, but
//      most drawings and scans are black-on-white. If the mean
//      grayscale value exceeds 127 the image is assumed to have
//      a light background and every pixel is flipped.
//   5. Scale u8 [0, 255] → f32 [0, 1]
//
// The invert step is a switch because the two consumers differ:
// the CLI prediction path applies it, the HTTP endpoint feeds
// canvas uploads through unchanged.
//
// Reference: Rust Book §9 (Error Handling)

use std::path::Path;

use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage};

use crate::domain::image::{DigitImage, IMAGE_SIDE};

/// Mean-intensity threshold above which an image is treated as
/// a dark digit on a light background and inverted.
const INVERT_THRESHOLD: f32 = 127.0;

/// Normalizes images into model-ready `DigitImage`s.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    /// Flip pixel values when the background looks light
    auto_invert: bool,
}

impl ImagePreprocessor {
    /// Create a preprocessor that feeds images through unchanged
    /// (no inversion) — the behaviour of the HTTP endpoint.
    pub fn new() -> Self {
        Self { auto_invert: false }
    }

    /// Enable or disable the light-background inversion heuristic.
    pub fn with_auto_invert(mut self, auto_invert: bool) -> Self {
        self.auto_invert = auto_invert;
        self
    }

    /// Decode raw bytes and normalize. Fails only if the bytes
    /// are not a decodable image.
    pub fn prepare_bytes(&self, bytes: &[u8]) -> Result<DigitImage> {
        let img = image::load_from_memory(bytes)
            .context("cannot decode uploaded bytes as an image")?;
        Ok(self.prepare(&img))
    }

    /// Read an image file from disk and normalize.
    pub fn prepare_file(&self, path: &Path) -> Result<DigitImage> {
        let img = image::open(path)
            .with_context(|| format!("cannot open image '{}'", path.display()))?;
        Ok(self.prepare(&img))
    }

    /// Normalize an already-decoded image.
    /// Infallible: any decodable image maps to a valid DigitImage.
    pub fn prepare(&self, img: &DynamicImage) -> DigitImage {
        // ── Grayscale, then resize to the model input size ────────────────────
        // The resize ignores aspect ratio on purpose: the model was
        // trained on square 28×28 inputs, so the whole image must map
        // onto that grid. CatmullRom is a bicubic filter.
        let gray = img.to_luma8();
        let gray = image::imageops::resize(
            &gray,
            IMAGE_SIDE as u32,
            IMAGE_SIDE as u32,
            FilterType::CatmullRom,
        );

        // ── Background heuristic ──────────────────────────────────────────────
        // Mean over the resized u8 pixels; > 127 means mostly light.
        let invert = if self.auto_invert {
            let sum: u64 = gray.pixels().map(|p| p.0[0] as u64).sum();
            let mean = sum as f32 / (IMAGE_SIDE * IMAGE_SIDE) as f32;
            mean > INVERT_THRESHOLD
        } else {
            false
        };

        if invert {
            tracing::debug!("Light background detected — inverting pixels");
        }

        // ── Scale to [0, 1] into the fixed 28×28 grid ─────────────────────────
        let mut pixels = [[0.0f32; IMAGE_SIDE]; IMAGE_SIDE];
        for (x, y, p) in gray.enumerate_pixels() {
            let value = if invert { 255 - p.0[0] } else { p.0[0] };
            pixels[y as usize][x as usize] = value as f32 / 255.0;
        }

        DigitImage::new(pixels)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// These tests run with `cargo test` and pin the output contract:
// shape, value range, inversion behaviour, and decode failures.
#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbImage};

    /// A solid grayscale test image of the given side length.
    fn solid_gray(side: u32, value: u8) -> DynamicImage {
        let img = GrayImage::from_pixel(side, side, Luma([value]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_output_values_in_unit_range() {
        let p = ImagePreprocessor::new();
        // A large colour image exercises both grayscale and resize
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(100, 64, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));

        let digit = p.prepare(&img);
        for row in &digit.pixels {
            for &v in row {
                assert!((0.0..=1.0).contains(&v), "pixel {v} outside [0, 1]");
            }
        }
    }

    #[test]
    fn test_resizes_any_input_to_28x28() {
        let p = ImagePreprocessor::new();
        for side in [1u32, 27, 28, 29, 300] {
            // The fixed-size DigitImage grid can only be filled if
            // the resize produced exactly 28×28 — an out-of-bounds
            // write would panic here.
            let digit = p.prepare(&solid_gray(side, 200));
            assert!((digit.mean_intensity() - 200.0 / 255.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_auto_invert_flips_light_background() {
        let p = ImagePreprocessor::new().with_auto_invert(true);

        // Mostly white image → inverted to mostly black
        let digit = p.prepare(&solid_gray(28, 230));
        assert!(digit.mean_intensity() < 0.2);

        // Mostly black image → left alone
        let digit = p.prepare(&solid_gray(28, 20));
        assert!(digit.mean_intensity() < 0.2);
    }

    #[test]
    fn test_no_invert_by_default() {
        let p = ImagePreprocessor::new();
        let digit = p.prepare(&solid_gray(28, 230));
        // Without the heuristic the light image stays light
        assert!(digit.mean_intensity() > 0.8);
    }

    #[test]
    fn test_malformed_bytes_are_an_error() {
        let p = ImagePreprocessor::new();
        assert!(p.prepare_bytes(b"definitely not an image").is_err());
        assert!(p.prepare_bytes(&[]).is_err());
    }
}
