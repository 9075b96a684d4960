// ============================================================
// Layer 3 — DigitImage Domain Type
// ============================================================
// Represents one image after preprocessing: a 28×28 grayscale
// grid of f32 values in [0, 1], the exact shape and range the
// trained model expects. Every code path that reaches the model
// — MNIST training samples, CLI image files, HTTP uploads —
// goes through this type first.
//
// The fixed-size array (not a Vec) makes the 28×28 invariant
// part of the type: a DigitImage with the wrong shape cannot
// be constructed.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Side length of a model input image, in pixels.
/// MNIST digits are 28×28 grayscale.
pub const IMAGE_SIDE: usize = 28;

/// Total number of pixels in a model input image (28 × 28).
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// A preprocessed grayscale image: 28 rows × 28 columns,
/// each pixel an f32 in [0, 1] (0 = black, 1 = white).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitImage {
    /// Pixel grid indexed as pixels[row][col]
    pub pixels: [[f32; IMAGE_SIDE]; IMAGE_SIDE],
}

impl DigitImage {
    /// Create a DigitImage from an already-normalized pixel grid.
    pub fn new(pixels: [[f32; IMAGE_SIDE]; IMAGE_SIDE]) -> Self {
        Self { pixels }
    }

    /// Flatten the 28×28 grid into a row-major Vec of 784 values.
    /// This is the layout tensor constructors expect.
    pub fn to_flat_vec(&self) -> Vec<f32> {
        self.pixels.iter().flat_map(|row| row.iter().copied()).collect()
    }

    /// Mean pixel intensity over the whole image, in [0, 1].
    /// Used by the preprocessor's background heuristic: a bright
    /// mean indicates a dark digit on a light background.
    pub fn mean_intensity(&self) -> f32 {
        let sum: f32 = self.pixels.iter().flat_map(|row| row.iter()).sum();
        sum / IMAGE_PIXELS as f32
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_vec_length_and_order() {
        let mut pixels = [[0.0f32; IMAGE_SIDE]; IMAGE_SIDE];
        pixels[0][1]  = 0.5;
        pixels[27][27] = 1.0;

        let flat = DigitImage::new(pixels).to_flat_vec();
        assert_eq!(flat.len(), IMAGE_PIXELS);
        // Row-major: [row][col] → row * 28 + col
        assert_eq!(flat[1],   0.5);
        assert_eq!(flat[783], 1.0);
    }

    #[test]
    fn test_mean_intensity() {
        let img = DigitImage::new([[0.5f32; IMAGE_SIDE]; IMAGE_SIDE]);
        assert!((img.mean_intensity() - 0.5).abs() < 1e-6);
    }
}
