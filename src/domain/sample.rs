// ============================================================
// Layer 3 — DigitSample Domain Type
// ============================================================
// One labelled training example: raw grayscale pixels as stored
// in MNIST (0–255, white digit on black background) plus the
// ground-truth digit. Pixels stay byte-faithful to the source
// data here; normalization to [0, 1] happens in the batcher.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::image::IMAGE_SIDE;

/// A labelled digit image in its raw dataset form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitSample {
    /// Pixel grid indexed as pixels[row][col], values in [0, 255]
    pub pixels: [[f32; IMAGE_SIDE]; IMAGE_SIDE],

    /// The ground-truth digit, in [0, 9]
    pub label: u8,
}
