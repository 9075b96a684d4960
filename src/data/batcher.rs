// ============================================================
// Layer 4 — Digit Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<DigitSample>
// into model-ready tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into a single batch tensor, because the backend is
//   most efficient when processing many samples at once.
//
// How batching works here:
//   Input:  Vec of N DigitSamples, each a 28×28 pixel grid
//   Output: DigitBatch with an image tensor of shape
//           [N, 1, 28, 28] (channels-first, 1 = grayscale)
//           and a target tensor of shape [N]
//
//   We flatten all pixels into one long Vec, then reshape:
//   [s1_p1, ..., s1_p784, s2_p1, ..., sN_p784] → [N, 1, 28, 28]
//
// Normalization also lives here: MNIST pixels arrive as
// [0, 255] and the model expects [0, 1], so the image tensor
// is divided by 255 after stacking.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::image::{IMAGE_PIXELS, IMAGE_SIDE};
use crate::domain::sample::DigitSample;

// ─── DigitBatch ───────────────────────────────────────────────────────────────
/// A batch of digit samples ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct DigitBatch<B: Backend> {
    /// Image pixels — shape: [batch_size, 1, 28, 28], values in [0, 1]
    pub images: Tensor<B, 4>,

    /// Ground truth digits — shape: [batch_size]
    /// One integer in [0, 9] per sample
    pub targets: Tensor<B, 1, Int>,
}

// ─── DigitBatcher ─────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct backend device.
#[derive(Clone, Debug)]
pub struct DigitBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> DigitBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes DigitBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<DigitSample, DigitBatch<B>> for DigitBatcher<B> {
    /// Convert a Vec of DigitSamples into a single DigitBatch.
    ///
    /// Steps:
    ///   1. Flatten all pixel grids into one Vec<f32>
    ///   2. Create a 1D tensor and reshape to [batch, 1, 28, 28]
    ///   3. Normalize from [0, 255] to [0, 1]
    ///   4. Create a 1D Int tensor for the target digits
    fn batch(&self, items: Vec<DigitSample>) -> DigitBatch<B> {
        let batch_size = items.len();

        // ── Flatten pixels ────────────────────────────────────────────────────
        // Row-major within each sample, samples in order
        let mut pixel_flat: Vec<f32> = Vec::with_capacity(batch_size * IMAGE_PIXELS);
        for sample in &items {
            for row in &sample.pixels {
                pixel_flat.extend_from_slice(row);
            }
        }

        // ── Collect target digits ─────────────────────────────────────────────
        let targets_flat: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        // ── Create tensors ────────────────────────────────────────────────────
        // [batch * 784] → [batch, 1, 28, 28], then scale to [0, 1]
        let images = Tensor::<B, 1>::from_floats(pixel_flat.as_slice(), &self.device)
            .reshape([batch_size, 1, IMAGE_SIDE, IMAGE_SIDE])
            / 255.0;

        let targets = Tensor::<B, 1, Int>::from_ints(
            targets_flat.as_slice(), &self.device
        );

        DigitBatch { images, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    fn sample(value: f32, label: u8) -> DigitSample {
        DigitSample {
            pixels: [[value; IMAGE_SIDE]; IMAGE_SIDE],
            label,
        }
    }

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = DigitBatcher::<NdArray>::new(device);

        let batch = batcher.batch(vec![sample(0.0, 3), sample(255.0, 7)]);
        assert_eq!(batch.images.dims(), [2, 1, IMAGE_SIDE, IMAGE_SIDE]);
        assert_eq!(batch.targets.dims(), [2]);
    }

    #[test]
    fn test_batch_normalizes_to_unit_range() {
        let device  = Default::default();
        let batcher = DigitBatcher::<NdArray>::new(device);

        let batch  = batcher.batch(vec![sample(255.0, 1)]);
        let pixels: Vec<f32> = batch.images.into_data().to_vec().unwrap();
        assert!(pixels.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }
}
