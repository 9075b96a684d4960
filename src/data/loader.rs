// ============================================================
// Layer 4 — MNIST Loader
// ============================================================
// Loads the MNIST dataset through Burn's vision dataset loader.
//
// MNIST ships as two fixed splits:
//   - train: 60,000 labelled 28×28 grayscale images
//   - test:  10,000 labelled images, never used for fitting
//
// Burn's MnistDataset handles downloading and caching the idx
// archives; this module only converts the framework items into
// the crate's own DigitSample so no other layer depends on the
// framework's dataset types.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::Result;
use burn::data::dataset::vision::{MnistDataset, MnistItem};
use burn::data::dataset::Dataset;

use crate::domain::sample::DigitSample;
use crate::domain::traits::DigitSource;

/// Loads MNIST samples via the framework dataset loader.
/// Implements the DigitSource trait from Layer 3.
pub struct MnistSource;

impl MnistSource {
    pub fn new() -> Self {
        Self
    }

    /// Materialize every item of a framework dataset into a Vec.
    /// MNIST fits comfortably in memory (60k × 784 floats).
    fn collect(dataset: MnistDataset) -> Vec<DigitSample> {
        (0..dataset.len())
            .filter_map(|i| dataset.get(i))
            .map(convert_item)
            .collect()
    }
}

impl Default for MnistSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitSource for MnistSource {
    fn training_split(&self) -> Result<Vec<DigitSample>> {
        tracing::info!("Loading MNIST training split");
        let samples = Self::collect(MnistDataset::train());
        tracing::info!("Loaded {} training samples", samples.len());
        Ok(samples)
    }

    fn test_split(&self) -> Result<Vec<DigitSample>> {
        tracing::info!("Loading MNIST test split");
        let samples = Self::collect(MnistDataset::test());
        tracing::info!("Loaded {} test samples", samples.len());
        Ok(samples)
    }
}

/// Convert one framework item into the crate's own sample type.
/// MnistItem stores pixels as f32 in [0, 255]; they stay raw here
/// and are normalized in the batcher.
fn convert_item(item: MnistItem) -> DigitSample {
    DigitSample {
        pixels: item.image,
        label:  item.label,
    }
}
