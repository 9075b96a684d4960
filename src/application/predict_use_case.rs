// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Classifies a single image file:
//   1. Load the trained model from its checkpoint
//   2. Preprocess the image file into a DigitImage
//   3. Run one forward pass and return the prediction
//
// The preprocessor runs with the light-background inversion
// heuristic enabled: photos and scans of handwriting are
// usually dark-on-light, the opposite of MNIST's convention.

use std::path::Path;

use anyhow::Result;

use crate::data::preprocessor::ImagePreprocessor;
use crate::domain::prediction::Prediction;
use crate::domain::traits::DigitClassifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    preprocessor: ImagePreprocessor,
    inferencer:   Inferencer,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let ckpt       = CheckpointManager::new(checkpoint_dir);
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;
        let preprocessor = ImagePreprocessor::new().with_auto_invert(true);
        Ok(Self { preprocessor, inferencer })
    }

    /// Preprocess one image file and classify it.
    pub fn predict_file(&self, path: &Path) -> Result<Prediction> {
        let image = self.preprocessor.prepare_file(path)?;
        tracing::debug!(
            "Preprocessed '{}' (mean intensity {:.3})",
            path.display(),
            image.mean_intensity(),
        );
        self.inferencer.classify(&image)
    }
}
