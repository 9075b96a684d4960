// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::domain::image::{DigitImage, IMAGE_SIDE};
use crate::domain::prediction::{Prediction, NUM_CLASSES};
use crate::domain::traits::DigitClassifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{ConvNet, ConvNetConfig};

type InferBackend = burn::backend::NdArray;

pub struct Inferencer {
    model:  ConvNet<InferBackend>,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Inferencer {
    /// Rebuild the trained model from a checkpoint directory.
    /// The saved config supplies the architecture; the recorded
    /// weights are then loaded into it. Dropout is rebuilt at 0.0
    /// since it only matters during training.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let cfg    = ckpt_manager.load_config()?;
        let model_cfg = ConvNetConfig::new(
            cfg.conv1_filters, cfg.conv2_filters, cfg.conv3_filters,
            cfg.hidden_dim, 0.0,
        );
        let model: ConvNet<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, device })
    }

    /// One forward pass over a single preprocessed image.
    fn predict(&self, image: &DigitImage) -> Result<Prediction> {
        // [784] → [1, 1, 28, 28] — a batch of one
        let flat = image.to_flat_vec();
        let input = Tensor::<InferBackend, 1>::from_floats(
            flat.as_slice(), &self.device,
        ).reshape([1, 1, IMAGE_SIDE, IMAGE_SIDE]);

        let logits = self.model.forward(input);

        // Softmax over the class dimension → probabilities
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("cannot read probabilities from tensor: {e:?}"))?;

        let mut probabilities = [0.0f32; NUM_CLASSES];
        probabilities.copy_from_slice(&probs);

        let prediction = Prediction::from_probabilities(probabilities);
        tracing::debug!(
            "Predicted {} (confidence {:.4})",
            prediction.digit, prediction.confidence,
        );
        Ok(prediction)
    }
}

impl DigitClassifier for Inferencer {
    fn classify(&self, image: &DigitImage) -> Result<Prediction> {
        self.predict(image)
    }
}
