// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load MNIST splits          (Layer 4 - data)
//   Step 2: Split train/validation     (Layer 4 - data)
//   Step 3: Build datasets             (Layer 4 - data)
//   Step 4: Save config                (Layer 6 - infra)
//   Step 5: Run training loop          (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::DigitDataset,
    loader::MnistSource,
    splitter::split_train_val,
};
use crate::domain::traits::DigitSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for inference.
// The #[derive(Serialize, Deserialize)] macros from serde handle
// reading/writing this struct to JSON automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub checkpoint_dir: String,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub val_fraction:   f64,
    pub conv1_filters:  usize,
    pub conv2_filters:  usize,
    pub conv3_filters:  usize,
    pub hidden_dim:     usize,
    pub dropout:        f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: "checkpoints".to_string(),
            batch_size:     128,
            epochs:         10,
            lr:             1e-3,
            val_fraction:   0.1,
            conv1_filters:  32,
            conv2_filters:  64,
            conv3_filters:  128,
            hidden_dim:     128,
            dropout:        0.5,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load MNIST splits ─────────────────────────────────────────
        // The framework loader downloads and caches the archives;
        // the test split stays untouched until the final evaluation.
        let source        = MnistSource::new();
        let train_samples = source.training_split()?;
        let test_samples  = source.test_split()?;

        // ── Step 2: Train / validation split ──────────────────────────────────
        // Shuffle and hold out a fraction (default 10%) so the model
        // is measured on digits it never fit during the epoch.
        let (train_samples, val_samples) =
            split_train_val(train_samples, 1.0 - cfg.val_fraction);
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            train_samples.len(),
            val_samples.len(),
            test_samples.len(),
        );

        // ── Step 3: Build Burn datasets ───────────────────────────────────────
        // DigitDataset implements Burn's Dataset trait so the DataLoader
        // can call .get(index) and .len() on it
        let train_dataset = DigitDataset::new(train_samples);
        let val_dataset   = DigitDataset::new(val_samples);
        let test_dataset  = DigitDataset::new(test_samples);

        // ── Step 4: Save config for inference ─────────────────────────────────
        // The inferencer needs to know the model architecture to rebuild it
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 5: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, train_dataset, val_dataset, test_dataset, ckpt_manager)?;

        Ok(())
    }
}
