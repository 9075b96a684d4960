// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw image bytes
// all the way to tensor batches ready for the model.
//
// Two pipelines share this layer:
//
// Training (MNIST):
//
//   MNIST idx archives
//       │
//       ▼
//   MnistSource       → framework dataset loader, per-item conversion
//       │
//       ▼
//   split_train_val   → shuffles and holds out a validation set
//       │
//       ▼
//   DigitDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   DigitBatcher      → stacks samples into [batch, 1, 28, 28] tensors
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Serving / prediction (arbitrary image files):
//
//   image bytes
//       │
//       ▼
//   ImagePreprocessor → decode, grayscale, resize, normalize
//       │
//       ▼
//   DigitImage        → 28×28 grid in [0, 1], ready for inference
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads MNIST samples via Burn's vision dataset loader
pub mod loader;

/// Normalizes arbitrary images into model-ready DigitImages
pub mod preprocessor;

/// Implements Burn's Dataset trait for digit samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
