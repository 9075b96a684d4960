// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - MnistSource implements DigitSource
//   - A future EmnistSource could also implement DigitSource
//   - The application layer only sees DigitSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::image::DigitImage;
use crate::domain::prediction::Prediction;
use crate::domain::sample::DigitSample;

// ─── DigitSource ──────────────────────────────────────────────────────────────
/// Any component that can provide labelled digit samples.
///
/// Implementations:
///   - MnistSource → the framework-provided MNIST dataset
///   - (future) EmnistSource → extended handwritten characters
pub trait DigitSource {
    /// Load the training split of the dataset.
    fn training_split(&self) -> Result<Vec<DigitSample>>;

    /// Load the held-out test split of the dataset.
    fn test_split(&self) -> Result<Vec<DigitSample>>;
}

// ─── DigitClassifier ──────────────────────────────────────────────────────────
/// Any component that can classify a preprocessed image.
///
/// Implementations:
///   - Inferencer → the trained CNN
pub trait DigitClassifier {
    /// Classify one preprocessed image and return the full
    /// prediction (digit, confidence, class probabilities).
    fn classify(&self, image: &DigitImage) -> Result<Prediction>;
}
