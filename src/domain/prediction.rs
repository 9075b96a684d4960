// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// Represents the outcome of classifying one image.
// This is 10-way classification: the model produces one
// probability per digit class (0–9) and the prediction is
// the class with the highest probability.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// Number of digit classes (0 through 9).
pub const NUM_CLASSES: usize = 10;

/// The result of classifying one image.
///
/// `digit` is always the argmax of `probabilities`, so it is
/// guaranteed to be in [0, 9].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted digit, in [0, 9]
    pub digit: u8,

    /// Probability assigned to the predicted digit, in [0, 1]
    pub confidence: f32,

    /// Full softmax distribution over the 10 classes,
    /// indexed by digit
    pub probabilities: [f32; NUM_CLASSES],
}

impl Prediction {
    /// Build a Prediction from a softmax distribution by taking
    /// the argmax. The digit therefore cannot fall outside [0, 9].
    pub fn from_probabilities(probabilities: [f32; NUM_CLASSES]) -> Self {
        let mut digit      = 0u8;
        let mut confidence = probabilities[0];

        for (class, &p) in probabilities.iter().enumerate().skip(1) {
            if p > confidence {
                confidence = p;
                digit      = class as u8;
            }
        }

        Self { digit, confidence, probabilities }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_highest_class() {
        let mut probs = [0.05f32; NUM_CLASSES];
        probs[7] = 0.55;

        let p = Prediction::from_probabilities(probs);
        assert_eq!(p.digit, 7);
        assert!((p.confidence - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_digit_always_in_range() {
        // Degenerate distributions must still yield a digit in [0, 9]
        let p = Prediction::from_probabilities([0.0; NUM_CLASSES]);
        assert!(p.digit <= 9);
    }

    #[test]
    fn test_first_class_wins_ties() {
        let p = Prediction::from_probabilities([0.1; NUM_CLASSES]);
        assert_eq!(p.digit, 0);
    }
}
