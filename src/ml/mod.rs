// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly, except the data
// layer's Dataset/Batcher trait implementations.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - The model architecture is clearly separated from
//     data loading and application logic
//
// What's in this layer:
//
//   model.rs     — The convolutional network architecture
//                  Three conv blocks (32 → 64 → 128 filters,
//                  3×3 kernels, same padding, ReLU, 2×2 max
//                  pooling) followed by a dense 128 layer,
//                  dropout 0.5 and a 10-way output head
//
//   trainer.rs   — The training loop
//                  Handles forward pass, loss computation,
//                  backward pass, optimiser step, per-epoch
//                  validation, metrics logging, checkpoint
//                  saving, and final test-set evaluation
//
//   inferencer.rs — The inference engine
//                  Loads a checkpoint, turns one DigitImage
//                  into a tensor, runs the model, converts the
//                  logits into a softmax distribution and a
//                  predicted digit
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            LeCun et al. (1998) Gradient-Based Learning
//            Applied to Document Recognition

/// Convolutional digit classifier architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and predicts digits
pub mod inferencer;
