use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        PaddingConfig2d, Relu,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::domain::image::IMAGE_SIDE;
use crate::domain::prediction::NUM_CLASSES;

// Each 2×2 max pool halves the spatial side (floor division):
// 28 → 14 → 7 → 3. The flattened width after the conv stack is
// therefore conv3_filters * 3 * 3.
const POOLED_SIDE: usize = IMAGE_SIDE / 2 / 2 / 2;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ConvNetConfig {
    pub conv1_filters: usize,
    pub conv2_filters: usize,
    pub conv3_filters: usize,
    pub hidden_dim:    usize,
    pub dropout:       f64,
}

impl ConvNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvNet<B> {
        // Same padding preserves the 28×28 spatial dimensions,
        // so only the pools shrink the feature maps.
        let conv1 = Conv2dConfig::new([1, self.conv1_filters], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let conv2 = Conv2dConfig::new([self.conv1_filters, self.conv2_filters], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let conv3 = Conv2dConfig::new([self.conv2_filters, self.conv3_filters], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        let pool = MaxPool2dConfig::new([2, 2])
            .with_strides([2, 2])
            .init();

        let flat_dim = self.conv3_filters * POOLED_SIDE * POOLED_SIDE;
        let fc1      = LinearConfig::new(flat_dim, self.hidden_dim).init(device);
        let fc2      = LinearConfig::new(self.hidden_dim, NUM_CLASSES).init(device);
        let dropout  = DropoutConfig::new(self.dropout).init();

        ConvNet {
            conv1, conv2, conv3,
            pool,
            fc1, fc2,
            dropout,
            activation: Relu::new(),
            flat_dim,
        }
    }
}

#[derive(Module, Debug)]
pub struct ConvNet<B: Backend> {
    pub conv1:      Conv2d<B>,
    pub conv2:      Conv2d<B>,
    pub conv3:      Conv2d<B>,
    pub pool:       MaxPool2d,
    pub fc1:        Linear<B>,
    pub fc2:        Linear<B>,
    pub dropout:    Dropout,
    pub activation: Relu,
    pub flat_dim:   usize,
}

impl<B: Backend> ConvNet<B> {
    /// images: [batch, 1, 28, 28] → logits: [batch, 10]
    ///
    /// Softmax is NOT applied here — cross-entropy loss works on
    /// raw logits, and the inferencer applies softmax itself when
    /// it needs probabilities.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch_size, _, _, _] = images.dims();

        // Three conv blocks: conv → relu → 2×2 max pool
        let x = self.pool.forward(self.activation.forward(self.conv1.forward(images)));
        let x = self.pool.forward(self.activation.forward(self.conv2.forward(x)));
        let x = self.pool.forward(self.activation.forward(self.conv3.forward(x)));

        // [batch, conv3_filters, 3, 3] → [batch, flat_dim]
        let x = x.reshape([batch_size, self.flat_dim]);

        // Classifier head: dense → relu → dropout → 10-way logits
        let x = self.dropout.forward(self.activation.forward(self.fc1.forward(x)));
        self.fc2.forward(x)
    }

    pub fn forward_loss(
        &self,
        images:  Tensor<B, 4>,
        targets: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(images);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model: ConvNet<NdArray> =
            ConvNetConfig::new(32, 64, 128, 128, 0.5).init(&device);

        let images = Tensor::<NdArray, 4>::zeros([2, 1, IMAGE_SIDE, IMAGE_SIDE], &device);
        let logits = model.forward(images);
        assert_eq!(logits.dims(), [2, NUM_CLASSES]);
    }

    #[test]
    fn test_flat_dim_matches_pooled_stack() {
        let device = Default::default();
        let model: ConvNet<NdArray> =
            ConvNetConfig::new(8, 16, 24, 32, 0.0).init(&device);
        assert_eq!(model.flat_dim, 24 * 3 * 3);
    }
}
