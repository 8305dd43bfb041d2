use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::domain::example::GRID_PIXELS;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Number of output classes (K) — the vocabulary size at training time
    pub num_classes: usize,

    /// Width of the single hidden layer
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        let hidden = LinearConfig::new(GRID_PIXELS, self.hidden_size).init(device);
        let output = LinearConfig::new(self.hidden_size, self.num_classes).init(device);
        Classifier { hidden, output }
    }
}

/// Feed-forward grid classifier:
/// input [batch, 784] → dense(64) + relu → dense(K) logits.
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub hidden: Linear<B>,
    pub output: Linear<B>,
}

impl<B: Backend> Classifier<B> {
    /// images: [batch, 784] in [0, 1] → logits: [batch, K]
    pub fn forward(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = burn::tensor::activation::relu(self.hidden.forward(images));
        self.output.forward(x)
    }

    /// Forward pass + cross-entropy against integer class targets.
    /// Matches sparse categorical cross-entropy over softmax outputs.
    pub fn forward_loss(
        &self,
        images:  Tensor<B, 2>,
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

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_forward_output_shape() {
        let device = Default::default();
        let model: Classifier<TestBackend> = ClassifierConfig::new(5).init(&device);
        let images = Tensor::<TestBackend, 2>::zeros([3, GRID_PIXELS], &device);
        let logits = model.forward(images);
        assert_eq!(logits.dims(), [3, 5]);
    }

    #[test]
    fn test_single_class_output_shape() {
        let device = Default::default();
        let model: Classifier<TestBackend> = ClassifierConfig::new(1).init(&device);
        let images = Tensor::<TestBackend, 2>::zeros([1, GRID_PIXELS], &device);
        assert_eq!(model.forward(images).dims(), [1, 1]);
    }

    #[test]
    fn test_config_default_hidden_size() {
        let cfg = ClassifierConfig::new(10);
        assert_eq!(cfg.hidden_size, 64);
        assert_eq!(cfg.num_classes, 10);
    }
}
