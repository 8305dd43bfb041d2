// ============================================================
// Layer 4 — Grid Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<GridSample>
// into tensors for the model forward pass.
//
// Input:  N samples, each with 784 raw pixels and a class index
// Output: GridBatch with images [N, 784] scaled to [0, 1]
//         and targets [N]
//
// All samples already have a fixed pixel count (enforced at
// ingestion), so batching is a plain flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::GridSample;
use crate::domain::example::GRID_PIXELS;

// ─── GridBatch ────────────────────────────────────────────────────────────────
/// A batch of grids ready for the classifier.
#[derive(Debug, Clone)]
pub struct GridBatch<B: Backend> {
    /// Normalised pixel rows — shape: [batch_size, 784]
    pub images: Tensor<B, 2>,

    /// Class indices — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

// ─── GridBatcher ──────────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct GridBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> GridBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<GridSample, GridBatch<B>> for GridBatcher<B> {
    fn batch(&self, items: Vec<GridSample>) -> GridBatch<B> {
        let batch_size = items.len();

        // Flatten all pixel rows into one contiguous Vec, then
        // reshape to [batch, 784]. Division by 255 maps the raw
        // pixel range onto [0, 1], the same scaling prediction uses.
        let pixel_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.pixels.iter().copied())
            .collect();

        let targets: Vec<i32> = items.iter().map(|s| s.target as i32).collect();

        let images = Tensor::<B, 1>::from_floats(pixel_flat.as_slice(), &self.device)
            .reshape([batch_size, GRID_PIXELS])
            / 255.0;

        let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), &self.device);

        GridBatch { images, targets }
    }
}
