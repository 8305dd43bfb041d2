use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded training sample: a flattened raw-pixel grid and
/// its class index from the label vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSample {
    /// Row-major pixels, raw [0, 255] values (normalised in the batcher)
    pub pixels: Vec<f32>,

    /// Class index in 0..K-1
    pub target: usize,
}

pub struct GridDataset {
    samples: Vec<GridSample>,
}

impl GridDataset {
    pub fn new(samples: Vec<GridSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<GridSample> for GridDataset {
    fn get(&self, index: usize) -> Option<GridSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
