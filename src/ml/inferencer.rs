// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads the persisted artifact set and classifies one grid.
// The model is loaded fresh on every construction, never
// cached, so a retrain is always picked up by the next
// prediction request.

use anyhow::Result;
use burn::prelude::*;

use crate::domain::example::{grid_is_valid, GRID_PIXELS};
use crate::domain::label::Label;
use crate::domain::vocabulary::LabelVocabulary;
use crate::infra::model_store::ModelStore;
use crate::ml::model::Classifier;

type InferBackend = burn::backend::NdArray;

/// One classification result.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Argmax class index
    pub index: usize,

    /// Decoded label, `None` when the index falls outside the
    /// persisted vocabulary (mismatched artifacts)
    pub label: Option<Label>,

    /// Softmax probability of the winning class
    pub confidence: f32,
}

pub struct Inferencer {
    model:      Classifier<InferBackend>,
    vocabulary: LabelVocabulary,
    device:     burn::backend::ndarray::NdArrayDevice,
}

impl Inferencer {
    /// Rebuild the model from the persisted config, load its
    /// weights and the vocabulary. Errors when any artifact is
    /// missing, i.e. before the first successful training run.
    pub fn from_artifacts(model_store: &ModelStore) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let cfg        = model_store.load_config()?;
        let vocabulary = model_store.load_vocabulary()?;
        let model: Classifier<InferBackend> = cfg.init(&device);
        let model = model_store.load_model(model, &device)?;
        tracing::debug!("Model loaded: {} classes", vocabulary.len());
        Ok(Self { model, vocabulary, device })
    }

    /// Classify one 28x28 grid. Pixels are scaled by 1/255
    /// exactly as the training batcher does.
    pub fn predict(&self, image: &[Vec<f32>]) -> Result<Prediction> {
        anyhow::ensure!(grid_is_valid(image), "Image is not a 28x28 grid");
        let pixels: Vec<f32> = image.iter().flat_map(|row| row.iter().copied()).collect();

        let input = Tensor::<InferBackend, 1>::from_floats(pixels.as_slice(), &self.device)
            .reshape([1, GRID_PIXELS])
            / 255.0;

        let logits = self.model.forward(input);
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default();

        let index: usize = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let confidence = probs.get(index).copied().unwrap_or(0.0);
        let label = self.vocabulary.decode(index).cloned();

        tracing::debug!("Predicted class {} (confidence {:.4})", index, confidence);
        Ok(Prediction { index, label, confidence })
    }
}
