// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads the persisted artifact set fresh on every call (no
// in-memory model cache, so a retrain is always picked up),
// runs one forward pass, and decodes the argmax index through
// the persisted vocabulary. An index the vocabulary cannot
// decode resolves to the "unknown" sentinel while the raw
// index is still returned.

use anyhow::Result;

use crate::infra::model_store::ModelStore;
use crate::ml::inferencer::Inferencer;

/// Sentinel label for an index outside the persisted vocabulary.
pub const UNKNOWN_LABEL: &str = "unknown";

/// What the client gets back from a prediction.
#[derive(Debug, Clone)]
pub struct PredictOutcome {
    /// Raw argmax class index
    pub prediction: usize,

    /// Decoded label, or "unknown"
    pub label: String,

    /// Softmax probability of the winning class
    pub confidence: f32,
}

pub struct PredictUseCase {
    model_dir: String,
}

impl PredictUseCase {
    pub fn new(model_dir: impl Into<String>) -> Self {
        Self { model_dir: model_dir.into() }
    }

    /// Classify one 28x28 grid against the latest trained model.
    /// Errors when no model has been trained yet.
    pub fn execute(&self, image: &[Vec<f32>]) -> Result<PredictOutcome> {
        let model_store = ModelStore::new(&self.model_dir);
        let inferencer  = Inferencer::from_artifacts(&model_store)?;
        let prediction  = inferencer.predict(image)?;

        let label = prediction
            .label
            .map(|l| l.to_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        Ok(PredictOutcome {
            prediction: prediction.index,
            label,
            confidence: prediction.confidence,
        })
    }
}
