// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists everything prediction needs to a single artifact
// directory:
//
//   model/
//     model.mpk.gz       ← weights (CompactRecorder)
//     model_config.json  ← architecture (hidden size, K)
//     vocabulary.json    ← label ↔ index mapping
//     metrics.csv        ← per-epoch training metrics
//
// Why save the config and vocabulary separately?
//   Loading weights requires rebuilding the exact architecture
//   first, and decoding an argmax index requires the vocabulary
//   that was in force when the model was trained. Persisting
//   both next to the weights keeps the artifact set coherent
//   across process restarts.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip
//   - Type-safe: loading fails if the architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::domain::vocabulary::LabelVocabulary;
use crate::ml::model::{Classifier, ClassifierConfig};

/// Manages the trained-model artifact directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a ModelStore over the given directory,
    /// creating it if it doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save model weights, overwriting any prior artifact.
    pub fn save_model<B: AutodiffBackend>(&self, model: &Classifier<B>) -> Result<()> {
        // Recorder appends its own .mpk.gz extension
        let path = self.dir.join("model");
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;
        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load weights into a freshly built model of the same
    /// architecture. Fails when no model has been trained yet.
    pub fn load_model<B: Backend>(
        &self,
        model:  Classifier<B>,
        device: &B::Device,
    ) -> Result<Classifier<B>> {
        let path = self.dir.join("model");
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model from '{}'. Has the model been trained?",
                    path.display()
                )
            })?;
        Ok(model.load_record(record))
    }

    /// Save the architecture config so prediction can rebuild
    /// the model before loading its weights.
    pub fn save_config(&self, cfg: &ClassifierConfig) -> Result<()> {
        let path = self.dir.join("model_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<ClassifierConfig> {
        let path = self.dir.join("model_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read model config from '{}'. Has the model been trained?",
                    path.display()
                )
            })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save the label vocabulary that was used to encode targets.
    pub fn save_vocabulary(&self, vocab: &LabelVocabulary) -> Result<()> {
        let path = self.dir.join("vocabulary.json");
        let json = serde_json::to_string_pretty(vocab)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_vocabulary(&self) -> Result<LabelVocabulary> {
        let path = self.dir.join("vocabulary.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read vocabulary from '{}'. Has the model been trained?",
                    path.display()
                )
            })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Path for the per-epoch metrics CSV.
    pub fn metrics_path(&self) -> PathBuf {
        self.dir.join("metrics.csv")
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::Label;
    use tempfile::TempDir;

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = ClassifierConfig::new(3);
        store.save_config(&cfg).unwrap();
        let loaded = store.load_config().unwrap();
        assert_eq!(loaded.num_classes, 3);
        assert_eq!(loaded.hidden_size, cfg.hidden_size);
    }

    #[test]
    fn test_vocabulary_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path());
        let labels = vec![Label::from("b"), Label::from("a")];
        let vocab = LabelVocabulary::from_observed(&labels);
        store.save_vocabulary(&vocab).unwrap();
        let loaded = store.load_vocabulary().unwrap();
        assert_eq!(loaded.labels(), vocab.labels());
    }

    #[test]
    fn test_missing_artifacts_error() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path());
        assert!(store.load_config().is_err());
        assert!(store.load_vocabulary().is_err());
    }

    #[test]
    fn test_model_weights_round_trip() {
        type B = burn::backend::Autodiff<burn::backend::NdArray>;
        let device = Default::default();
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path());

        let model: Classifier<B> = ClassifierConfig::new(2).init(&device);
        store.save_model(&model).unwrap();

        let fresh: Classifier<burn::backend::NdArray> =
            ClassifierConfig::new(2).init(&Default::default());
        assert!(store.load_model(fresh, &Default::default()).is_ok());
    }
}
