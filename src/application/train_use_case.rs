// ============================================================
// Layer 2 — Train Use Case
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Read all stored examples   (Layer 4 - data)
//   Step 2: Build the label vocabulary (Layer 3 - domain)
//   Step 3: Encode samples             (Layer 4 - data)
//   Step 4: Run the training loop      (Layer 5 - ml)
//           and persist the artifacts  (Layer 6 - infra)
//
// The store read happens under a scoped read lock; fitting
// runs outside the lock so concurrent submissions are only
// blocked for the duration of the scan.
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::data::dataset::{GridDataset, GridSample};
use crate::domain::traits::ExampleStore;
use crate::domain::vocabulary::LabelVocabulary;
use crate::infra::model_store::ModelStore;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so the
// same struct can travel from CLI flags into the server state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub model_dir:   String,
    pub epochs:      usize,
    pub batch_size:  usize,
    pub lr:          f64,
    pub hidden_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            model_dir:   "model".to_string(),
            epochs:      20,
            batch_size:  32,
            lr:          1e-3,
            hidden_size: 64,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute<S: ExampleStore>(&self, store: &RwLock<S>) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Read every stored example ─────────────────────────────────
        // Scoped read lock: held only while the file is scanned,
        // not for the whole fit.
        let examples = {
            let guard = store
                .read()
                .map_err(|_| anyhow::anyhow!("Record store lock poisoned"))?;
            guard.load_all()?
        };
        anyhow::ensure!(!examples.is_empty(), "Record store is empty, nothing to train on");
        tracing::info!("Loaded {} examples", examples.len());

        // ── Step 2: Build the label vocabulary ────────────────────────────────
        // Distinct labels in sorted order, so the same label set
        // always yields the same class indices.
        let vocabulary = LabelVocabulary::from_observed(examples.iter().map(|e| &e.label));
        tracing::info!("Vocabulary: {} classes {:?}", vocabulary.len(), vocabulary.labels());

        // ── Step 3: Encode samples ────────────────────────────────────────────
        // A record that parsed but has the wrong grid shape is
        // skipped like any other corrupt record.
        let mut samples = Vec::with_capacity(examples.len());
        for example in &examples {
            if !example.has_valid_shape() {
                tracing::warn!("Skipping stored example with bad shape (label '{}')", example.label);
                continue;
            }
            let target = vocabulary
                .encode(&example.label)
                .ok_or_else(|| anyhow::anyhow!("Label '{}' missing from vocabulary", example.label))?;
            samples.push(GridSample { pixels: example.flat_pixels(), target });
        }
        anyhow::ensure!(!samples.is_empty(), "No usable examples in the record store");

        // ── Step 4: Train and persist ─────────────────────────────────────────
        let dataset = GridDataset::new(samples);
        let model_store = ModelStore::new(&cfg.model_dir);
        run_training(cfg, dataset, &vocabulary, &model_store)?;

        Ok(())
    }
}
