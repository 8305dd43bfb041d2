// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Fits the classifier on every stored example using Burn's
// DataLoader and the Adam optimiser, then persists the full
// artifact set (weights + config + vocabulary) in one place.
//
// There is no held-out validation set: the contract is to fit
// on the entire record store, so the per-epoch accuracy below
// is measured on the training batches themselves.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::GridBatcher, dataset::GridDataset};
use crate::domain::vocabulary::LabelVocabulary;
use crate::infra::{
    metrics::{EpochMetrics, MetricsLogger},
    model_store::ModelStore,
};
use crate::ml::model::{Classifier, ClassifierConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

pub fn run_training(
    cfg:         &TrainConfig,
    dataset:     GridDataset,
    vocabulary:  &LabelVocabulary,
    model_store: &ModelStore,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    anyhow::ensure!(dataset.sample_count() > 0, "Training set is empty");

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = ClassifierConfig::new(vocabulary.len())
        .with_hidden_size(cfg.hidden_size);
    let mut model: Classifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} -> {} -> {} classes",
        crate::domain::example::GRID_PIXELS,
        cfg.hidden_size,
        vocabulary.len(),
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Shuffled training data loader ─────────────────────────────────────────
    let sample_count = dataset.sample_count();
    let batcher = GridBatcher::<TrainBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(dataset);

    let metrics = MetricsLogger::start(model_store.metrics_path())?;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;

        for batch in loader.iter() {
            let targets = batch.targets.clone();
            let (loss, logits) = model.forward_loss(batch.images, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;

            // argmax(1) returns shape [batch, 1] — squeeze to [batch]
            // before comparing with the integer targets
            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            let batch_correct: i64 = predicted
                .equal(targets)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let accuracy = correct as f64 / sample_count as f64;

        tracing::info!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.1}%",
            epoch, cfg.epochs, avg_loss, accuracy * 100.0,
        );
        metrics.log(&EpochMetrics { epoch, loss: avg_loss, accuracy })?;
    }

    // ── Persist the artifact set ──────────────────────────────────────────────
    // Only reached after every epoch completed, so a failed run
    // never overwrites the previous artifacts.
    model_store.save_model(&model)?;
    model_store.save_config(&model_cfg)?;
    model_store.save_vocabulary(vocabulary)?;
    tracing::info!("Training complete, artifacts saved");

    Ok(())
}
