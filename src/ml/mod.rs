// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly, except the data
// layer's Dataset/Batcher glue.
//
// What's in this layer:
//
//   model.rs      — The classifier architecture:
//                   flatten(784) → dense(64, relu) → dense(K).
//                   The model outputs logits; cross-entropy is
//                   applied against integer class targets, and
//                   softmax only at inference time.
//
//   trainer.rs    — The training loop: Adam optimiser, shuffled
//                   mini-batches, per-epoch loss/accuracy, and a
//                   single artifact save after the final epoch.
//
//   inferencer.rs — Loads the persisted artifacts, runs one
//                   forward pass, returns argmax index + label.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Dense classifier architecture
pub mod model;

/// Training loop with metrics and artifact persistence
pub mod trainer;

/// Inference engine — loads artifacts and predicts labels
pub mod inferencer;
