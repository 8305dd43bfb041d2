// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   model_store.rs — Saving and loading the trained artifacts.
//                    Uses Burn's CompactRecorder for the model
//                    weights and JSON files for the model config
//                    and the label vocabulary. All three live in
//                    one artifact directory, overwritten as a
//                    set on each successful training run.
//
//   metrics.rs     — Per-epoch training metrics appended to a
//                    CSV file next to the artifacts.
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Model artifact saving and loading
pub mod model_store;

/// Training metrics CSV logger
pub mod metrics;
