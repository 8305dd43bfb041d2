// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw JSONL record file and the
// tensor batches fed to the training loop:
//
//   data.jsonl (one Example per line)
//       │
//       ▼
//   JsonlStore         → append-only persistence + label counts
//       │
//       ▼
//   GridDataset        → implements Burn's Dataset trait
//       │
//       ▼
//   GridBatcher        → stacks samples into [N, 784] tensors
//       │
//       ▼
//   DataLoader         → feeds shuffled batches to the trainer
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Append-only JSONL record store with incremental label counts
pub mod store;

/// Implements Burn's Dataset trait over encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
