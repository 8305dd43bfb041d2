// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The storage seam. The application layer talks to the record
// store through this trait, so the JSONL file implementation
// can be swapped (e.g. for an in-memory store in tests)
// without touching any use case.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::collections::BTreeMap;

use crate::domain::example::Example;

// ─── ExampleStore ─────────────────────────────────────────────────────────────
/// An ordered, append-only sequence of labelled examples.
///
/// Implementations:
///   - JsonlStore -> one JSON record per line in a single file
pub trait ExampleStore {
    /// Append one example. Durable before returning: a successful
    /// append must survive a process crash right after the call.
    fn append(&mut self, example: &Example) -> Result<()>;

    /// Read every stored example in insertion order.
    /// Corrupt or empty lines are skipped, not fatal.
    fn load_all(&self) -> Result<Vec<Example>>;

    /// Current per-label counts, keyed by the label's string form.
    fn label_counts(&self) -> BTreeMap<String, u64>;

    /// Number of readable examples currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
