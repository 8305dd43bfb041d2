// ============================================================
// Layer 2 — Add Example Use Case
// ============================================================
// Validates a submitted example and appends it to the record
// store under the write lock, then returns the current
// per-label counts.
//
// The shape error is typed (not anyhow) so the HTTP layer can
// map it to 400 while storage failures map to 500.

use std::{collections::BTreeMap, sync::RwLock};
use thiserror::Error;

use crate::domain::example::Example;
use crate::domain::traits::ExampleStore;

#[derive(Debug, Error)]
pub enum AddExampleError {
    /// The submitted image is not a 28x28 grid — client error
    #[error("Image must be a 28x28 grid")]
    InvalidShape,

    /// Anything that went wrong persisting the example
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct AddExampleUseCase;

impl AddExampleUseCase {
    /// Validate, append, and report counts. An invalid shape
    /// returns before anything touches the store.
    pub fn execute<S: ExampleStore>(
        store:   &RwLock<S>,
        example: Example,
    ) -> Result<BTreeMap<String, u64>, AddExampleError> {
        if !example.has_valid_shape() {
            return Err(AddExampleError::InvalidShape);
        }

        let mut guard = store
            .write()
            .map_err(|_| anyhow::anyhow!("Record store lock poisoned"))?;
        guard.append(&example)?;

        tracing::debug!("Stored example with label '{}'", example.label);
        Ok(guard.label_counts())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::JsonlStore;
    use tempfile::TempDir;

    fn grid(rows: usize) -> Vec<Vec<f32>> {
        vec![vec![0.0; 28]; rows]
    }

    #[test]
    fn test_valid_example_is_counted() {
        let dir = TempDir::new().unwrap();
        let store = RwLock::new(JsonlStore::open(dir.path().join("data.jsonl")).unwrap());

        let counts =
            AddExampleUseCase::execute(&store, Example::new(grid(28), "a")).unwrap();
        assert_eq!(counts.get("a"), Some(&1));

        let counts =
            AddExampleUseCase::execute(&store, Example::new(grid(28), "a")).unwrap();
        assert_eq!(counts.get("a"), Some(&2));
    }

    #[test]
    fn test_invalid_shape_is_rejected_without_append() {
        let dir = TempDir::new().unwrap();
        let store = RwLock::new(JsonlStore::open(dir.path().join("data.jsonl")).unwrap());

        let result = AddExampleUseCase::execute(&store, Example::new(grid(27), "a"));
        assert!(matches!(result, Err(AddExampleError::InvalidShape)));
        assert!(store.read().unwrap().is_empty());
    }
}
