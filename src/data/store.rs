// ============================================================
// Layer 4 — JSONL Example Store
// ============================================================
// Persists examples as one JSON record per line in a single
// append-only file. Appends are line-atomic and flushed before
// the call returns, so a record that was acknowledged is on
// disk. Records are never updated or deleted.
//
// Reading tolerates damage: an empty or unparsable line is
// logged and skipped rather than failing the whole read, so
// one corrupt record cannot take training down.
//
// Per-label counts are kept in memory and updated on every
// append. The file is scanned once when the store is opened;
// after that, counting is O(1) per write.
//
// Reference: Rust Book §9 (Error Handling), §12 (File I/O)

use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::example::Example;
use crate::domain::label::Label;
use crate::domain::traits::ExampleStore;

/// Append-only newline-delimited JSON store for examples.
pub struct JsonlStore {
    /// Path to the record file, e.g. `data.jsonl`
    path: PathBuf,

    /// Incrementally maintained per-label counts
    counts: BTreeMap<Label, u64>,

    /// Number of readable records (corrupt lines excluded)
    records: usize,
}

impl JsonlStore {
    /// Open a store at the given path, creating parent directories
    /// if needed. A missing file means an empty store. Existing
    /// records are scanned once to seed the label counts.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create store directory '{}'", parent.display()))?;
            }
        }

        let mut store = Self { path, counts: BTreeMap::new(), records: 0 };
        for example in store.load_all()? {
            *store.counts.entry(example.label).or_insert(0) += 1;
            store.records += 1;
        }

        tracing::debug!(
            "Opened store '{}': {} records, {} labels",
            store.path.display(),
            store.records,
            store.counts.len(),
        );
        Ok(store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ExampleStore for JsonlStore {
    /// Serialise the example and append it as one line.
    /// The file handle is opened per call (appends are rare and
    /// small) and flushed before returning.
    fn append(&mut self, example: &Example) -> Result<()> {
        let mut line = serde_json::to_string(example)
            .context("Cannot serialise example")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Cannot open store file '{}'", self.path.display()))?;

        file.write_all(line.as_bytes())
            .with_context(|| format!("Cannot append to '{}'", self.path.display()))?;
        file.flush()?;

        *self.counts.entry(example.label.clone()).or_insert(0) += 1;
        self.records += 1;
        Ok(())
    }

    /// Read every record in insertion order, skipping lines that
    /// are empty or fail to parse.
    fn load_all(&self) -> Result<Vec<Example>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // No file yet means no records yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Cannot read store file '{}'", self.path.display())
                })
            }
        };

        let mut examples = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Example>(line) {
                Ok(example) => examples.push(example),
                Err(e) => {
                    tracing::warn!(
                        "Skipping corrupt record at {}:{}: {e}",
                        self.path.display(),
                        lineno + 1,
                    );
                }
            }
        }
        Ok(examples)
    }

    fn label_counts(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(label, &count)| (label.to_string(), count))
            .collect()
    }

    fn len(&self) -> usize {
        self.records
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn grid() -> Vec<Vec<f32>> {
        vec![vec![0.0; 28]; 28]
    }

    fn open_store(dir: &TempDir) -> JsonlStore {
        JsonlStore::open(dir.path().join("data.jsonl")).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.is_empty());
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.label_counts().is_empty());
    }

    #[test]
    fn test_append_and_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.append(&Example::new(grid(), "a")).unwrap();
        store.append(&Example::new(grid(), "b")).unwrap();
        store.append(&Example::new(grid(), "a")).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].label, Label::from("a"));
        assert_eq!(loaded[1].label, Label::from("b"));
        assert_eq!(loaded[2].label, Label::from("a"));
    }

    #[test]
    fn test_counts_match_true_frequencies() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        for _ in 0..5 {
            store.append(&Example::new(grid(), "0")).unwrap();
        }
        for _ in 0..3 {
            store.append(&Example::new(grid(), "1")).unwrap();
        }

        let counts = store.label_counts();
        assert_eq!(counts.get("0"), Some(&5));
        assert_eq!(counts.get("1"), Some(&3));
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_counts_seeded_on_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.jsonl");
        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.append(&Example::new(grid(), "x")).unwrap();
            store.append(&Example::new(grid(), "x")).unwrap();
        }
        let reopened = JsonlStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.label_counts().get("x"), Some(&2));
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.jsonl");
        let mut store = JsonlStore::open(&path).unwrap();
        store.append(&Example::new(grid(), "ok")).unwrap();

        // Damage the file by hand: garbage line plus a blank line
        let mut raw = fs::read_to_string(&path).unwrap();
        raw.push_str("{not json\n\n");
        fs::write(&path, raw).unwrap();
        store.append(&Example::new(grid(), "ok")).unwrap();

        let reopened = JsonlStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.label_counts().get("ok"), Some(&2));
    }
}
