// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:    the epoch number (1, 2, 3, ...)
//   - loss:     average cross-entropy loss over the epoch
//   - accuracy: fraction of training examples classified correctly
//
// Example CSV output:
//   epoch,loss,accuracy
//   1,1.742311,0.350000
//   2,1.103952,0.575000
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

/// One row of metrics for a single training epoch.
#[derive(Debug, Clone)]
pub struct EpochMetrics {
    pub epoch:    usize,
    pub loss:     f64,
    pub accuracy: f64,
}

/// Appends epoch metrics rows to a CSV file.
pub struct MetricsLogger {
    path: PathBuf,
}

impl MetricsLogger {
    /// Start a fresh metrics file for this training run,
    /// replacing any file from a previous run.
    pub fn start(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::write(&path, "epoch,loss,accuracy\n")
            .with_context(|| format!("Cannot create metrics file '{}'", path.display()))?;
        Ok(Self { path })
    }

    /// Append one epoch row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Cannot open metrics file '{}'", self.path.display()))?;
        writeln!(file, "{},{:.6},{:.6}", m.epoch, m.loss, m.accuracy)?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        let logger = MetricsLogger::start(&path).unwrap();
        logger.log(&EpochMetrics { epoch: 1, loss: 2.5, accuracy: 0.25 }).unwrap();
        logger.log(&EpochMetrics { epoch: 2, loss: 1.5, accuracy: 0.5 }).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines[0], "epoch,loss,accuracy");
        assert!(lines[1].starts_with("1,2.5"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_start_truncates_previous_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        {
            let logger = MetricsLogger::start(&path).unwrap();
            logger.log(&EpochMetrics { epoch: 1, loss: 9.0, accuracy: 0.0 }).unwrap();
        }
        let _fresh = MetricsLogger::start(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 1);
    }
}
