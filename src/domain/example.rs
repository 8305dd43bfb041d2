// ============================================================
// Layer 3 — Example Domain Type
// ============================================================
// One labelled drawing: a 28x28 grid of pixel values in
// [0, 255] plus its label. Examples are immutable once
// appended to the store - never updated, never deleted.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

/// Side length of a valid input grid.
pub const GRID_SIDE: usize = 28;

/// Number of pixels after flattening a valid grid.
pub const GRID_PIXELS: usize = GRID_SIDE * GRID_SIDE;

/// One labelled 28x28 pixel grid as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Row-major pixel grid, values expected in [0, 255]
    pub image: Vec<Vec<f32>>,

    /// The class this drawing belongs to
    pub label: Label,
}

impl Example {
    pub fn new(image: Vec<Vec<f32>>, label: impl Into<Label>) -> Self {
        Self { image, label: label.into() }
    }

    /// A grid is valid when it has exactly 28 rows of exactly
    /// 28 columns each. Anything else is rejected at ingestion.
    pub fn has_valid_shape(&self) -> bool {
        grid_is_valid(&self.image)
    }

    /// Flatten the grid row-major into a single pixel vector.
    /// Values are left in their raw [0, 255] range; normalisation
    /// happens in the batcher so training and prediction share it.
    pub fn flat_pixels(&self) -> Vec<f32> {
        self.image.iter().flat_map(|row| row.iter().copied()).collect()
    }
}

/// Shape check shared by ingestion and prediction.
pub fn grid_is_valid(image: &[Vec<f32>]) -> bool {
    image.len() == GRID_SIDE && image.iter().all(|row| row.len() == GRID_SIDE)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Vec<Vec<f32>> {
        vec![vec![0.0; cols]; rows]
    }

    #[test]
    fn test_valid_grid_accepted() {
        let ex = Example::new(grid(28, 28), "aleph");
        assert!(ex.has_valid_shape());
    }

    #[test]
    fn test_wrong_row_count_rejected() {
        let ex = Example::new(grid(27, 28), "aleph");
        assert!(!ex.has_valid_shape());
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let mut image = grid(28, 28);
        image[13] = vec![0.0; 29];
        let ex = Example::new(image, "aleph");
        assert!(!ex.has_valid_shape());
    }

    #[test]
    fn test_empty_grid_rejected() {
        let ex = Example::new(Vec::new(), "aleph");
        assert!(!ex.has_valid_shape());
    }

    #[test]
    fn test_flat_pixels_is_row_major() {
        let mut image = grid(28, 28);
        image[0][1] = 9.0;
        image[1][0] = 5.0;
        let ex = Example::new(image, 0);
        let flat = ex.flat_pixels();
        assert_eq!(flat.len(), GRID_PIXELS);
        assert_eq!(flat[1], 9.0);
        assert_eq!(flat[GRID_SIDE], 5.0);
    }

    #[test]
    fn test_jsonl_round_trip() {
        let ex = Example::new(grid(28, 28), "gimel");
        let line = serde_json::to_string(&ex).unwrap();
        let back: Example = serde_json::from_str(&line).unwrap();
        assert!(back.has_valid_shape());
        assert_eq!(back.label, ex.label);
    }
}
