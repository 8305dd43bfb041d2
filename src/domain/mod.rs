// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types that define the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits
//
// This layer defines what things ARE, not how they work:
// an Example is a labelled 28x28 grid, a Label is a string
// or an integer, a LabelVocabulary is the bijection between
// labels and dense class indices.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One labelled 28x28 pixel grid
pub mod example;

// The label value attached to a grid (string or integer)
pub mod label;

// Bijective label <-> class-index mapping
pub mod vocabulary;

// Core abstractions (traits) that other layers implement
pub mod traits;
