// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// One module per operation the system supports. This layer
// orchestrates the other layers; it contains no ML math, no
// HTTP types, and no direct tensor code.
//
// Rules for this layer:
//   - No Burn code here (that's Layer 5)
//   - No axum or clap types here (Layers 1 and 7)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// Validate and append one labelled example
pub mod add_example_use_case;

// The full training workflow
pub mod train_use_case;

// Load artifacts and classify one grid
pub mod predict_use_case;
