// ============================================================
// Layer 7 — HTTP Request Handlers
// ============================================================
// Axum handlers for the four endpoints. Each handler converts
// the JSON payload into domain types, delegates to a use case,
// and maps the outcome onto the response contract. Training
// runs on a blocking worker thread so the async runtime is
// never stalled by model fitting.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{
    add_example_use_case::{AddExampleError, AddExampleUseCase},
    predict_use_case::PredictUseCase,
    train_use_case::TrainUseCase,
};
use crate::domain::{example::Example, label::Label};
use crate::server::{state::AppState, ApiError};

/// Generate a request id for log correlation.
fn request_id() -> String {
    format!("req-{:016x}", rand::random::<u64>())
}

// ─── Request / Response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddExampleRequest {
    pub image: Vec<Vec<f32>>,
    pub label: Label,
}

#[derive(Debug, Serialize)]
pub struct AddExampleResponse {
    /// Per-label example counts after this submission
    pub labels: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub image: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Raw argmax class index
    pub prediction: usize,

    /// Decoded label, or "unknown"
    pub label: String,
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/add-example
/// 200 with current label counts, 400 on a malformed grid,
/// 500 when the append fails.
pub async fn add_example(
    State(state): State<AppState>,
    Json(payload): Json<AddExampleRequest>,
) -> Result<Json<AddExampleResponse>, ApiError> {
    let req_id = request_id();
    let example = Example::new(payload.image, payload.label);

    match AddExampleUseCase::execute(&state.store, example) {
        Ok(labels) => Ok(Json(AddExampleResponse { labels })),
        Err(AddExampleError::InvalidShape) => {
            Err(ApiError::Validation("Image must be a 28x28 grid".to_string()))
        }
        Err(AddExampleError::Storage(e)) => Err(ApiError::internal(&req_id, e)),
    }
}

/// POST /api/train
/// Blocks until fitting finishes. 200 plain text on success,
/// 500 on any failure (including an empty store).
pub async fn train(State(state): State<AppState>) -> Result<String, ApiError> {
    let req_id = request_id();
    tracing::info!("[{req_id}] training requested");

    let use_case = TrainUseCase::new(state.train.clone());
    let store = state.store.clone();

    // Model fitting is CPU-bound; hand it to the blocking pool.
    let outcome = tokio::task::spawn_blocking(move || use_case.execute(store.as_ref()))
        .await
        .map_err(|e| ApiError::internal(&req_id, anyhow::anyhow!("Training task panicked: {e}")))?;

    match outcome {
        Ok(()) => Ok("Model trained and saved".to_string()),
        Err(e) => Err(ApiError::internal(&req_id, e)),
    }
}

/// POST /api/predict
/// 200 with the class index and decoded label, 500 on failure
/// (including no trained model yet).
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let req_id = request_id();

    let use_case = PredictUseCase::new(state.train.model_dir.clone());
    let outcome = use_case
        .execute(&payload.image)
        .map_err(|e| ApiError::internal(&req_id, e))?;

    tracing::info!(
        "[{req_id}] predicted class {} '{}' (confidence {:.4})",
        outcome.prediction,
        outcome.label,
        outcome.confidence,
    );
    Ok(Json(PredictResponse { prediction: outcome.prediction, label: outcome.label }))
}

/// POST /api/hello — liveness check.
pub async fn hello() -> &'static str {
    "Hello from server!"
}
