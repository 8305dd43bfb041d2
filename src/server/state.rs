// Shared state handed to every handler. The record store sits
// behind a reader-writer lock: appends take the write lock,
// training's full read takes the read lock. Cloning the state
// clones the Arc, not the store.

use std::sync::{Arc, RwLock};

use crate::application::train_use_case::TrainConfig;
use crate::data::store::JsonlStore;

#[derive(Clone)]
pub struct AppState {
    /// The append-only record store, shared across requests
    pub store: Arc<RwLock<JsonlStore>>,

    /// Hyperparameters and artifact location for train/predict
    pub train: TrainConfig,
}

impl AppState {
    pub fn new(store: JsonlStore, train: TrainConfig) -> Self {
        Self { store: Arc::new(RwLock::new(store)), train }
    }
}
