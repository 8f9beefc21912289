use std::path::PathBuf;
use std::sync::Arc;

use crate::services::PredictionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub prediction: Arc<PredictionService>,
}

impl AppState {
    /// Creates application state serving model artifacts from `model_dir`.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            prediction: Arc::new(PredictionService::new(model_dir)),
        }
    }
}
