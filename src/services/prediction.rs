use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::models::{CampaignAttributes, PerformanceReport, Prediction, PredictionMode};
use crate::services::fallback::AnalyticFallback;
use crate::services::predictor::{CampaignPredictor, LearnedPredictor};
use crate::services::recommendations::{
    RecommendationEngine, FALLBACK_RECOMMENDATION_CAP, LIVE_RECOMMENDATION_CAP,
};

/// Single entry point for performance prediction.
///
/// Tries the learned-model path first and degrades to the analytic fallback,
/// so the worst case is a less accurate but still valid report, never an
/// error. The trained models are loaded at most once per process: concurrent
/// first requests race on the `OnceCell`, exactly one load proceeds, and a
/// failed load pins the process to fallback mode without per-request retries.
pub struct PredictionService {
    model_dir: PathBuf,
    learned: OnceCell<Option<Arc<LearnedPredictor>>>,
    fallback: AnalyticFallback,
}

impl PredictionService {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            learned: OnceCell::new(),
            fallback: AnalyticFallback,
        }
    }

    /// Service with the learned path already resolved, skipping disk load.
    #[cfg(test)]
    fn with_preloaded(predictor: LearnedPredictor) -> Self {
        Self {
            model_dir: PathBuf::new(),
            learned: OnceCell::new_with(Some(Some(Arc::new(predictor)))),
            fallback: AnalyticFallback,
        }
    }

    async fn learned(&self) -> Option<&Arc<LearnedPredictor>> {
        self.learned
            .get_or_init(|| async {
                // Artifact deserialization is blocking file I/O; keep it off
                // the runtime workers.
                let model_dir = self.model_dir.clone();
                let loaded =
                    tokio::task::spawn_blocking(move || LearnedPredictor::load(&model_dir)).await;

                match loaded {
                    Ok(Ok(predictor)) => {
                        tracing::info!(
                            model_dir = %self.model_dir.display(),
                            "trained models loaded"
                        );
                        Some(Arc::new(predictor))
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(
                            error = %e,
                            model_dir = %self.model_dir.display(),
                            "trained models unavailable; serving analytic fallback"
                        );
                        None
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "model load task failed; serving analytic fallback"
                        );
                        None
                    }
                }
            })
            .await
            .as_ref()
    }

    /// Forces the one-time model load and reports which path will serve.
    pub async fn ensure_loaded(&self) -> PredictionMode {
        match self.learned().await {
            Some(_) => PredictionMode::Live,
            None => PredictionMode::Demo,
        }
    }

    /// Predicts performance and synthesizes recommendations for one campaign.
    pub async fn predict_and_recommend(&self, attrs: &CampaignAttributes) -> PerformanceReport {
        let (prediction, mode) = self.predict(attrs).await;

        let cap = match mode {
            PredictionMode::Live => LIVE_RECOMMENDATION_CAP,
            PredictionMode::Demo => FALLBACK_RECOMMENDATION_CAP,
        };
        let recommendations = RecommendationEngine::with_cap(cap).synthesize(
            attrs,
            prediction.engagement_rate,
            prediction.reach,
        );

        tracing::debug!(
            platform = %attrs.platform,
            mode = mode.as_str(),
            engagement = prediction.engagement_rate,
            reach = prediction.reach,
            "campaign scored"
        );

        PerformanceReport::new(prediction, attrs.platform, recommendations, mode)
    }

    async fn predict(&self, attrs: &CampaignAttributes) -> (Prediction, PredictionMode) {
        if let Some(model) = self.learned().await {
            match model.predict(attrs) {
                Ok(prediction) => return (prediction, model.mode()),
                Err(e) => {
                    // Per-request failure: fall back for this request only,
                    // the cached models stay live for subsequent ones.
                    tracing::warn!(error = %e, "learned prediction failed; using fallback");
                }
            }
        }

        (self.fallback.estimate(attrs), self.fallback.mode())
    }
}
