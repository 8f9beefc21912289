use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CampaignAttributes, Effectiveness, Prediction, PredictionMode};
use crate::services::dataset::CampaignSample;
use crate::services::encoder::FeatureSchema;
use crate::services::forest::{ForestError, ForestParams, ForestRegressor};

/// Fixed artifact filename for the engagement model.
pub const ENGAGEMENT_MODEL_FILE: &str = "engagement-model.json";
/// Fixed artifact filename for the reach model.
pub const REACH_MODEL_FILE: &str = "reach-model.json";

/// Error types for the prediction stage.
///
/// `ModelUnavailable` is a load-time condition and pins the process to the
/// analytic fallback; `Runtime` is a per-request numeric failure and only
/// falls back for that request.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("model artifact unavailable: {0}")]
    ModelUnavailable(String),
    #[error("prediction failed: {0}")]
    Runtime(#[from] ForestError),
}

/// A predictor that can score a campaign configuration.
///
/// Two implementations exist: the learned random-forest path and the
/// analytic fallback estimator. The façade selects between them; callers
/// never need to know which one ran beyond the reported mode.
pub trait CampaignPredictor: Send + Sync {
    fn predict(&self, attrs: &CampaignAttributes) -> Result<Prediction, PredictorError>;

    fn mode(&self) -> PredictionMode;
}

/// Serialized form of one trained regression pipeline: the feature schema the
/// forest was fit against plus the forest itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub target: String,
    pub schema: FeatureSchema,
    pub forest: ForestRegressor,
    pub trained_at: DateTime<Utc>,
    /// Held-out mean absolute error recorded at training time.
    pub mae: f64,
}

impl ModelArtifact {
    pub fn save(&self, path: &Path) -> Result<(), PredictorError> {
        let json = serde_json::to_string(self)
            .map_err(|e| PredictorError::ModelUnavailable(format!("serialize {}: {e}", self.target)))?;
        fs::write(path, json)
            .map_err(|e| PredictorError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self, PredictorError> {
        let json = fs::read_to_string(path)
            .map_err(|e| PredictorError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&json)
            .map_err(|e| PredictorError::ModelUnavailable(format!("{}: {e}", path.display())))
    }
}

/// The trained-model prediction path: encoder plus two regression forests.
#[derive(Debug)]
pub struct LearnedPredictor {
    schema: FeatureSchema,
    engagement: ForestRegressor,
    reach: ForestRegressor,
}

impl LearnedPredictor {
    /// Loads both model artifacts from a directory.
    ///
    /// A missing file, a malformed artifact, or a schema that no longer
    /// matches the inference encoder are all `ModelUnavailable`: the column
    /// order is the contract, and a silently misaligned dot product is worse
    /// than falling back.
    pub fn load(model_dir: &Path) -> Result<Self, PredictorError> {
        let engagement = ModelArtifact::load(&model_dir.join(ENGAGEMENT_MODEL_FILE))?;
        let reach = ModelArtifact::load(&model_dir.join(REACH_MODEL_FILE))?;

        let schema = FeatureSchema::training();
        for artifact in [&engagement, &reach] {
            if artifact.schema != schema {
                return Err(PredictorError::ModelUnavailable(format!(
                    "{} artifact was trained against a different feature schema",
                    artifact.target
                )));
            }
            if artifact.forest.n_features() != schema.width() {
                return Err(PredictorError::ModelUnavailable(format!(
                    "{} artifact expects {} features, schema encodes {}",
                    artifact.target,
                    artifact.forest.n_features(),
                    schema.width()
                )));
            }
        }

        Ok(Self {
            schema,
            engagement: engagement.forest,
            reach: reach.forest,
        })
    }

    /// Assembles a predictor from already-fitted parts, bypassing the
    /// artifact consistency checks that `load` enforces.
    #[cfg(test)]
    pub(crate) fn from_parts(
        schema: FeatureSchema,
        engagement: ForestRegressor,
        reach: ForestRegressor,
    ) -> Self {
        Self {
            schema,
            engagement,
            reach,
        }
    }

    /// Trains both forests on labeled samples and returns the predictor with
    /// its serializable artifacts.
    pub fn train(
        samples: &[CampaignSample],
        engagement_params: &ForestParams,
        reach_params: &ForestParams,
    ) -> Result<(Self, ModelArtifact, ModelArtifact), PredictorError> {
        let schema = FeatureSchema::training();
        let features: Vec<Vec<f64>> = samples.iter().map(|s| schema.encode(&s.attrs)).collect();
        let engagement_targets: Vec<f64> = samples.iter().map(|s| s.engagement).collect();
        let reach_targets: Vec<f64> = samples.iter().map(|s| s.reach).collect();

        let engagement = ForestRegressor::fit(&features, &engagement_targets, engagement_params)?;
        let reach = ForestRegressor::fit(&features, &reach_targets, reach_params)?;

        let engagement_artifact = ModelArtifact {
            target: "engagement".to_string(),
            schema: schema.clone(),
            forest: engagement.clone(),
            trained_at: Utc::now(),
            mae: mean_absolute_error(&engagement, &features, &engagement_targets),
        };
        let reach_artifact = ModelArtifact {
            target: "reach".to_string(),
            schema: schema.clone(),
            forest: reach.clone(),
            trained_at: Utc::now(),
            mae: mean_absolute_error(&reach, &features, &reach_targets),
        };

        Ok((
            Self {
                schema,
                engagement,
                reach,
            },
            engagement_artifact,
            reach_artifact,
        ))
    }
}

/// In-sample MAE; the trainer binary reports held-out MAE separately.
pub fn mean_absolute_error(
    forest: &ForestRegressor,
    features: &[Vec<f64>],
    targets: &[f64],
) -> f64 {
    let mut total = 0.0;
    let mut n = 0usize;
    for (row, target) in features.iter().zip(targets) {
        if let Ok(predicted) = forest.predict(row) {
            total += (predicted - target).abs();
            n += 1;
        }
    }
    if n == 0 {
        0.0
    } else {
        total / n as f64
    }
}

impl CampaignPredictor for LearnedPredictor {
    fn predict(&self, attrs: &CampaignAttributes) -> Result<Prediction, PredictorError> {
        let vector = self.schema.encode(attrs);

        let engagement_rate = self.engagement.predict(&vector)?;
        let engagement_rate = (engagement_rate * 100.0).round() / 100.0;
        let reach = self.reach.predict(&vector)?.max(0.0) as u64;

        Ok(Prediction {
            engagement_rate,
            effectiveness: Effectiveness::from_learned_rate(engagement_rate),
            reach,
        })
    }

    fn mode(&self) -> PredictionMode {
        PredictionMode::Live
    }
}
