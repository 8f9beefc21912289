//! Trains the engagement and reach regression forests on the synthetic
//! campaign dataset and writes both JSON artifacts to the model directory.
//!
//! Usage: `train_models [model_dir]` (defaults to `models/`).

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use brandpulse_api::services::dataset::{generate_dataset, CampaignSample};
use brandpulse_api::services::encoder::FeatureSchema;
use brandpulse_api::services::forest::{ForestParams, ForestRegressor};
use brandpulse_api::services::predictor::{
    mean_absolute_error, LearnedPredictor, ENGAGEMENT_MODEL_FILE, REACH_MODEL_FILE,
};

const DATASET_ROWS: usize = 25_000;
const DATASET_SEED: u64 = 42;
/// Fraction of rows held out for the reported MAE.
const HOLDOUT_FRACTION: f64 = 0.2;

fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let model_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models"));
    std::fs::create_dir_all(&model_dir)?;

    tracing::info!(rows = DATASET_ROWS, seed = DATASET_SEED, "generating dataset");
    let samples = generate_dataset(DATASET_ROWS, DATASET_SEED);

    let holdout = (samples.len() as f64 * HOLDOUT_FRACTION) as usize;
    let (test, train) = samples.split_at(holdout);

    let engagement_params = ForestParams {
        n_trees: 150,
        max_depth: 12,
        ..ForestParams::default()
    };
    let reach_params = ForestParams {
        n_trees: 200,
        max_depth: 14,
        ..ForestParams::default()
    };

    tracing::info!(
        train_rows = train.len(),
        engagement_trees = engagement_params.n_trees,
        reach_trees = reach_params.n_trees,
        "fitting forests"
    );
    let (_, engagement_artifact, reach_artifact) =
        LearnedPredictor::train(train, &engagement_params, &reach_params)?;

    let (engagement_mae, reach_mae) = holdout_mae(
        test,
        &engagement_artifact.forest,
        &reach_artifact.forest,
    );
    tracing::info!(engagement_mae, reach_mae, "held-out error");

    let engagement_path = model_dir.join(ENGAGEMENT_MODEL_FILE);
    engagement_artifact.save(&engagement_path)?;
    tracing::info!(path = %engagement_path.display(), "engagement model saved");

    let reach_path = model_dir.join(REACH_MODEL_FILE);
    reach_artifact.save(&reach_path)?;
    tracing::info!(path = %reach_path.display(), "reach model saved");

    Ok(())
}

fn holdout_mae(
    test: &[CampaignSample],
    engagement: &ForestRegressor,
    reach: &ForestRegressor,
) -> (f64, f64) {
    let schema = FeatureSchema::training();
    let features: Vec<Vec<f64>> = test.iter().map(|s| schema.encode(&s.attrs)).collect();
    let engagement_targets: Vec<f64> = test.iter().map(|s| s.engagement).collect();
    let reach_targets: Vec<f64> = test.iter().map(|s| s.reach).collect();

    (
        mean_absolute_error(engagement, &features, &engagement_targets),
        mean_absolute_error(reach, &features, &reach_targets),
    )
}
