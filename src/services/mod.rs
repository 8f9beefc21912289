pub mod dataset;
pub mod encoder;
pub mod fallback;
pub mod forest;
pub mod prediction;
pub mod predictor;
pub mod recommendations;

pub use fallback::AnalyticFallback;
pub use prediction::PredictionService;
pub use predictor::{CampaignPredictor, LearnedPredictor, PredictorError};
