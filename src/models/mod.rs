mod attributes;
mod prediction;

pub use attributes::{CampaignAttributes, ContentType, Industry, Platform};
pub use prediction::{Effectiveness, PerformanceReport, Prediction, PredictionMode};
