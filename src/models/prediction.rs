use serde::{Deserialize, Serialize};

use super::Platform;

/// Coarse banding of a continuous engagement prediction.
///
/// The learned-model path uses the 3-band scale and the analytic fallback
/// uses the finer 4-band scale. The two threshold sets are intentionally
/// different: fallback engagement numbers run on a different scale, so the
/// asymmetry is preserved rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    Low,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl Effectiveness {
    /// Banding for engagement rates produced by the trained models.
    pub fn from_learned_rate(rate: f64) -> Self {
        if rate >= 5.0 {
            Effectiveness::High
        } else if rate >= 3.0 {
            Effectiveness::Medium
        } else {
            Effectiveness::Low
        }
    }

    /// Banding for engagement rates produced by the analytic fallback.
    pub fn from_fallback_rate(rate: f64) -> Self {
        if rate >= 4.5 {
            Effectiveness::High
        } else if rate >= 3.0 {
            Effectiveness::MediumHigh
        } else if rate >= 2.0 {
            Effectiveness::Medium
        } else {
            Effectiveness::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effectiveness::Low => "Low",
            Effectiveness::Medium => "Medium",
            Effectiveness::MediumHigh => "Medium-High",
            Effectiveness::High => "High",
        }
    }
}

/// Which prediction path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Trained regression models served the request.
    Live,
    /// The analytic fallback estimator served the request.
    Demo,
}

impl PredictionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMode::Live => "live",
            PredictionMode::Demo => "demo",
        }
    }
}

/// Output of the predictor stage, before recommendation synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Engagement rate in percentage points, e.g. 3.82.
    pub engagement_rate: f64,
    pub effectiveness: Effectiveness,
    /// Predicted unique impressions.
    pub reach: u64,
}

/// Response shape returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub predicted_reach: u64,
    /// Percentage-formatted engagement rate with two decimals, e.g. "3.82%".
    pub engagement_rate: String,
    pub effectiveness: Effectiveness,
    pub best_posting_time: String,
    /// Priority-ordered, capped recommendation list. Never empty.
    pub recommendations: Vec<String>,
    pub mode: PredictionMode,
}

impl PerformanceReport {
    pub fn new(
        prediction: Prediction,
        platform: Platform,
        recommendations: Vec<String>,
        mode: PredictionMode,
    ) -> Self {
        Self {
            predicted_reach: prediction.reach,
            engagement_rate: format!("{:.2}%", prediction.engagement_rate),
            effectiveness: prediction.effectiveness,
            best_posting_time: platform.posting_window().to_string(),
            recommendations,
            mode,
        }
    }
}
