use crate::models::{
    CampaignAttributes, ContentType, Effectiveness, Industry, Platform, Prediction, PredictionMode,
};
use crate::services::predictor::{CampaignPredictor, PredictorError};

/// Deterministic closed-form estimator used when no trained model is present.
///
/// Pure lookup arithmetic over platform base rates, a content-type multiplier
/// and an industry factor, with a 1.4x reach boost for influencer posts. No
/// I/O and no learned state, so it is always available. Unknown values take
/// the Instagram / 1.0 / General defaults rather than erroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticFallback;

/// Base reach and engagement per platform.
fn platform_base(platform: Platform) -> (f64, f64) {
    match platform {
        Platform::Instagram => (12000.0, 3.8),
        Platform::TikTok => (25000.0, 5.2),
        Platform::YouTube => (8000.0, 2.5),
        Platform::LinkedIn => (5000.0, 2.1),
        Platform::Facebook => (6000.0, 1.8),
        Platform::Twitter => (7500.0, 1.5),
        // Default platform rates for anything unrecognized.
        Platform::Other => (12000.0, 3.8),
    }
}

fn content_multiplier(content_type: ContentType) -> f64 {
    match content_type {
        ContentType::Reel => 2.5,
        ContentType::Video => 1.8,
        ContentType::Carousel => 1.4,
        ContentType::Image => 1.0,
        ContentType::Article => 0.8,
        ContentType::Story => 1.2,
        ContentType::Post
        | ContentType::Tweet
        | ContentType::Thread
        | ContentType::Shorts
        | ContentType::Live
        | ContentType::Other => 1.0,
    }
}

fn industry_factor(industry: Industry) -> f64 {
    match industry {
        Industry::Fitness => 1.3,
        Industry::Fashion => 1.2,
        Industry::Technology | Industry::Tech => 0.9,
        Industry::FoodAndBeverage | Industry::Food => 1.4,
        Industry::Education | Industry::EdTech => 0.85,
        // General and every vertical without its own factor.
        _ => 1.0,
    }
}

impl AnalyticFallback {
    /// Estimates performance without any learned state. Infallible.
    pub fn estimate(&self, attrs: &CampaignAttributes) -> Prediction {
        let (base_reach, base_engagement) = platform_base(attrs.platform);
        let content_mult = content_multiplier(attrs.content_type);
        let industry_mult = industry_factor(attrs.industry);
        let influencer_boost = if attrs.influencer { 1.4 } else { 1.0 };

        let reach = (base_reach * content_mult * industry_mult * influencer_boost) as u64;
        let engagement_rate =
            ((base_engagement * content_mult * industry_mult) * 100.0).round() / 100.0;

        Prediction {
            engagement_rate,
            effectiveness: Effectiveness::from_fallback_rate(engagement_rate),
            reach,
        }
    }
}

impl CampaignPredictor for AnalyticFallback {
    fn predict(&self, attrs: &CampaignAttributes) -> Result<Prediction, PredictorError> {
        Ok(self.estimate(attrs))
    }

    fn mode(&self) -> PredictionMode {
        PredictionMode::Demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(platform: Platform, content: ContentType, industry: Industry) -> CampaignAttributes {
        CampaignAttributes {
            platform,
            content_type: content,
            industry,
            posting_hour: 18,
            caption_length: 120,
            cta: true,
            influencer: false,
        }
    }

    #[test]
    fn instagram_image_fitness_with_influencer() {
        let mut input = attrs(Platform::Instagram, ContentType::Image, Industry::Fitness);
        input.influencer = true;

        let prediction = AnalyticFallback.estimate(&input);
        // 12000 * 1.0 * 1.3 * 1.4 and 3.8 * 1.0 * 1.3
        assert_eq!(prediction.reach, 21840);
        assert_eq!(prediction.engagement_rate, 4.94);
        assert_eq!(prediction.effectiveness, Effectiveness::High);
    }

    #[test]
    fn influencer_boost_applies_to_reach_only() {
        let plain = AnalyticFallback.estimate(&attrs(
            Platform::Instagram,
            ContentType::Image,
            Industry::General,
        ));
        let mut boosted_input = attrs(Platform::Instagram, ContentType::Image, Industry::General);
        boosted_input.influencer = true;
        let boosted = AnalyticFallback.estimate(&boosted_input);

        assert_eq!(boosted.reach, plain.reach * 14 / 10);
        assert_eq!(boosted.engagement_rate, plain.engagement_rate);
    }

    #[test]
    fn unknown_platform_uses_default_base_rates() {
        let known = AnalyticFallback.estimate(&attrs(
            Platform::Instagram,
            ContentType::Image,
            Industry::General,
        ));
        let unknown = AnalyticFallback.estimate(&attrs(
            Platform::Other,
            ContentType::Image,
            Industry::General,
        ));

        assert_eq!(known.reach, unknown.reach);
        assert_eq!(known.engagement_rate, unknown.engagement_rate);
    }

    #[test]
    fn tiktok_reel_lands_in_high_band() {
        let prediction = AnalyticFallback.estimate(&attrs(
            Platform::TikTok,
            ContentType::Reel,
            Industry::General,
        ));
        // 5.2 * 2.5 = 13.0
        assert_eq!(prediction.engagement_rate, 13.0);
        assert_eq!(prediction.effectiveness, Effectiveness::High);
    }

    #[test]
    fn low_band_for_quiet_configurations() {
        let prediction = AnalyticFallback.estimate(&attrs(
            Platform::Twitter,
            ContentType::Image,
            Industry::General,
        ));
        // 1.5 * 1.0 * 1.0
        assert_eq!(prediction.engagement_rate, 1.5);
        assert_eq!(prediction.effectiveness, Effectiveness::Low);
    }
}
