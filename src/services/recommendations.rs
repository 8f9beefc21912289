use crate::models::{CampaignAttributes, ContentType, Platform};

/// Recommendation cap on the trained-model path.
pub const LIVE_RECOMMENDATION_CAP: usize = 4;
/// Recommendation cap on the analytic fallback path. The two caps are
/// intentionally different and preserved as-is.
pub const FALLBACK_RECOMMENDATION_CAP: usize = 6;

/// Engagement rate below which competitive benchmarking is suggested.
const ENGAGEMENT_FLOOR: f64 = 4.0;
/// Reach below which cross-promotion is suggested.
const REACH_FLOOR: u64 = 20_000;
/// Caption length below which longer captions are suggested.
const CAPTION_FLOOR: i64 = 100;

/// Rule-based synthesizer turning a prediction into ordered, actionable
/// advice.
///
/// Rules are evaluated in a fixed order that doubles as the priority
/// ranking: platform fixes first, then timing, CTA, performance gaps, and
/// distribution. Every rule fires independently; if none fire, exactly one
/// "already optimized" message is emitted. Output is deterministic for
/// identical inputs and truncated to the configured cap.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    cap: usize,
}

impl RecommendationEngine {
    pub fn with_cap(cap: usize) -> Self {
        Self { cap }
    }

    pub fn synthesize(
        &self,
        attrs: &CampaignAttributes,
        engagement: f64,
        reach: u64,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        self.platform_rules(attrs, engagement, &mut recommendations);
        self.timing_rule(attrs, &mut recommendations);
        self.cta_rule(attrs, &mut recommendations);
        self.performance_rules(attrs, engagement, reach, &mut recommendations);

        if recommendations.is_empty() {
            recommendations.push(
                "Your current campaign strategy is highly optimized and aligns with platform \
                 best practices."
                    .to_string(),
            );
        }

        recommendations.truncate(self.cap);
        recommendations
    }

    fn platform_rules(
        &self,
        attrs: &CampaignAttributes,
        engagement: f64,
        out: &mut Vec<String>,
    ) {
        match attrs.platform {
            Platform::Instagram => {
                if attrs.content_type != ContentType::Reel {
                    out.push(
                        "Leverage Instagram Reels for significantly higher discoverability and \
                         engagement."
                            .to_string(),
                    );
                }
                if !attrs.influencer {
                    out.push(
                        "Partner with niche influencers to boost trust and reach on Instagram."
                            .to_string(),
                    );
                }
            }
            Platform::YouTube => {
                if !matches!(attrs.content_type, ContentType::Shorts | ContentType::Live) {
                    out.push(
                        "Incorporate YouTube Shorts to capture mobile-first viewers.".to_string(),
                    );
                }
                if engagement < 5.0 {
                    out.push(
                        "Improve video thumbnails and titles to increase Click-Through Rate (CTR)."
                            .to_string(),
                    );
                }
            }
            Platform::LinkedIn => {
                if attrs.content_type != ContentType::Article {
                    out.push(
                        "Publish long-form Articles to establish thought leadership in your \
                         industry."
                            .to_string(),
                    );
                }
                out.push(
                    "Include industry-relevant hashtags to increase visibility among \
                     professionals."
                        .to_string(),
                );
            }
            Platform::Facebook => {
                if attrs.content_type != ContentType::Video {
                    out.push(
                        "Videos generally perform better on Facebook; consider converting images \
                         into short video clips."
                            .to_string(),
                    );
                }
            }
            Platform::Twitter => {
                if attrs.content_type != ContentType::Thread {
                    out.push(
                        "Use Threads to break down complex topics; they typically see higher \
                         sharing rates than single tweets."
                            .to_string(),
                    );
                }
            }
            Platform::TikTok => {
                if !matches!(attrs.content_type, ContentType::Video | ContentType::Reel) {
                    out.push(
                        "TikTok is video-first; convert your content strategy to short-form \
                         video."
                            .to_string(),
                    );
                }
            }
            Platform::Other => {}
        }
    }

    fn timing_rule(&self, attrs: &CampaignAttributes, out: &mut Vec<String>) {
        let hour = attrs.posting_hour();
        if !((12..=14).contains(&hour) || (18..=21).contains(&hour)) {
            out.push(
                "Schedule posts during peak user activity windows (12-2 PM or 6-9 PM) for \
                 maximum initial traction."
                    .to_string(),
            );
        }
    }

    fn cta_rule(&self, attrs: &CampaignAttributes, out: &mut Vec<String>) {
        if !attrs.cta {
            out.push(
                "Add a strong Call-To-Action (CTA) like 'Comment below' or 'Link in bio' to \
                 drive conversions."
                    .to_string(),
            );
        }
    }

    fn performance_rules(
        &self,
        attrs: &CampaignAttributes,
        engagement: f64,
        reach: u64,
        out: &mut Vec<String>,
    ) {
        if engagement < ENGAGEMENT_FLOOR {
            out.push(
                "Analyze top-performing competitors in your industry to refine content \
                 aesthetics."
                    .to_string(),
            );
        }

        if reach < REACH_FLOOR {
            out.push(
                "Consider cross-promoting this content across other social channels to broaden \
                 your reach."
                    .to_string(),
            );
        }

        if attrs.caption_length() < CAPTION_FLOOR {
            out.push(
                "Experiment with longer, value-driven captions to increase 'Time on Post' \
                 metrics."
                    .to_string(),
            );
        }
    }
}
