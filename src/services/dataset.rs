use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::models::{CampaignAttributes, ContentType, Industry, Platform};

/// Platforms the synthetic training distribution covers.
pub const TRAINING_PLATFORMS: [Platform; 5] = [
    Platform::Instagram,
    Platform::Facebook,
    Platform::LinkedIn,
    Platform::Twitter,
    Platform::YouTube,
];

/// Industries the synthetic training distribution covers.
pub const TRAINING_INDUSTRIES: [Industry; 13] = [
    Industry::Fitness,
    Industry::Fashion,
    Industry::EdTech,
    Industry::FinTech,
    Industry::Food,
    Industry::Travel,
    Industry::Gaming,
    Industry::Tech,
    Industry::Beauty,
    Industry::Healthcare,
    Industry::RealEstate,
    Industry::Entertainment,
    Industry::Sports,
];

/// Content types that are valid for a platform in the training distribution.
pub fn valid_content_types(platform: Platform) -> &'static [ContentType] {
    match platform {
        Platform::Instagram => &[
            ContentType::Reel,
            ContentType::Carousel,
            ContentType::Image,
            ContentType::Post,
        ],
        Platform::Facebook => &[ContentType::Image, ContentType::Post, ContentType::Video],
        Platform::LinkedIn => &[ContentType::Post, ContentType::Article],
        Platform::Twitter => &[ContentType::Tweet, ContentType::Thread],
        Platform::YouTube => &[ContentType::Video, ContentType::Shorts, ContentType::Live],
        _ => &[ContentType::Image],
    }
}

/// One labeled row of the synthetic training set.
#[derive(Debug, Clone)]
pub struct CampaignSample {
    pub attrs: CampaignAttributes,
    pub engagement: f64,
    pub reach: f64,
}

/// Deterministic base engagement score for a platform/content pairing.
fn base_engagement(platform: Platform, content_type: ContentType) -> f64 {
    let mut score = 2.0;

    match platform {
        Platform::Instagram => {
            score += 1.5;
            if content_type == ContentType::Reel {
                score += 1.3;
            }
        }
        Platform::Facebook => {
            score += 1.2;
            if content_type == ContentType::Video {
                score += 0.8;
            }
        }
        Platform::LinkedIn => {
            score += 1.0;
            if content_type == ContentType::Article {
                score += 0.6;
            }
        }
        Platform::Twitter => {
            score += 0.8;
            if content_type == ContentType::Thread {
                score += 0.5;
            }
        }
        Platform::YouTube => {
            score += 2.0;
            if matches!(
                content_type,
                ContentType::Video | ContentType::Shorts | ContentType::Live
            ) {
                score += 1.5;
            }
        }
        _ => {}
    }

    score
}

/// Generates the synthetic campaign-performance dataset.
///
/// Reproduces the data-generating process the regression models were
/// originally fit on: per-platform base score plus content, time-of-day,
/// CTA and influencer bonuses, Gaussian noise, a 0.5 floor, and a reach
/// derived linearly from engagement with uniform jitter.
pub fn generate_dataset(rows: usize, seed: u64) -> Vec<CampaignSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    // Invariant parameters, not tunables.
    let noise = Normal::new(0.0, 0.4).expect("valid noise distribution");

    (0..rows).map(|_| generate_row(&mut rng, &noise)).collect()
}

fn generate_row(rng: &mut StdRng, noise: &Normal<f64>) -> CampaignSample {
    let platform = TRAINING_PLATFORMS[rng.random_range(0..TRAINING_PLATFORMS.len())];
    let contents = valid_content_types(platform);
    let content_type = contents[rng.random_range(0..contents.len())];
    let industry = TRAINING_INDUSTRIES[rng.random_range(0..TRAINING_INDUSTRIES.len())];

    let posting_hour = rng.random_range(6..=23);
    let caption_length = rng.random_range(50..=250);
    let cta = rng.random_bool(0.5);
    let influencer = rng.random_bool(0.5);

    let mut engagement = base_engagement(platform, content_type);

    if (18..=21).contains(&posting_hour) {
        engagement += 1.2;
    } else if (12..=14).contains(&posting_hour) {
        engagement += 0.6;
    }

    if cta {
        engagement += 0.5;
    }
    if influencer {
        engagement += 1.0;
    }

    engagement += noise.sample(rng);
    engagement = f64::max(0.5, (engagement * 100.0).round() / 100.0);

    let reach = (engagement * rng.random_range(3000..=7000) as f64
        + rng.random_range(3000..=10000) as f64)
        .trunc();

    CampaignSample {
        attrs: CampaignAttributes {
            platform,
            content_type,
            industry,
            posting_hour,
            caption_length,
            cta,
            influencer,
        },
        engagement,
        reach,
    }
}
