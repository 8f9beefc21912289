use serde::{Deserialize, Serialize};

use crate::models::CampaignAttributes;

/// Fixed feature-column layout shared between training and inference.
///
/// The column order is part of the model artifact: one-hot indicator blocks
/// for platform, content type and industry (in vocabulary order), followed by
/// the numeric passthrough columns. A model trained against one schema must
/// never be fed vectors produced by another, so the schema is persisted
/// alongside each serialized forest and compared on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub platforms: Vec<String>,
    pub content_types: Vec<String>,
    pub industries: Vec<String>,
    pub numeric: Vec<String>,
}

impl FeatureSchema {
    /// The vocabulary the synthetic training set is generated over.
    pub fn training() -> Self {
        Self {
            platforms: to_strings(&["Instagram", "Facebook", "LinkedIn", "Twitter", "YouTube"]),
            content_types: to_strings(&[
                "Reel", "Carousel", "Image", "Post", "Video", "Article", "Tweet", "Thread",
                "Shorts", "Live",
            ]),
            industries: to_strings(&[
                "Fitness",
                "Fashion",
                "EdTech",
                "FinTech",
                "Food",
                "Travel",
                "Gaming",
                "Tech",
                "Beauty",
                "Healthcare",
                "RealEstate",
                "Entertainment",
                "Sports",
            ]),
            numeric: to_strings(&["posting_hour", "caption_length", "cta", "influencer"]),
        }
    }

    /// Total width of the encoded feature vector.
    pub fn width(&self) -> usize {
        self.platforms.len() + self.content_types.len() + self.industries.len() + self.numeric.len()
    }

    /// Encodes campaign attributes into the fixed-order feature vector.
    ///
    /// Categorical values outside the vocabulary leave their indicator block
    /// all-zero (ignore-unknown policy); they never fail. Numeric fields pass
    /// through clamped to their valid ranges.
    pub fn encode(&self, attrs: &CampaignAttributes) -> Vec<f64> {
        let mut vector = Vec::with_capacity(self.width());

        one_hot(&mut vector, &self.platforms, attrs.platform.as_str());
        one_hot(&mut vector, &self.content_types, attrs.content_type.as_str());
        one_hot(&mut vector, &self.industries, attrs.industry.as_str());

        vector.push(attrs.posting_hour() as f64);
        vector.push(attrs.caption_length() as f64);
        vector.push(if attrs.cta { 1.0 } else { 0.0 });
        vector.push(if attrs.influencer { 1.0 } else { 0.0 });

        vector
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn one_hot(vector: &mut Vec<f64>, vocabulary: &[String], value: &str) {
    for entry in vocabulary {
        vector.push(if entry == value { 1.0 } else { 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, Industry, Platform};

    fn sample_attrs() -> CampaignAttributes {
        CampaignAttributes {
            platform: Platform::Instagram,
            content_type: ContentType::Reel,
            industry: Industry::Fitness,
            posting_hour: 20,
            caption_length: 120,
            cta: true,
            influencer: true,
        }
    }

    #[test]
    fn vector_width_matches_schema() {
        let schema = FeatureSchema::training();
        let vector = schema.encode(&sample_attrs());
        assert_eq!(vector.len(), schema.width());
        assert_eq!(vector.len(), 5 + 10 + 13 + 4);
    }

    #[test]
    fn known_categories_set_exactly_one_indicator() {
        let schema = FeatureSchema::training();
        let vector = schema.encode(&sample_attrs());

        // Instagram is the first platform column, Reel the first content column.
        assert_eq!(vector[0], 1.0);
        assert_eq!(vector[1..5].iter().sum::<f64>(), 0.0);
        assert_eq!(vector[5], 1.0);
        assert_eq!(vector[5..15].iter().sum::<f64>(), 1.0);
        assert_eq!(vector[15..28].iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn unknown_categories_encode_as_zero_block() {
        let schema = FeatureSchema::training();
        let mut attrs = sample_attrs();
        attrs.platform = Platform::TikTok; // not in the training vocabulary
        attrs.industry = Industry::Other;

        let vector = schema.encode(&attrs);
        assert_eq!(vector[0..5].iter().sum::<f64>(), 0.0);
        assert_eq!(vector[15..28].iter().sum::<f64>(), 0.0);
        // Content indicator still set.
        assert_eq!(vector[5..15].iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn numeric_columns_pass_through_clamped() {
        let schema = FeatureSchema::training();
        let mut attrs = sample_attrs();
        attrs.posting_hour = -3;
        attrs.caption_length = -10;
        attrs.cta = false;

        let vector = schema.encode(&attrs);
        let numeric = &vector[vector.len() - 4..];
        assert_eq!(numeric, &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn column_order_is_stable() {
        // The dot product silently misaligns if this ever changes; the
        // serialized artifacts embed the same schema and are checked on load.
        let schema = FeatureSchema::training();
        assert_eq!(schema.platforms[0], "Instagram");
        assert_eq!(schema.content_types[0], "Reel");
        assert_eq!(schema.industries[0], "Fitness");
        assert_eq!(
            schema.numeric,
            vec!["posting_hour", "caption_length", "cta", "influencer"]
        );
    }
}
