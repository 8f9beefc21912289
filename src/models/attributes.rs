use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Social platform a campaign posts to.
///
/// Unknown platform names deserialize to [`Platform::Other`] rather than
/// failing: the prediction core must degrade, never reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Facebook,
    LinkedIn,
    Twitter,
    YouTube,
    TikTok,
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Other => "Other",
        }
    }

    /// Maps a raw platform name to its variant; anything unrecognized
    /// becomes `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Instagram" => Platform::Instagram,
            "Facebook" => Platform::Facebook,
            "LinkedIn" => Platform::LinkedIn,
            "Twitter" => Platform::Twitter,
            "YouTube" => Platform::YouTube,
            "TikTok" => Platform::TikTok,
            _ => Platform::Other,
        }
    }

    /// Human-readable peak posting window for the platform.
    pub fn posting_window(&self) -> &'static str {
        match self {
            Platform::Instagram => "12PM-2PM and 7PM-9PM EST",
            Platform::TikTok => "7PM-11PM (peak entertainment hours)",
            Platform::YouTube => "2PM-4PM for discovery, 9PM-11PM for views",
            Platform::LinkedIn => "7AM-9AM and 5PM-6PM (commute times)",
            Platform::Facebook => "1PM-4PM EST",
            Platform::Twitter => "12PM-3PM EST",
            Platform::Other => "12PM-2PM and 6PM-9PM",
        }
    }
}

/// Format of the content being posted.
///
/// The valid subset depends on the platform, but mismatched combinations are
/// accepted: they only cost prediction accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Reel,
    Carousel,
    Image,
    Post,
    Video,
    Article,
    Tweet,
    Thread,
    Shorts,
    Live,
    Story,
    Other,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Reel => "Reel",
            ContentType::Carousel => "Carousel",
            ContentType::Image => "Image",
            ContentType::Post => "Post",
            ContentType::Video => "Video",
            ContentType::Article => "Article",
            ContentType::Tweet => "Tweet",
            ContentType::Thread => "Thread",
            ContentType::Shorts => "Shorts",
            ContentType::Live => "Live",
            ContentType::Story => "Story",
            ContentType::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Reel" => ContentType::Reel,
            "Carousel" => ContentType::Carousel,
            "Image" => ContentType::Image,
            "Post" => ContentType::Post,
            "Video" => ContentType::Video,
            "Article" => ContentType::Article,
            "Tweet" => ContentType::Tweet,
            "Thread" => ContentType::Thread,
            "Shorts" => ContentType::Shorts,
            "Live" => ContentType::Live,
            "Story" => ContentType::Story,
            _ => ContentType::Other,
        }
    }
}

/// Industry vertical of the advertiser.
///
/// The variant set is the union of the training vocabulary and the analytic
/// fallback tables; `General` is the designated default for the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    Fitness,
    Fashion,
    EdTech,
    FinTech,
    Food,
    Travel,
    Gaming,
    Tech,
    Beauty,
    Healthcare,
    RealEstate,
    Entertainment,
    Sports,
    Technology,
    FoodAndBeverage,
    Education,
    General,
    Other,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Fitness => "Fitness",
            Industry::Fashion => "Fashion",
            Industry::EdTech => "EdTech",
            Industry::FinTech => "FinTech",
            Industry::Food => "Food",
            Industry::Travel => "Travel",
            Industry::Gaming => "Gaming",
            Industry::Tech => "Tech",
            Industry::Beauty => "Beauty",
            Industry::Healthcare => "Healthcare",
            Industry::RealEstate => "RealEstate",
            Industry::Entertainment => "Entertainment",
            Industry::Sports => "Sports",
            Industry::Technology => "Technology",
            Industry::FoodAndBeverage => "Food & Beverage",
            Industry::Education => "Education",
            Industry::General => "General",
            Industry::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Fitness" => Industry::Fitness,
            "Fashion" => Industry::Fashion,
            "EdTech" => Industry::EdTech,
            "FinTech" => Industry::FinTech,
            "Food" => Industry::Food,
            "Travel" => Industry::Travel,
            "Gaming" => Industry::Gaming,
            "Tech" => Industry::Tech,
            "Beauty" => Industry::Beauty,
            "Healthcare" => Industry::Healthcare,
            "RealEstate" => Industry::RealEstate,
            "Entertainment" => Industry::Entertainment,
            "Sports" => Industry::Sports,
            "Technology" => Industry::Technology,
            "Food & Beverage" => Industry::FoodAndBeverage,
            "Education" => Industry::Education,
            "General" => Industry::General,
            _ => Industry::Other,
        }
    }
}

macro_rules! string_enum_serde {
    ($ty:ident) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                Ok($ty::from_name(&name))
            }
        }
    };
}

string_enum_serde!(Platform);
string_enum_serde!(ContentType);
string_enum_serde!(Industry);

/// A single campaign posting configuration to score.
///
/// Numeric fields follow a lenient-input policy: out-of-range values are
/// clamped by the accessors below rather than rejected, since this is an
/// advisory system rather than a validating transaction system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAttributes {
    pub platform: Platform,
    pub content_type: ContentType,
    #[serde(default = "default_industry")]
    pub industry: Industry,
    #[serde(default = "default_posting_hour")]
    pub posting_hour: i64,
    #[serde(default = "default_caption_length")]
    pub caption_length: i64,
    #[serde(default = "default_cta")]
    pub cta: bool,
    #[serde(default)]
    pub influencer: bool,
}

fn default_industry() -> Industry {
    Industry::General
}

fn default_posting_hour() -> i64 {
    18
}

fn default_caption_length() -> i64 {
    120
}

fn default_cta() -> bool {
    true
}

impl CampaignAttributes {
    /// Posting hour clamped to a valid hour of day.
    pub fn posting_hour(&self) -> i64 {
        self.posting_hour.clamp(0, 23)
    }

    /// Caption length clamped to a non-negative character count.
    pub fn caption_length(&self) -> i64 {
        self.caption_length.max(0)
    }
}
