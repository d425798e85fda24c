use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::corruption::normalize_key;

/// How strongly a diaspora community's posts carry back home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Influence {
    High,
    Medium,
    Low,
}

impl Influence {
    pub fn weight(self) -> f64 {
        match self {
            Influence::High => 1.5,
            Influence::Medium => 1.0,
            Influence::Low => 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiasporaLocation {
    pub country: String,
    pub country_code: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub main_cities: Vec<String>,
    #[serde(default)]
    pub social_platforms: Vec<String>,
    pub influence: Influence,
}

impl DiasporaLocation {
    /// True if `key` names this location by country or country code.
    pub fn answers_to(&self, key: &str) -> bool {
        let key = normalize_key(key);
        normalize_key(&self.country) == key || normalize_key(&self.country_code) == key
    }
}

/// Origin of a narrative relative to the home country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeType {
    Domestic,
    External,
    Hybrid,
}

impl NarrativeType {
    pub fn weight(self) -> f64 {
        match self {
            NarrativeType::Hybrid => 1.3,
            NarrativeType::External => 0.9,
            NarrativeType::Domestic => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
}

impl Engagement {
    /// Shares count triple and comments double.
    pub fn weighted(&self) -> f64 {
        self.likes as f64 + self.shares as f64 * 3.0 + self.comments as f64 * 2.0
    }

    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.likes
            .saturating_add(self.shares)
            .saturating_add(self.comments)
    }
}

/// A social media post as read from a posts file.
///
/// `location` is a country name or code, resolved against the tracker's
/// location catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiasporaPost {
    #[serde(default)]
    pub id: String,
    pub location: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub engagement: Engagement,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub topics: Vec<String>,
    pub narrative_type: NarrativeType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedPost {
    #[serde(flatten)]
    pub post: DiasporaPost,
    pub influence_score: f64,
}

/// A topic seen abroad first and picked up at home later.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeFlow {
    pub origin: String,
    pub destination: String,
    pub narrative: String,
    pub strength: f64,
    pub timeline: Vec<DateTime<Utc>>,
    pub platforms: Vec<String>,
}

/// Percent of posts per sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiasporaMetrics {
    pub total_population: u64,
    pub active_users: usize,
    pub engagement_rate: f64,
    pub top_narratives: Vec<String>,
    pub sentiment_breakdown: SentimentBreakdown,
    pub cross_border_flows: Vec<NarrativeFlow>,
    pub influence_index: f64,
}
