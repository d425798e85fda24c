use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercased, trimmed lookup key for institution and sector names.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Institutional,
    Sectoral,
    Political,
    Judicial,
}

impl IndicatorCategory {
    pub const ALL: [IndicatorCategory; 4] = [
        IndicatorCategory::Institutional,
        IndicatorCategory::Sectoral,
        IndicatorCategory::Political,
        IndicatorCategory::Judicial,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    National,
    Regional,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorTrend {
    Improving,
    Stable,
    Worsening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustTrend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub sq: String,
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionIndicator {
    pub id: String,
    pub name: LocalizedName,
    pub category: IndicatorCategory,
    pub level: Level,
    /// 0-100, higher is worse
    pub severity: f64,
    pub trend: IndicatorTrend,
}

impl CorruptionIndicator {
    /// True if `key` (already normalized) names this indicator by id or either name.
    pub fn answers_to(&self, key: &str) -> bool {
        normalize_key(&self.id) == key
            || normalize_key(&self.name.en) == key
            || normalize_key(&self.name.sq) == key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionTrust {
    pub institution: String,
    pub trust_level: f64,
    /// 0-100, higher is worse
    pub corruption_perception: f64,
    pub recent_cases: u32,
    pub trend: TrustTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Reported,
    Investigating,
    Prosecuted,
    Convicted,
    Dismissed,
}

/// A case as reported, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCase {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub institution: String,
    #[serde(default)]
    pub individuals: Vec<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: CaseStatus,
    pub date_reported: NaiveDate,
    pub public_interest: f64,
    #[serde(default)]
    pub media_coverage: f64,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl NewCase {
    pub fn into_case(self, id: String) -> CorruptionCase {
        CorruptionCase {
            id,
            title: self.title,
            description: self.description,
            institution: self.institution,
            individuals: self.individuals,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            date_reported: self.date_reported,
            public_interest: self.public_interest,
            media_coverage: self.media_coverage,
            sources: self.sources,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionCase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub institution: String,
    pub individuals: Vec<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: CaseStatus,
    pub date_reported: NaiveDate,
    pub public_interest: f64,
    pub media_coverage: f64,
    pub sources: Vec<String>,
}

/// How recent cases are attributed to a sector in `sector_risk`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMatch {
    /// Normalized institution name contains the normalized sector name.
    #[default]
    Substring,
    /// Normalized institution name equals the normalized sector name.
    Exact,
}

impl CaseMatch {
    pub fn matches(&self, institution: &str, sector_key: &str) -> bool {
        let institution = normalize_key(institution);
        match self {
            CaseMatch::Substring => institution.contains(sector_key),
            CaseMatch::Exact => institution == sector_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalRanking {
    pub rank: u32,
    pub total: u32,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicMood {
    Optimistic,
    Neutral,
    Pessimistic,
}

impl fmt::Display for PublicMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PublicMood::Optimistic => "optimistic",
            PublicMood::Neutral => "neutral",
            PublicMood::Pessimistic => "pessimistic",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySeverity {
    pub institutional: f64,
    pub sectoral: f64,
    pub political: f64,
    pub judicial: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorruptionSentiment {
    pub overall: f64,
    pub by_category: CategorySeverity,
    pub by_institution: Vec<InstitutionTrust>,
    pub top_concerns: Vec<String>,
    pub public_mood: PublicMood,
    pub international_ranking: InternationalRanking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorRisk {
    pub risk: RiskLevel,
    pub score: f64,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorTrends {
    pub improving: Vec<String>,
    pub stable: Vec<String>,
    pub worsening: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub institution: String,
    pub indicator: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Parlamenti "), "parlamenti");
        assert_eq!(normalize_key("BASHKITË"), "bashkitë");
    }

    #[test]
    fn test_case_match_substring() {
        let rule = CaseMatch::Substring;
        assert!(rule.matches("QSUT Healthcare Center", "healthcare"));
        assert!(!rule.matches("Ministry of Infrastructure", "healthcare"));
    }

    #[test]
    fn test_case_match_exact_avoids_partial_names() {
        let rule = CaseMatch::Exact;
        assert!(rule.matches(" Police ", "police"));
        assert!(!rule.matches("Police Policy Unit", "police"));
        assert!(CaseMatch::Substring.matches("Police Policy Unit", "police"));
    }

    #[test]
    fn test_new_case_parse() {
        let json = r#"{
            "title": "Tender rigging",
            "institution": "Parlamenti",
            "status": "reported",
            "date_reported": "2024-05-01",
            "public_interest": 80
        }"#;
        let case: NewCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.status, CaseStatus::Reported);
        assert!(case.individuals.is_empty());
        assert_eq!(case.into_case("case-009".to_string()).id, "case-009");
    }
}
