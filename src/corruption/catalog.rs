use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::{
    CaseMatch, CaseStatus, CorruptionCase, CorruptionIndicator, IndicatorCategory,
    IndicatorTrend, InstitutionTrust, InternationalRanking, Level, LocalizedName, TrustTrend,
};
use crate::scoring::SeverityWeights;

/// Corruption reference data and tracking rules (`corruption:` config section).
///
/// Indicators are read-only. Institutions and cases only seed the store; once
/// a state file exists it wins over the seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorruptionCatalog {
    pub weights: SeverityWeights,
    pub indicators: Vec<CorruptionIndicator>,
    pub institutions: Vec<InstitutionTrust>,
    pub cases: Vec<CorruptionCase>,
    pub case_match: CaseMatch,
    /// JSON file holding institution trust and cases between runs.
    pub state_file: Option<PathBuf>,
    pub ranking: InternationalRanking,
}

impl Default for CorruptionCatalog {
    fn default() -> Self {
        Self {
            weights: SeverityWeights::default(),
            indicators: default_indicators(),
            institutions: default_institutions(),
            cases: default_cases(),
            case_match: CaseMatch::default(),
            state_file: None,
            ranking: InternationalRanking {
                rank: 104,
                total: 180,
                source: "Transparency International CPI 2023".to_string(),
            },
        }
    }
}

fn indicator(
    id: &str,
    sq: &str,
    en: &str,
    category: IndicatorCategory,
    level: Level,
    severity: f64,
    trend: IndicatorTrend,
) -> CorruptionIndicator {
    CorruptionIndicator {
        id: id.to_string(),
        name: LocalizedName {
            sq: sq.to_string(),
            en: en.to_string(),
        },
        category,
        level,
        severity,
        trend,
    }
}

pub fn default_indicators() -> Vec<CorruptionIndicator> {
    use IndicatorCategory::*;
    use IndicatorTrend::*;
    vec![
        indicator(
            "judiciary",
            "Sistemi Gjyqësor",
            "Judiciary System",
            Judicial,
            Level::National,
            65.0,
            Improving,
        ),
        indicator(
            "public-procurement",
            "Prokurimi Publik",
            "Public Procurement",
            Institutional,
            Level::National,
            75.0,
            Stable,
        ),
        indicator(
            "healthcare",
            "Shëndetësia",
            "Healthcare",
            Sectoral,
            Level::National,
            70.0,
            Worsening,
        ),
        indicator("education", "Arsimi", "Education", Sectoral, Level::National, 60.0, Stable),
        indicator("police", "Policia", "Police", Institutional, Level::National, 55.0, Improving),
        indicator("customs", "Dogana", "Customs", Institutional, Level::National, 68.0, Stable),
        indicator(
            "local-government",
            "Qeverisja Vendore",
            "Local Government",
            Political,
            Level::Local,
            72.0,
            Worsening,
        ),
        indicator(
            "political-parties",
            "Partitë Politike",
            "Political Parties",
            Political,
            Level::National,
            80.0,
            Stable,
        ),
    ]
}

fn institution(
    name: &str,
    trust: f64,
    perception: f64,
    cases: u32,
    trend: TrustTrend,
) -> InstitutionTrust {
    InstitutionTrust {
        institution: name.to_string(),
        trust_level: trust,
        corruption_perception: perception,
        recent_cases: cases,
        trend,
    }
}

pub fn default_institutions() -> Vec<InstitutionTrust> {
    use TrustTrend::*;
    vec![
        institution("SPAK", 65.0, 25.0, 45, Improving),
        institution("Parlamenti", 30.0, 70.0, 12, Stable),
        institution("Qeveria", 35.0, 68.0, 8, Stable),
        institution("Gjykatat", 40.0, 65.0, 23, Improving),
        institution("Policia", 45.0, 55.0, 15, Improving),
        institution("Bashkitë", 38.0, 72.0, 31, Declining),
        institution("Ministritë", 32.0, 70.0, 18, Stable),
        institution("Media", 42.0, 60.0, 5, Stable),
    ]
}

pub fn default_cases() -> Vec<CorruptionCase> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        CorruptionCase {
            id: "case-001".to_string(),
            title: "Public Procurement Scandal".to_string(),
            description: "Alleged manipulation of tender process for road construction".to_string(),
            institution: "Ministry of Infrastructure".to_string(),
            individuals: vec!["Official A".to_string(), "Businessman B".to_string()],
            amount: Some(5_000_000.0),
            currency: Some("EUR".to_string()),
            status: CaseStatus::Investigating,
            date_reported: date(2024, 1, 15),
            public_interest: 85.0,
            media_coverage: 90.0,
            sources: vec!["BIRN".to_string(), "Top Channel".to_string(), "Exit.al".to_string()],
        },
        CorruptionCase {
            id: "case-002".to_string(),
            title: "Healthcare Bribes".to_string(),
            description: "Doctors accepting bribes for medical services".to_string(),
            institution: "QSUT Hospital".to_string(),
            individuals: vec!["Doctor X".to_string(), "Doctor Y".to_string()],
            amount: None,
            currency: None,
            status: CaseStatus::Prosecuted,
            date_reported: date(2024, 2, 20),
            public_interest: 75.0,
            media_coverage: 80.0,
            sources: vec!["Syri.net".to_string(), "Report TV".to_string()],
        },
        CorruptionCase {
            id: "case-003".to_string(),
            title: "Vote Buying Allegations".to_string(),
            description: "Political party accused of buying votes in local elections".to_string(),
            institution: "Political Party".to_string(),
            individuals: vec!["Politician C".to_string()],
            amount: Some(500_000.0),
            currency: Some("ALL".to_string()),
            status: CaseStatus::Reported,
            date_reported: date(2024, 3, 10),
            public_interest: 90.0,
            media_coverage: 95.0,
            sources: vec!["BalkanWeb".to_string(), "News24".to_string()],
        },
    ]
}
