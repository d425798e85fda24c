use serde::{Deserialize, Serialize};
use std::fmt;

/// Ideology tags carried by a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ideology {
    Conservative,
    ProEuropean,
    Socialist,
    LeftWing,
    CenterLeft,
    Liberal,
    Nationalist,
    RightWing,
    Civic,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub ideology: Vec<Ideology>,
    /// Polling share, percent.
    pub current_support: f64,
    /// Recent trend, roughly -5..+5.
    #[serde(default)]
    pub momentum: f64,
    #[serde(default)]
    pub strongholds: Vec<String>,
}

impl Party {
    pub fn has(&self, tag: Ideology) -> bool {
        self.ideology.contains(&tag)
    }

    pub fn is_left(&self) -> bool {
        self.has(Ideology::Socialist) || self.has(Ideology::LeftWing)
    }

    /// True if any stronghold appears in `region_name`, ignoring case.
    pub fn holds(&self, region_name: &str) -> bool {
        let region = region_name.to_lowercase();
        self.strongholds
            .iter()
            .any(|s| region.contains(&s.to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settlement {
    Urban,
    Rural,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomicLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub population: u64,
    pub registered_voters: u64,
    #[serde(default)]
    pub turnout_history: f64,
    pub urban_rural: Settlement,
    pub economic_level: EconomicLevel,
}

/// Scenario drivers. The first four range over -1..1, the last two over 0..1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFactors {
    pub economic_situation: f64,
    pub international_relations: f64,
    pub social_stability: f64,
    pub media_influence: f64,
    pub youth_engagement: f64,
    pub diaspora_participation: f64,
}

impl ScenarioFactors {
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("economic_situation", self.economic_situation),
            ("international_relations", self.international_relations),
            ("social_stability", self.social_stability),
            ("media_influence", self.media_influence),
            ("youth_engagement", self.youth_engagement),
            ("diaspora_participation", self.diaspora_participation),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub factors: ScenarioFactors,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectionRules {
    pub total_seats: u32,
    /// Minimum national vote share, percent.
    pub threshold: f64,
}

impl Default for ElectionRules {
    fn default() -> Self {
        Self {
            total_seats: 250,
            threshold: 3.0,
        }
    }
}

impl ElectionRules {
    pub fn majority(&self) -> u32 {
        self.total_seats / 2 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Stable,
    Fragile,
    Unstable,
}

impl Stability {
    pub fn for_size(parties: usize) -> Self {
        match parties {
            0 | 1 => Stability::Stable,
            2 => Stability::Fragile,
            _ => Stability::Unstable,
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stability::Stable => "stable",
            Stability::Fragile => "fragile",
            Stability::Unstable => "unstable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyResult {
    pub party_id: String,
    pub name: String,
    pub votes: f64,
    pub percentage: f64,
    pub seats: u32,
    /// Seats gained against `round(polling support * 2.5)`.
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionScenario {
    pub parties: Vec<String>,
    pub total_seats: u32,
    pub stability: Stability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyShare {
    pub party_id: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalResult {
    pub region_id: String,
    pub region_name: String,
    pub winner: Option<String>,
    pub shares: Vec<PartyShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub scenario: String,
    pub winner: Option<String>,
    pub results: Vec<PartyResult>,
    pub coalition_scenarios: Vec<CoalitionScenario>,
    pub turnout: f64,
    pub invalid_votes: f64,
    pub regional_breakdown: Vec<RegionalResult>,
    pub confidence: f64,
    pub uncertainty_factors: Vec<String>,
}
