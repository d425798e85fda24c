use serde::{Deserialize, Serialize};

use crate::corruption::CorruptionCatalog;
use crate::diaspora::{default_locations, DiasporaLocation, DiasporaTracker, DEFAULT_HOME_COUNTRY};
use crate::election::{
    default_scenarios, serbian_parties, serbian_regions, ElectionRules, ElectionScenario, Party,
    Region,
};
use crate::scoring::CategoryWeights;

/// Top-level `config.yaml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub ppi: PpiConfig,
    pub corruption: CorruptionCatalog,
    pub election: ElectionConfig,
    pub diaspora: DiasporaConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PpiConfig {
    pub weights: CategoryWeights,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ElectionConfig {
    pub total_seats: u32,
    /// Percent of the national vote needed to win seats.
    pub threshold: f64,
    pub parties: Vec<Party>,
    pub regions: Vec<Region>,
    pub scenarios: Vec<ElectionScenario>,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        let rules = ElectionRules::default();
        Self {
            total_seats: rules.total_seats,
            threshold: rules.threshold,
            parties: serbian_parties(),
            regions: serbian_regions(),
            scenarios: default_scenarios(),
        }
    }
}

impl ElectionConfig {
    pub fn rules(&self) -> ElectionRules {
        ElectionRules {
            total_seats: self.total_seats,
            threshold: self.threshold,
        }
    }

    /// Scenario by name, ignoring case.
    pub fn scenario(&self, name: &str) -> Option<&ElectionScenario> {
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiasporaConfig {
    pub home_country: String,
    pub locations: Vec<DiasporaLocation>,
}

impl Default for DiasporaConfig {
    fn default() -> Self {
        Self {
            home_country: DEFAULT_HOME_COUNTRY.to_string(),
            locations: default_locations(),
        }
    }
}

impl DiasporaConfig {
    pub fn tracker(&self) -> DiasporaTracker {
        DiasporaTracker::new(self.home_country.clone(), self.locations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.election.parties.len(), 7);
        assert_eq!(config.diaspora.locations.len(), 7);
        assert_eq!(config.corruption.indicators.len(), 8);
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r#"
ppi:
  weights:
    economic: 0.5
    sentiment: 0.2
election:
  total_seats: 120
  threshold: 5
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.ppi.weights.economic, 0.5);
        assert_eq!(config.ppi.weights.social, 0.20);
        assert_eq!(config.election.rules().majority(), 61);
        assert_eq!(config.election.regions.len(), 4);
        assert_eq!(config.diaspora.home_country, "Albania");
    }

    #[test]
    fn test_unknown_weight_rejected() {
        let yaml = "ppi:\n  weights:\n    economy: 0.5\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_scenario_lookup() {
        let election = ElectionConfig::default();
        assert!(election.scenario("economic crisis").is_some());
        assert!(election.scenario(" Status Quo ").is_some());
        assert!(election.scenario("Landslide").is_none());
    }

    #[test]
    fn test_defaults_round_trip_through_yaml() {
        let yaml = serde_saphyr::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
