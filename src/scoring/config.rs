use serde::{Deserialize, Serialize};

/// Category weights for the People Pulse Index.
///
/// Example YAML:
/// ```yaml
/// ppi:
///   weights:
///     economic: 0.4
///     sentiment: 0.3
///     social: 0.2
///     governance: 0.1
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CategoryWeights {
    pub economic: f64,
    pub sentiment: f64,
    pub social: f64,
    pub governance: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            economic: 0.40,
            sentiment: 0.30,
            social: 0.20,
            governance: 0.10,
        }
    }
}

impl CategoryWeights {
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("economic", self.economic),
            ("sentiment", self.sentiment),
            ("social", self.social),
            ("governance", self.governance),
        ]
    }
}

/// Weights of the four corruption indicator categories.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SeverityWeights {
    pub institutional: f64,
    pub sectoral: f64,
    pub political: f64,
    pub judicial: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            institutional: 0.35,
            sectoral: 0.25,
            political: 0.25,
            judicial: 0.15,
        }
    }
}

impl SeverityWeights {
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("institutional", self.institutional),
            ("sectoral", self.sectoral),
            ("political", self.political),
            ("judicial", self.judicial),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let sum: f64 = CategoryWeights::default().entries().iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        let sum: f64 = SeverityWeights::default().entries().iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_weights_parse() {
        let yaml = r#"
economic: 0.5
governance: 0.0
"#;
        let weights: CategoryWeights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights.economic, 0.5);
        assert_eq!(weights.sentiment, 0.30);
        assert_eq!(weights.governance, 0.0);
    }

    #[test]
    fn test_unknown_weight_rejected() {
        let yaml = "economy: 0.5\n";
        assert!(serde_saphyr::from_str::<CategoryWeights>(yaml).is_err());
    }
}
