use serde::{Deserialize, Serialize};

fn missing() -> f64 {
    f64::NAN
}

/// Raw indicators feeding the People Pulse Index.
///
/// Fields absent from the input deserialize as NaN; they lower the result's
/// confidence instead of failing the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpiFactors {
    // Economic
    /// Actual vs potential GDP, percent (-10..+10)
    #[serde(default = "missing")]
    pub output_gap: f64,
    #[serde(default = "missing")]
    pub unemployment_rate: f64,
    #[serde(default = "missing")]
    pub inflation_rate: f64,
    #[serde(default = "missing")]
    pub gdp_growth_rate: f64,

    // Sentiment (0-100)
    #[serde(default = "missing")]
    pub media_confidence: f64,
    #[serde(default = "missing")]
    pub social_media_sentiment: f64,
    #[serde(default = "missing")]
    pub poll_approval: f64,

    // Social (0-100, higher is better)
    #[serde(default = "missing")]
    pub corruption_index: f64,
    #[serde(default = "missing")]
    pub safety_index: f64,
    #[serde(default = "missing")]
    pub healthcare_access: f64,

    // Governance (0-100)
    #[serde(default = "missing")]
    pub policy_effectiveness: f64,
    #[serde(default = "missing")]
    pub transparency_score: f64,
}

impl PpiFactors {
    pub const COUNT: usize = 12;

    pub fn values(&self) -> [(&'static str, f64); Self::COUNT] {
        [
            ("outputGap", self.output_gap),
            ("unemploymentRate", self.unemployment_rate),
            ("inflationRate", self.inflation_rate),
            ("gdpGrowthRate", self.gdp_growth_rate),
            ("mediaConfidence", self.media_confidence),
            ("socialMediaSentiment", self.social_media_sentiment),
            ("pollApproval", self.poll_approval),
            ("corruptionIndex", self.corruption_index),
            ("safetyIndex", self.safety_index),
            ("healthcareAccess", self.healthcare_access),
            ("policyEffectiveness", self.policy_effectiveness),
            ("transparencyScore", self.transparency_score),
        ]
    }

    /// Count of fields holding a finite number.
    pub fn present(&self) -> usize {
        self.values().iter().filter(|(_, v)| v.is_finite()).count()
    }

    /// Names of fields that are missing or not finite.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.values()
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_nan() {
        let json = r#"{"outputGap": -1.8, "inflationRate": 2.4}"#;
        let factors: PpiFactors = serde_json::from_str(json).unwrap();
        assert_eq!(factors.output_gap, -1.8);
        assert!(factors.unemployment_rate.is_nan());
        assert_eq!(factors.present(), 2);
        assert_eq!(factors.missing_fields().len(), 10);
        assert!(factors.missing_fields().contains(&"pollApproval"));
    }

    #[test]
    fn test_yaml_factors() {
        let yaml = r#"
outputGap: 0.5
unemploymentRate: 8
transparencyScore: 61
"#;
        let factors: PpiFactors = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(factors.unemployment_rate, 8.0);
        assert_eq!(factors.present(), 3);
    }
}
