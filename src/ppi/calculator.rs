use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::factors::PpiFactors;
use crate::scoring::{blend, round1, Blend, CategoryWeights, Curve, Weighted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PpiCategory {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for PpiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PpiCategory::Critical => "Critical",
            PpiCategory::Poor => "Poor",
            PpiCategory::Fair => "Fair",
            PpiCategory::Good => "Good",
            PpiCategory::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Declining,
    Stable,
    Improving,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Declining => "declining",
            Trend::Stable => "stable",
            Trend::Improving => "improving",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PpiComponents {
    pub economic: f64,
    pub sentiment: f64,
    pub social: f64,
    pub governance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PpiResult {
    /// Weighted index, one decimal. Not clamped to 0-100.
    pub index: f64,
    pub category: PpiCategory,
    pub trend: Trend,
    pub components: PpiComponents,
    pub factors: PpiFactors,
    pub timestamp: DateTime<Utc>,
    /// Percentage of the twelve factors that were finite numbers.
    pub confidence: f64,
}

/// Change in index points required before a trend is reported.
const TREND_BAND: f64 = 2.0;

/// Map an index onto its tier. Each tier includes its lower bound.
pub fn categorize(index: f64) -> PpiCategory {
    if index >= 80.0 {
        PpiCategory::Excellent
    } else if index >= 65.0 {
        PpiCategory::Good
    } else if index >= 50.0 {
        PpiCategory::Fair
    } else if index >= 35.0 {
        PpiCategory::Poor
    } else {
        PpiCategory::Critical
    }
}

pub fn determine_trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous.filter(|p| p.is_finite()) else {
        return Trend::Stable;
    };
    let change = current - previous;
    if change > TREND_BAND {
        Trend::Improving
    } else if change < -TREND_BAND {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

pub fn confidence(factors: &PpiFactors) -> f64 {
    (factors.present() as f64 / PpiFactors::COUNT as f64 * 100.0).round()
}

/// Normalization curves for the economic indicators.
#[derive(Debug, Clone)]
struct EconomicCurves {
    output_gap: Curve,
    unemployment: Curve,
    inflation: Curve,
    gdp_growth: Curve,
}

impl Default for EconomicCurves {
    fn default() -> Self {
        Self {
            output_gap: Curve::output_gap(),
            unemployment: Curve::unemployment(),
            inflation: Curve::inflation(),
            gdp_growth: Curve::gdp_growth(),
        }
    }
}

/// People Pulse Index calculator.
#[derive(Debug, Clone, Default)]
pub struct PpiCalculator {
    weights: CategoryWeights,
    curves: EconomicCurves,
}

impl PpiCalculator {
    pub fn new(weights: CategoryWeights) -> Self {
        Self {
            weights,
            curves: EconomicCurves::default(),
        }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    pub fn calculate(&self, factors: &PpiFactors, previous: Option<f64>) -> PpiResult {
        let economic = self.economic(factors).score;
        let sentiment = self.sentiment(factors).score;
        let social = self.social(factors).score;
        let governance = self.governance(factors).score;

        let index = economic * self.weights.economic
            + sentiment * self.weights.sentiment
            + social * self.weights.social
            + governance * self.weights.governance;

        let trend = determine_trend(index, previous);
        let confidence = confidence(factors);

        tracing::debug!(
            economic,
            sentiment,
            social,
            governance,
            index,
            confidence,
            "computed people pulse index"
        );

        PpiResult {
            index: round1(index),
            category: categorize(index),
            trend,
            components: PpiComponents {
                economic: round1(economic),
                sentiment: round1(sentiment),
                social: round1(social),
                governance: round1(governance),
            },
            factors: *factors,
            timestamp: Utc::now(),
            confidence,
        }
    }

    pub fn economic(&self, f: &PpiFactors) -> Blend {
        blend(&[
            Weighted::curved("outputGap", 0.25, f.output_gap, &self.curves.output_gap),
            Weighted::curved(
                "unemploymentRate",
                0.35,
                f.unemployment_rate,
                &self.curves.unemployment,
            ),
            Weighted::curved("inflationRate", 0.20, f.inflation_rate, &self.curves.inflation),
            Weighted::curved("gdpGrowthRate", 0.20, f.gdp_growth_rate, &self.curves.gdp_growth),
        ])
    }

    pub fn sentiment(&self, f: &PpiFactors) -> Blend {
        blend(&[
            Weighted::new("mediaConfidence", 0.35, f.media_confidence),
            Weighted::new("socialMediaSentiment", 0.35, f.social_media_sentiment),
            Weighted::new("pollApproval", 0.30, f.poll_approval),
        ])
    }

    pub fn social(&self, f: &PpiFactors) -> Blend {
        blend(&[
            Weighted::new("corruptionIndex", 0.40, f.corruption_index),
            Weighted::new("safetyIndex", 0.35, f.safety_index),
            Weighted::new("healthcareAccess", 0.25, f.healthcare_access),
        ])
    }

    pub fn governance(&self, f: &PpiFactors) -> Blend {
        blend(&[
            Weighted::new("policyEffectiveness", 0.50, f.policy_effectiveness),
            Weighted::new("transparencyScore", 0.50, f.transparency_score),
        ])
    }
}

/// Compute the PPI with the default category weights.
pub fn compute_ppi(factors: &PpiFactors, previous: Option<f64>) -> PpiResult {
    PpiCalculator::default().calculate(factors, previous)
}
