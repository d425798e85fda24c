use serde::Serialize;

use super::curves::Curve;

/// A single input to a weighted blend.
#[derive(Debug, Clone)]
pub struct Weighted<'a> {
    pub label: &'a str,
    pub weight: f64,
    pub value: f64,
}

impl<'a> Weighted<'a> {
    pub fn new(label: &'a str, weight: f64, value: f64) -> Self {
        Self {
            label,
            weight,
            value,
        }
    }

    /// Pass the raw value through a normalization curve first.
    /// Non-finite values stay non-finite so the blend can skip them.
    pub fn curved(label: &'a str, weight: f64, raw: f64, curve: &Curve) -> Self {
        let value = if raw.is_finite() { curve.score(raw) } else { raw };
        Self::new(label, weight, value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorContribution {
    pub label: String,
    pub weight: f64,
    pub value: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Blend {
    pub score: f64,
    pub factors: Vec<FactorContribution>,
    /// Number of inputs skipped because their value was not finite.
    pub skipped: usize,
}

/// Weighted sum of `parts`.
///
/// Non-finite inputs are dropped and the remaining weights are scaled back up
/// to the full weight, so a missing indicator shifts its share onto the
/// indicators that are present. A blend with nothing present scores 0.
pub fn blend(parts: &[Weighted<'_>]) -> Blend {
    let total_weight: f64 = parts.iter().map(|p| p.weight).sum();
    let mut present_weight = 0.0;
    let mut score = 0.0;
    let mut skipped = 0;
    let mut factors = Vec::with_capacity(parts.len());

    for part in parts {
        if !part.value.is_finite() {
            skipped += 1;
            continue;
        }
        let contribution = part.value * part.weight;
        score += contribution;
        present_weight += part.weight;
        factors.push(FactorContribution {
            label: part.label.to_string(),
            weight: part.weight,
            value: part.value,
            contribution,
        });
    }

    if skipped > 0 {
        score = if present_weight > 0.0 {
            score * total_weight / present_weight
        } else {
            0.0
        };
    }

    Blend {
        score,
        factors,
        skipped,
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_all_present() {
        let result = blend(&[
            Weighted::new("a", 0.5, 80.0),
            Weighted::new("b", 0.5, 40.0),
        ]);
        assert_eq!(result.score, 60.0);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.factors.len(), 2);
    }

    #[test]
    fn test_blend_redistributes_missing_weight() {
        let result = blend(&[
            Weighted::new("a", 0.5, 80.0),
            Weighted::new("b", 0.5, f64::NAN),
        ]);
        assert_eq!(result.score, 80.0);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_blend_nothing_present() {
        let result = blend(&[Weighted::new("a", 1.0, f64::INFINITY)]);
        assert_eq!(result.score, 0.0);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_curved_input() {
        let part = Weighted::curved("inflation", 0.2, 2.5, &Curve::inflation());
        assert_eq!(part.value, 100.0);
        let missing = Weighted::curved("inflation", 0.2, f64::NAN, &Curve::inflation());
        assert!(missing.value.is_nan());
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(70.244), 70.2);
        assert_eq!(round1(70.25), 70.3);
    }
}
