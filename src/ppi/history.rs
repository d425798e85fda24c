use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;

use super::calculator::{categorize, PpiComponents, PpiResult, Trend};
use super::factors::PpiFactors;
use crate::scoring::round1;

const WALK_START: f64 = 65.0;
const WALK_FLOOR: f64 = 30.0;
const WALK_CEILING: f64 = 85.0;

/// Synthetic PPI series between `start` and `end` (inclusive), one point per
/// `step`. The index follows a bounded random walk; components and factors
/// are jittered around it.
///
/// Returns an empty series when `end` precedes `start` or `step` is zero. The
/// series stops early if the next point would fall outside chrono's range.
pub fn historical_series<R: Rng + ?Sized>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    rng: &mut R,
) -> Vec<PpiResult> {
    let Ok(step) = chrono::Duration::from_std(step) else {
        return Vec::new();
    };
    if step <= chrono::Duration::zero() || end < start {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut walk = WALK_START;
    let mut at = start;

    while at <= end {
        walk += (rng.gen::<f64>() - 0.5) * 5.0;
        walk = walk.clamp(WALK_FLOOR, WALK_CEILING);

        let mut jitter = || walk + (rng.gen::<f64>() - 0.5) * 10.0;
        let components = PpiComponents {
            economic: round1(jitter()),
            sentiment: round1(jitter()),
            social: round1(jitter()),
            governance: round1(jitter()),
        };

        results.push(PpiResult {
            index: round1(walk),
            category: categorize(walk),
            trend: Trend::Stable,
            components,
            factors: synthetic_factors(walk, rng),
            timestamp: at,
            confidence: round1(85.0 + rng.gen::<f64>() * 10.0),
        });

        match at.checked_add_signed(step) {
            Some(next) => at = next,
            None => break,
        }
    }

    tracing::debug!(points = results.len(), "generated historical series");
    results
}

/// Series covering the `days` days that end at `end`.
pub fn recent_series<R: Rng + ?Sized>(
    end: DateTime<Utc>,
    days: u32,
    step: Duration,
    rng: &mut R,
) -> Result<Vec<PpiResult>> {
    let start = chrono::Duration::try_days(i64::from(days))
        .and_then(|window| end.checked_sub_signed(window))
        .with_context(|| {
            format!("History window of {} days reaches past the earliest date", days)
        })?;
    Ok(historical_series(start, end, step, rng))
}

fn synthetic_factors<R: Rng + ?Sized>(base: f64, rng: &mut R) -> PpiFactors {
    let mut variance = || (rng.gen::<f64>() - 0.5) * 10.0;
    PpiFactors {
        output_gap: -2.0 + variance() / 5.0,
        unemployment_rate: (10.0 - base / 10.0 + variance()).max(2.0),
        inflation_rate: 2.5 + variance() / 5.0,
        gdp_growth_rate: base / 20.0 + variance() / 5.0,
        media_confidence: base + variance(),
        social_media_sentiment: base + variance(),
        poll_approval: base + variance(),
        corruption_index: base + variance(),
        safety_index: base + variance(),
        healthcare_access: base + variance(),
        policy_effectiveness: base + variance(),
        transparency_score: base + variance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn week() -> Duration {
        humantime::parse_duration("7d").unwrap()
    }

    #[test]
    fn test_weekly_points() {
        let start = Utc::now();
        let end = start + chrono::Duration::days(28);
        let mut rng = StdRng::seed_from_u64(7);
        let series = historical_series(start, end, week(), &mut rng);
        assert_eq!(series.len(), 5);
        assert_eq!(series[1].timestamp - series[0].timestamp, chrono::Duration::days(7));
    }

    #[test]
    fn test_walk_stays_in_bounds() {
        let start = Utc::now();
        let end = start + chrono::Duration::days(7 * 200);
        let mut rng = StdRng::seed_from_u64(11);
        for point in historical_series(start, end, week(), &mut rng) {
            assert!((WALK_FLOOR..=WALK_CEILING).contains(&point.index));
            assert!((85.0..=95.0).contains(&point.confidence));
        }
    }

    #[test]
    fn test_seeded_series_is_reproducible() {
        let start = Utc::now();
        let end = start + chrono::Duration::days(70);
        let a = historical_series(start, end, week(), &mut StdRng::seed_from_u64(3));
        let b = historical_series(start, end, week(), &mut StdRng::seed_from_u64(3));
        let a: Vec<f64> = a.iter().map(|p| p.index).collect();
        let b: Vec<f64> = b.iter().map(|p| p.index).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_huge_step_yields_single_point() {
        let end = Utc::now();
        let start = end - chrono::Duration::days(1);
        let step = humantime::parse_duration("300000y").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let series = historical_series(start, end, step, &mut rng);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].timestamp, start);
    }

    #[test]
    fn test_recent_series_window() {
        let end = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);
        let series = recent_series(end, 14, week(), &mut rng).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].timestamp, end - chrono::Duration::days(14));
    }

    #[test]
    fn test_recent_series_rejects_out_of_range_window() {
        let mut rng = StdRng::seed_from_u64(9);
        let err = recent_series(Utc::now(), u32::MAX, week(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("4294967295 days"));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let start = Utc::now();
        let end = start - chrono::Duration::days(1);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(historical_series(start, end, week(), &mut rng).is_empty());
        assert!(historical_series(start, start, Duration::ZERO, &mut rng).is_empty());
    }
}
