use anyhow::Result;

use super::catalog::CorruptionCatalog;
use super::store::{CorruptionState, CorruptionStore, JsonFileStore, MemoryStore};
use super::types::{
    normalize_key, CaseMatch, CategorySeverity, CorruptionCase, CorruptionIndicator,
    CorruptionSentiment, HeatCell, IndicatorCategory, IndicatorTrend, IndicatorTrends,
    InstitutionTrust, InternationalRanking, NewCase, PublicMood, RiskLevel, SectorRisk,
};
use crate::scoring::SeverityWeights;

const PERCEPTION_STEP: f64 = 2.0;
const TRUST_STEP: f64 = 3.0;
const WORSENING_PENALTY: f64 = 10.0;
const IMPROVING_CREDIT: f64 = 5.0;
const CASE_CLUSTER_PENALTY: f64 = 15.0;
/// More than this many related cases triggers the cluster penalty.
const CASE_CLUSTER_SIZE: usize = 2;
const TOP_CONCERNS: usize = 5;

/// Corruption sentiment over a fixed indicator catalog plus a store of
/// institution trust records and cases.
pub struct CorruptionEngine<S: CorruptionStore> {
    indicators: Vec<CorruptionIndicator>,
    weights: SeverityWeights,
    case_match: CaseMatch,
    ranking: InternationalRanking,
    store: S,
}

impl CorruptionEngine<MemoryStore> {
    /// Engine over an in-memory store seeded from the catalog.
    pub fn in_memory(catalog: CorruptionCatalog) -> Self {
        let seed = CorruptionState::new(catalog.institutions.clone(), catalog.cases.clone());
        Self::new(catalog, MemoryStore::new(seed))
    }
}

impl CorruptionEngine<JsonFileStore> {
    /// Engine over a JSON state file, seeded from the catalog when the file is absent.
    pub fn with_state_file(catalog: CorruptionCatalog, path: std::path::PathBuf) -> Self {
        let seed = CorruptionState::new(catalog.institutions.clone(), catalog.cases.clone());
        Self::new(catalog, JsonFileStore::new(path, seed))
    }
}

impl<S: CorruptionStore> CorruptionEngine<S> {
    pub fn new(catalog: CorruptionCatalog, store: S) -> Self {
        Self {
            indicators: catalog.indicators,
            weights: catalog.weights,
            case_match: catalog.case_match,
            ranking: catalog.ranking,
            store,
        }
    }

    pub fn indicators(&self) -> &[CorruptionIndicator] {
        &self.indicators
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mean severity of a category, or None if the catalog has no indicator in it.
    pub fn category_severity(&self, category: IndicatorCategory) -> Option<f64> {
        let (sum, count) = self
            .indicators
            .iter()
            .filter(|i| i.category == category)
            .fold((0.0, 0usize), |(sum, count), i| (sum + i.severity, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    fn weight_of(&self, category: IndicatorCategory) -> f64 {
        match category {
            IndicatorCategory::Institutional => self.weights.institutional,
            IndicatorCategory::Sectoral => self.weights.sectoral,
            IndicatorCategory::Political => self.weights.political,
            IndicatorCategory::Judicial => self.weights.judicial,
        }
    }

    /// Weighted sum of per-category mean severities, rounded to a whole number.
    /// Empty categories contribute nothing.
    pub fn overall_index(&self) -> f64 {
        IndicatorCategory::ALL
            .iter()
            .filter_map(|c| self.category_severity(*c).map(|s| s * self.weight_of(*c)))
            .sum::<f64>()
            .round()
    }

    pub fn sentiment(&self) -> Result<CorruptionSentiment> {
        let overall = self.overall_index();
        let rounded = |c| self.category_severity(c).map(f64::round).unwrap_or(0.0);

        let mut ranked: Vec<&CorruptionIndicator> = self.indicators.iter().collect();
        ranked.sort_by(|a, b| b.severity.total_cmp(&a.severity));
        let top_concerns = ranked
            .iter()
            .take(TOP_CONCERNS)
            .map(|i| i.name.en.clone())
            .collect();

        let public_mood = if overall > 70.0 {
            PublicMood::Pessimistic
        } else if overall > 50.0 {
            PublicMood::Neutral
        } else {
            PublicMood::Optimistic
        };

        Ok(CorruptionSentiment {
            overall,
            by_category: CategorySeverity {
                institutional: rounded(IndicatorCategory::Institutional),
                sectoral: rounded(IndicatorCategory::Sectoral),
                political: rounded(IndicatorCategory::Political),
                judicial: rounded(IndicatorCategory::Judicial),
            },
            by_institution: self.store.snapshot()?.institutions,
            top_concerns,
            public_mood,
            international_ranking: self.ranking.clone(),
        })
    }

    pub fn institutions(&self) -> Result<Vec<InstitutionTrust>> {
        Ok(self.store.snapshot()?.institutions)
    }

    /// Record a case. If its institution matches a tracked institution (by
    /// normalized name), that record gains a case, +2 perception (max 100)
    /// and -3 trust (min 0). Append and adjustment happen in one store update.
    pub fn add_case(&self, case: NewCase) -> Result<CorruptionCase> {
        let key = normalize_key(&case.institution);
        let mut pending = Some(case);
        let mut recorded = None;

        self.store.update(&mut |state| {
            let Some(case) = pending.take() else {
                return;
            };
            let id = state.allocate_case_id();
            let case = case.into_case(id);

            match state
                .institutions
                .iter_mut()
                .find(|i| normalize_key(&i.institution) == key)
            {
                Some(institution) => {
                    institution.recent_cases += 1;
                    institution.corruption_perception =
                        (institution.corruption_perception + PERCEPTION_STEP).min(100.0);
                    institution.trust_level = (institution.trust_level - TRUST_STEP).max(0.0);
                    tracing::info!(
                        institution = %institution.institution,
                        trust = institution.trust_level,
                        perception = institution.corruption_perception,
                        "institution trust adjusted"
                    );
                }
                None => {
                    tracing::debug!(
                        institution = %case.institution,
                        "case not tied to a tracked institution"
                    );
                }
            }

            state.cases.push(case.clone());
            recorded = Some(case);
        })?;

        recorded.ok_or_else(|| anyhow::anyhow!("case was not recorded"))
    }

    /// Cases with public interest above 70, most prominent first.
    pub fn high_profile_cases(&self, limit: usize) -> Result<Vec<CorruptionCase>> {
        let mut cases: Vec<CorruptionCase> = self
            .store
            .snapshot()?
            .cases
            .into_iter()
            .filter(|c| c.public_interest > 70.0)
            .collect();
        cases.sort_by(|a, b| b.public_interest.total_cmp(&a.public_interest));
        cases.truncate(limit);
        Ok(cases)
    }

    /// Risk for a sector named by indicator id or name. Unknown sectors get a
    /// neutral medium result.
    pub fn sector_risk(&self, sector: &str) -> Result<SectorRisk> {
        let key = normalize_key(sector);
        let Some(indicator) = self.indicators.iter().find(|i| i.answers_to(&key)) else {
            tracing::warn!(sector, "unknown sector, reporting default risk");
            return Ok(SectorRisk {
                risk: RiskLevel::Medium,
                score: 50.0,
                factors: vec!["Unknown sector".to_string()],
            });
        };

        let mut factors = Vec::new();
        let mut score = indicator.severity;

        match indicator.trend {
            IndicatorTrend::Worsening => {
                score += WORSENING_PENALTY;
                factors.push("Worsening trend".to_string());
            }
            IndicatorTrend::Improving => {
                score -= IMPROVING_CREDIT;
                factors.push("Improving trend".to_string());
            }
            IndicatorTrend::Stable => {}
        }

        let related = self
            .store
            .snapshot()?
            .cases
            .iter()
            .filter(|c| self.case_match.matches(&c.institution, &key))
            .count();
        if related > CASE_CLUSTER_SIZE {
            score += CASE_CLUSTER_PENALTY;
            factors.push(format!("{} recent cases", related));
        }

        let score = score.clamp(0.0, 100.0);
        Ok(SectorRisk {
            risk: risk_level(score),
            score,
            factors,
        })
    }

    pub fn trends(&self) -> IndicatorTrends {
        let mut trends = IndicatorTrends::default();
        for indicator in &self.indicators {
            let bucket = match indicator.trend {
                IndicatorTrend::Improving => &mut trends.improving,
                IndicatorTrend::Stable => &mut trends.stable,
                IndicatorTrend::Worsening => &mut trends.worsening,
            };
            bucket.push(indicator.name.en.clone());
        }
        trends
    }

    /// Trust, Corruption and Cases cells for each institution.
    pub fn heat_map(&self) -> Result<Vec<HeatCell>> {
        let institutions = self.store.snapshot()?.institutions;
        let mut cells = Vec::with_capacity(institutions.len() * 3);
        for inst in institutions {
            let cell = |indicator: &str, value: f64| HeatCell {
                institution: inst.institution.clone(),
                indicator: indicator.to_string(),
                value,
            };
            cells.push(cell("Trust", inst.trust_level));
            cells.push(cell("Corruption", inst.corruption_perception));
            cells.push(cell("Cases", (inst.recent_cases as f64 * 2.0).min(100.0)));
        }
        Ok(cells)
    }
}

pub fn risk_level(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
