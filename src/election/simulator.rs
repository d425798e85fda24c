use rand::Rng;
use std::collections::HashMap;

use super::dhondt::{allocate_seats, Contender};
use super::types::{
    CoalitionScenario, EconomicLevel, ElectionRules, ElectionScenario, Ideology, Party,
    PartyResult, PartyShare, Region, RegionalResult, ScenarioFactors, Settlement,
    SimulationResult, Stability,
};

const SUPPORT_NOISE: f64 = 2.0;
const TURNOUT_BASE: f64 = 52.0;
const TURNOUT_NOISE: f64 = 3.0;
const TURNOUT_MIN: f64 = 35.0;
const TURNOUT_MAX: f64 = 75.0;
/// Chance two ideologically compatible parties agree to govern together.
const COALITION_ACCEPTANCE: f64 = 0.7;
const MAX_COALITIONS: usize = 3;

/// National election simulator over fixed parties and regions.
#[derive(Debug, Clone)]
pub struct ElectionSimulator {
    parties: Vec<Party>,
    regions: Vec<Region>,
    rules: ElectionRules,
}

impl ElectionSimulator {
    pub fn new(parties: Vec<Party>, regions: Vec<Region>, rules: ElectionRules) -> Self {
        Self {
            parties,
            regions,
            rules,
        }
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Run one simulation. All randomness is drawn from `rng`, so a seeded
    /// generator reproduces the same result.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        scenario: &ElectionScenario,
        rng: &mut R,
    ) -> SimulationResult {
        let factors = &scenario.factors;
        let adjusted = adjust_support(&self.parties, factors, rng);
        let turnout = turnout(factors, rng);
        let regional = simulate_regions(&adjusted, &self.regions);
        let national = aggregate_national(&self.parties, &self.regions, &regional, turnout);

        let contenders: Vec<Contender<'_>> = national
            .iter()
            .map(|(party, votes, percentage)| Contender {
                id: &party.id,
                votes: *votes,
                percentage: *percentage,
            })
            .collect();
        let seats = allocate_seats(&contenders, self.rules.total_seats, self.rules.threshold);

        let results: Vec<PartyResult> = national
            .iter()
            .zip(seats)
            .map(|((party, votes, percentage), seats)| PartyResult {
                party_id: party.id.clone(),
                name: party.name.clone(),
                votes: *votes,
                percentage: *percentage,
                seats,
                change: seats as i64 - (party.current_support * 2.5).round() as i64,
            })
            .collect();

        let ranked = rank_by_seats(&results);
        let winner = ranked.first().filter(|r| r.seats > 0).map(|r| r.party_id.clone());
        let coalition_scenarios = coalitions(&ranked, &self.parties, &self.rules, rng);
        let (confidence, uncertainty_factors) = assess_confidence(scenario, turnout);
        let invalid_votes = rng.gen_range(1.0..3.0);

        tracing::info!(
            scenario = %scenario.name,
            turnout,
            winner = winner.as_deref().unwrap_or("none"),
            coalitions = coalition_scenarios.len(),
            "election simulated"
        );

        SimulationResult {
            scenario: scenario.name.clone(),
            winner,
            results,
            coalition_scenarios,
            turnout,
            invalid_votes,
            regional_breakdown: regional,
            confidence,
            uncertainty_factors,
        }
    }
}

/// Simulate with explicit inputs, without building a simulator first.
pub fn run_election_simulation<R: Rng + ?Sized>(
    parties: &[Party],
    regions: &[Region],
    scenario: &ElectionScenario,
    rules: ElectionRules,
    rng: &mut R,
) -> SimulationResult {
    ElectionSimulator::new(parties.to_vec(), regions.to_vec(), rules).simulate(scenario, rng)
}

/// Adjusted copies of `parties`: momentum, ideology-conditioned scenario
/// nudges, then noise in [-2, 2], clamped to 0..100.
pub fn adjust_support<R: Rng + ?Sized>(
    parties: &[Party],
    factors: &ScenarioFactors,
    rng: &mut R,
) -> Vec<Party> {
    parties
        .iter()
        .map(|party| {
            let mut support = party.current_support + party.momentum * 2.0;

            if party.has(Ideology::ProEuropean) {
                support += factors.international_relations * 3.0;
            }
            if party.is_left() {
                support += (1.0 - factors.economic_situation) * 2.0;
            }
            if party.has(Ideology::Liberal) {
                support += factors.youth_engagement * 4.0;
            }
            if party.has(Ideology::Nationalist) {
                support -= factors.international_relations * 2.0;
            }

            support += rng.gen_range(-SUPPORT_NOISE..SUPPORT_NOISE);

            Party {
                current_support: support.clamp(0.0, 100.0),
                ..party.clone()
            }
        })
        .collect()
}

pub fn turnout<R: Rng + ?Sized>(factors: &ScenarioFactors, rng: &mut R) -> f64 {
    let turnout = TURNOUT_BASE
        + factors.social_stability * 5.0
        + factors.media_influence * 3.0
        + factors.youth_engagement * 8.0
        + factors.diaspora_participation * 4.0
        + rng.gen_range(-TURNOUT_NOISE..TURNOUT_NOISE);
    turnout.clamp(TURNOUT_MIN, TURNOUT_MAX)
}

/// Support of `party` in `region` before normalization.
fn regional_support(party: &Party, region: &Region) -> f64 {
    let mut support = party.current_support;
    if party.holds(&region.name) {
        support *= 1.2;
    }
    if region.urban_rural == Settlement::Urban && party.has(Ideology::Liberal) {
        support *= 1.15;
    }
    if region.urban_rural == Settlement::Rural && party.has(Ideology::Conservative) {
        support *= 1.1;
    }
    if region.economic_level == EconomicLevel::Low && party.has(Ideology::Socialist) {
        support *= 1.1;
    }
    support
}

/// Per-region vote shares, normalized to 100%. A region where nobody has
/// support gets all-zero shares and no winner.
pub fn simulate_regions(parties: &[Party], regions: &[Region]) -> Vec<RegionalResult> {
    regions
        .iter()
        .map(|region| {
            let raw: Vec<f64> = parties.iter().map(|p| regional_support(p, region)).collect();
            let total: f64 = raw.iter().sum();
            let shares: Vec<PartyShare> = parties
                .iter()
                .zip(&raw)
                .map(|(party, support)| PartyShare {
                    party_id: party.id.clone(),
                    share: if total > 0.0 { support / total * 100.0 } else { 0.0 },
                })
                .collect();

            let mut winner: Option<&PartyShare> = None;
            for share in &shares {
                if share.share > winner.map_or(0.0, |w| w.share) {
                    winner = Some(share);
                }
            }

            RegionalResult {
                region_id: region.id.clone(),
                region_name: region.name.clone(),
                winner: winner.map(|w| w.party_id.clone()),
                shares,
            }
        })
        .collect()
}

/// National votes and percentages per party, in `parties` order.
///
/// Each region contributes `registered_voters * turnout%` voters split by its
/// shares; percentages are taken over all actual voters.
pub fn aggregate_national<'a>(
    parties: &'a [Party],
    regions: &[Region],
    regional: &[RegionalResult],
    turnout: f64,
) -> Vec<(&'a Party, f64, f64)> {
    let mut votes: HashMap<&str, f64> = HashMap::new();
    for (region, result) in regions.iter().zip(regional) {
        let voters = region.registered_voters as f64 * turnout / 100.0;
        for share in &result.shares {
            *votes.entry(share.party_id.as_str()).or_insert(0.0) += share.share / 100.0 * voters;
        }
    }

    let registered: f64 = regions.iter().map(|r| r.registered_voters as f64).sum();
    let actual_voters = registered * turnout / 100.0;

    parties
        .iter()
        .map(|party| {
            let v = votes.get(party.id.as_str()).copied().unwrap_or(0.0);
            let pct = if actual_voters > 0.0 { v / actual_voters * 100.0 } else { 0.0 };
            (party, v, pct)
        })
        .collect()
}

/// Results ordered by seats descending, ties by party id ascending.
fn rank_by_seats(results: &[PartyResult]) -> Vec<PartyResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.seats.cmp(&a.seats).then_with(|| a.party_id.cmp(&b.party_id)));
    ranked
}

fn hard_incompatible(a: &Party, b: &Party) -> bool {
    let clash = |x: &Party, y: &Party| {
        (x.has(Ideology::Liberal) && y.has(Ideology::Conservative))
            || (x.has(Ideology::Nationalist) && y.has(Ideology::ProEuropean))
    };
    clash(a, b) || clash(b, a)
}

/// Liberal/conservative and nationalist/pro-European pairs never govern
/// together; any other pair agrees with probability 0.7.
pub fn compatible<R: Rng + ?Sized>(a: &Party, b: &Party, rng: &mut R) -> bool {
    if hard_incompatible(a, b) {
        return false;
    }
    rng.gen_bool(COALITION_ACCEPTANCE)
}

/// Greedy coalition search.
///
/// Each seat-holding party in rank order leads an attempt: a lone majority is
/// a stable single-party scenario and ends the search; otherwise compatible
/// seat-holders are added in rank order until a majority is reached. Attempts
/// that never reach a majority are dropped. At most three scenarios.
pub fn coalitions<R: Rng + ?Sized>(
    ranked: &[PartyResult],
    parties: &[Party],
    rules: &ElectionRules,
    rng: &mut R,
) -> Vec<CoalitionScenario> {
    let by_id: HashMap<&str, &Party> = parties.iter().map(|p| (p.id.as_str(), p)).collect();
    let majority = rules.majority();
    let mut scenarios = Vec::new();

    for (i, leader) in ranked.iter().enumerate() {
        if scenarios.len() >= MAX_COALITIONS || leader.seats == 0 {
            break;
        }
        if leader.seats >= majority {
            scenarios.push(CoalitionScenario {
                parties: vec![leader.party_id.clone()],
                total_seats: leader.seats,
                stability: Stability::Stable,
            });
            break;
        }
        let Some(leader_party) = by_id.get(leader.party_id.as_str()) else {
            continue;
        };

        let mut members = vec![leader.party_id.clone()];
        let mut total = leader.seats;
        for (j, partner) in ranked.iter().enumerate() {
            if i == j || partner.seats == 0 {
                continue;
            }
            let Some(partner_party) = by_id.get(partner.party_id.as_str()) else {
                continue;
            };
            if !compatible(leader_party, partner_party, rng) {
                continue;
            }
            members.push(partner.party_id.clone());
            total += partner.seats;
            if total >= majority {
                scenarios.push(CoalitionScenario {
                    stability: Stability::for_size(members.len()),
                    parties: members.clone(),
                    total_seats: total,
                });
                break;
            }
        }
    }

    scenarios
}

/// Confidence starts at 75 and is docked for volatile inputs, clamped to 40..90.
pub fn assess_confidence(scenario: &ElectionScenario, turnout: f64) -> (f64, Vec<String>) {
    let factors = &scenario.factors;
    let mut confidence: f64 = 75.0;
    let mut uncertainty = Vec::new();

    if factors.entries().iter().any(|(_, v)| v.abs() > 0.7) {
        confidence -= 10.0;
        uncertainty.push("High scenario volatility".to_string());
    }
    if !(40.0..=65.0).contains(&turnout) {
        confidence -= 5.0;
        uncertainty.push("Unusual turnout expectations".to_string());
    }
    if factors.youth_engagement > 0.7 {
        confidence -= 8.0;
        uncertainty.push("Unpredictable youth vote".to_string());
    }
    if scenario.events.len() > 3 {
        confidence -= 5.0;
        uncertainty.push("Multiple recent political events".to_string());
    }
    if uncertainty.is_empty() {
        uncertainty.push("Standard polling uncertainty".to_string());
    }

    (confidence.clamp(40.0, 90.0), uncertainty)
}
