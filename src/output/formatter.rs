use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::corruption::{
    CorruptionCase, CorruptionSentiment, IndicatorTrends, RiskLevel, SectorRisk,
};
use crate::diaspora::{DiasporaMetrics, NarrativeFlow};
use crate::election::{CoalitionOption, ElectionScenario, SimulationResult};
use crate::ppi::{PpiCategory, PpiResult};

/// Widest a seat or score bar gets, even on very wide terminals.
const MAX_BAR_WIDTH: usize = 50;
/// Bar width when stdout is not a terminal.
const DEFAULT_BAR_WIDTH: usize = 30;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Pretty-printed JSON for `--json`.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Bar width left over once `reserved` columns of labels are printed.
fn bar_width(reserved: usize) -> usize {
    match get_terminal_width() {
        Some(width) if width > reserved + 10 => (width - reserved).min(MAX_BAR_WIDTH),
        Some(_) => 10,
        None => DEFAULT_BAR_WIDTH,
    }
}

/// A bar of `width * value / max` blocks, never wider than `width`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max.is_nan() || max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max).min(1.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a count in compact notation (1.5k, 2.3M, 847)
pub fn format_count(count: f64) -> String {
    let formatted = if count >= 1_000_000.0 {
        format!("{:.1}M", count / 1_000_000.0)
    } else if count >= 1_000.0 {
        format!("{:.1}k", count / 1_000.0)
    } else {
        format!("{:.0}", count)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

fn paint_category(category: PpiCategory, use_colors: bool) -> String {
    let label = category.to_string();
    if !use_colors {
        return label;
    }
    match category {
        PpiCategory::Excellent | PpiCategory::Good => label.green().bold().to_string(),
        PpiCategory::Fair => label.yellow().bold().to_string(),
        PpiCategory::Poor | PpiCategory::Critical => label.red().bold().to_string(),
    }
}

fn paint_risk(risk: RiskLevel, use_colors: bool) -> String {
    let label = risk.to_string();
    if !use_colors {
        return label;
    }
    match risk {
        RiskLevel::Low => label.green().to_string(),
        RiskLevel::Medium => label.yellow().to_string(),
        RiskLevel::High | RiskLevel::Critical => label.red().bold().to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

pub fn format_ppi(result: &PpiResult, use_colors: bool) -> String {
    let width = bar_width(24);
    let mut lines = vec![
        format!(
            "People Pulse Index: {:.1} ({}, {})",
            result.index,
            paint_category(result.category, use_colors),
            result.trend
        ),
        format!("Confidence: {:.0}%", result.confidence),
        String::new(),
    ];

    let components = [
        ("Economic", result.components.economic),
        ("Sentiment", result.components.sentiment),
        ("Social", result.components.social),
        ("Governance", result.components.governance),
    ];
    for (label, score) in components {
        let b = bar(score, 100.0, width);
        let b = if use_colors { b.cyan().to_string() } else { b };
        lines.push(format!("  {:<11}{:>6.1}  {}", label, score, b));
    }

    lines.join("\n")
}

/// One line per point: date, index, category.
pub fn format_history(series: &[PpiResult], use_colors: bool) -> String {
    if series.is_empty() {
        return "No history points in range.".to_string();
    }
    let width = bar_width(30);
    series
        .iter()
        .map(|point| {
            let b = bar(point.index, 100.0, width);
            let b = if use_colors { b.dimmed().to_string() } else { b };
            format!(
                "{}  {:>5.1}  {:<10} {}",
                point.timestamp.format("%Y-%m-%d"),
                point.index,
                paint_category(point.category, use_colors),
                b
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_sentiment(sentiment: &CorruptionSentiment, use_colors: bool) -> String {
    let ranking = &sentiment.international_ranking;
    let mut lines = vec![
        format!(
            "Corruption index: {:.0} (public mood: {})",
            sentiment.overall, sentiment.public_mood
        ),
        format!("Ranking: {}/{} ({})", ranking.rank, ranking.total, ranking.source),
        String::new(),
        heading("By category", use_colors),
        format!("  institutional {:>5.0}", sentiment.by_category.institutional),
        format!("  sectoral      {:>5.0}", sentiment.by_category.sectoral),
        format!("  political     {:>5.0}", sentiment.by_category.political),
        format!("  judicial      {:>5.0}", sentiment.by_category.judicial),
        String::new(),
        heading("Institutions", use_colors),
    ];

    let name_width = sentiment
        .by_institution
        .iter()
        .map(|r| r.institution.chars().count())
        .max()
        .unwrap_or(0);
    for record in &sentiment.by_institution {
        lines.push(format!(
            "  {:<width$}  trust {:>3.0}  perception {:>3.0}  cases {:>3}",
            record.institution,
            record.trust_level,
            record.corruption_perception,
            record.recent_cases,
            width = name_width
        ));
    }

    if !sentiment.top_concerns.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top concerns: {}", sentiment.top_concerns.join(", ")));
    }

    lines.join("\n")
}

/// Improving and worsening indicators; stable ones are left out.
pub fn format_trends(trends: &IndicatorTrends) -> String {
    let list = |names: &[String]| {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    };
    format!(
        "Improving: {}\nWorsening: {}",
        list(&trends.improving),
        list(&trends.worsening)
    )
}

pub fn format_sector_risk(sector: &str, risk: &SectorRisk, use_colors: bool) -> String {
    let mut lines = vec![format!(
        "{}: {} risk ({:.0})",
        sector,
        paint_risk(risk.risk, use_colors),
        risk.score
    )];
    lines.extend(risk.factors.iter().map(|f| format!("  - {}", f)));
    lines.join("\n")
}

pub fn format_case(case: &CorruptionCase, use_colors: bool) -> String {
    let id = if use_colors {
        case.id.dimmed().to_string()
    } else {
        case.id.clone()
    };
    let amount = match (case.amount, case.currency.as_deref()) {
        (Some(amount), Some(currency)) => format!("  {} {}", format_count(amount), currency),
        (Some(amount), None) => format!("  {}", format_count(amount)),
        _ => String::new(),
    };
    let title = match get_terminal_width() {
        Some(width) if width > 60 => truncate(&case.title, width - 40),
        Some(_) => truncate(&case.title, 20),
        None => case.title.clone(),
    };
    format!(
        "{}  {}  [{}]  interest {:.0}{}",
        id, title, case.institution, case.public_interest, amount
    )
}

pub fn format_cases(cases: &[CorruptionCase], use_colors: bool) -> String {
    if cases.is_empty() {
        return "No high-profile cases.".to_string();
    }
    cases
        .iter()
        .map(|c| format_case(c, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Seat table with proportional bars, then coalitions and caveats.
pub fn format_simulation(result: &SimulationResult, total_seats: u32, use_colors: bool) -> String {
    let mut lines = vec![
        format!(
            "{}: winner {}",
            heading(&result.scenario, use_colors),
            result.winner.as_deref().unwrap_or("none")
        ),
        format!(
            "Turnout {:.1}%  invalid {:.1}%  confidence {:.0}%",
            result.turnout, result.invalid_votes, result.confidence
        ),
        String::new(),
    ];

    let mut ranked: Vec<_> = result.results.iter().collect();
    ranked.sort_by(|a, b| b.seats.cmp(&a.seats).then_with(|| a.party_id.cmp(&b.party_id)));
    let id_width = ranked.iter().map(|r| r.party_id.chars().count()).max().unwrap_or(0);
    let width = bar_width(id_width + 28);

    for party in ranked {
        let b = bar(party.seats as f64, total_seats as f64, width);
        let b = if use_colors { b.cyan().to_string() } else { b };
        lines.push(format!(
            "  {:<id_width$}  {:>5.1}%  {:>3} seats ({:+})  {}",
            party.party_id,
            party.percentage,
            party.seats,
            party.change,
            b,
            id_width = id_width
        ));
    }

    lines.push(String::new());
    if result.coalition_scenarios.is_empty() {
        lines.push("No majority coalition found.".to_string());
    } else {
        lines.push(heading("Coalitions", use_colors));
        for coalition in &result.coalition_scenarios {
            lines.push(format!(
                "  {}  {} seats, {}",
                coalition.parties.join(" + "),
                coalition.total_seats,
                coalition.stability
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Uncertainty: {}", result.uncertainty_factors.join("; ")));
    lines.join("\n")
}

/// One line per coalition option with an alignment bar.
pub fn format_coalition_options(
    options: &[CoalitionOption],
    threshold: u32,
    use_colors: bool,
) -> String {
    if options.is_empty() {
        return format!("No coalition reaches {} seats.", threshold);
    }

    let names: Vec<String> = options.iter().map(|o| o.parties.join(" + ")).collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let width = bar_width(name_width + 30);

    let mut lines = vec![heading(&format!("Coalitions with {}+ seats", threshold), use_colors)];
    for (option, name) in options.iter().zip(&names) {
        let b = bar(option.alignment, 1.0, width);
        let b = if use_colors { b.cyan().to_string() } else { b };
        lines.push(format!(
            "  {:<name_width$}  {:>3} seats  alignment {:.2}  {}",
            name,
            option.seats,
            option.alignment,
            b,
            name_width = name_width
        ));
    }
    lines.join("\n")
}

pub fn format_scenarios(scenarios: &[ElectionScenario], use_colors: bool) -> String {
    if scenarios.is_empty() {
        return "No scenarios configured.".to_string();
    }
    scenarios
        .iter()
        .map(|s| {
            let name = if use_colors {
                s.name.bold().to_string()
            } else {
                s.name.clone()
            };
            if s.description.is_empty() {
                name
            } else {
                format!("{}  {}", name, s.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_flows(flows: &[NarrativeFlow], use_colors: bool) -> String {
    if flows.is_empty() {
        return "No narrative re-entry detected.".to_string();
    }
    flows
        .iter()
        .map(|flow| {
            let narrative = if use_colors {
                flow.narrative.bold().to_string()
            } else {
                flow.narrative.clone()
            };
            format!(
                "{}  {} -> {}  strength {:.2}  {} posts  [{}]",
                narrative,
                flow.origin,
                flow.destination,
                flow.strength,
                flow.timeline.len(),
                flow.platforms.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_metrics(metrics: &DiasporaMetrics, use_colors: bool) -> String {
    let s = &metrics.sentiment_breakdown;
    let mut lines = vec![
        format!(
            "Diaspora population {}  active users {}",
            format_count(metrics.total_population as f64),
            metrics.active_users
        ),
        format!(
            "Engagement rate {:.1}%  influence index {:.2}",
            metrics.engagement_rate, metrics.influence_index
        ),
        format!(
            "Sentiment: {:.0}% positive, {:.0}% negative, {:.0}% neutral",
            s.positive, s.negative, s.neutral
        ),
    ];
    if !metrics.top_narratives.is_empty() {
        lines.push(format!("Top narratives: {}", metrics.top_narratives.join(", ")));
    }
    lines.push(String::new());
    lines.push(heading("Cross-border flows", use_colors));
    lines.push(format_flows(&metrics.cross_border_flows, use_colors));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corruption::{CorruptionEngine, CorruptionCatalog};
    use crate::diaspora::DiasporaTracker;
    use crate::election::{
        default_scenarios, ElectionRules, ElectionSimulator, PoliticalOntology, MAJORITY_SEATS,
    };
    use crate::ppi::{compute_ppi, PpiFactors};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference_factors() -> PpiFactors {
        PpiFactors {
            output_gap: -1.8,
            unemployment_rate: 11.2,
            inflation_rate: 2.4,
            gdp_growth_rate: 3.2,
            media_confidence: 62.0,
            social_media_sentiment: 58.0,
            poll_approval: 55.0,
            corruption_index: 38.0,
            safety_index: 72.0,
            healthcare_access: 65.0,
            policy_effectiveness: 58.0,
            transparency_score: 52.0,
        }
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(50.0, 100.0, 10), "█████");
        assert_eq!(bar(150.0, 100.0, 4), "████");
        assert_eq!(bar(-3.0, 100.0, 10), "");
        assert_eq!(bar(5.0, 0.0, 10), "");
        assert_eq!(bar(f64::NAN, 100.0, 10), "");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(847.0), "847");
        assert_eq!(format_count(1000.0), "1k");
        assert_eq!(format_count(1500.0), "1.5k");
        assert_eq!(format_count(1_770_000.0), "1.8M");
        assert_eq!(format_count(2_000_000.0), "2M");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a lon...");
        assert_eq!(truncate("Shëndetësia", 3), "Shë");
    }

    #[test]
    fn test_format_ppi_plain() {
        let result = compute_ppi(&reference_factors(), Some(60.0));
        let text = format_ppi(&result, false);
        assert!(text.starts_with("People Pulse Index: 70.2 (Good, improving)"));
        assert!(text.contains("Confidence: 100%"));
        assert!(text.contains("Governance"));
    }

    #[test]
    fn test_format_sentiment_plain() {
        let engine = CorruptionEngine::in_memory(CorruptionCatalog::default());
        let text = format_sentiment(&engine.sentiment().unwrap(), false);
        assert!(text.starts_with("Corruption index: 68"));
        assert!(text.contains("Parlamenti"));
        assert!(text.contains("104/180"));
    }

    #[test]
    fn test_format_sector_risk_plain() {
        let risk = SectorRisk {
            risk: RiskLevel::High,
            score: 75.0,
            factors: vec!["3 recent cases".to_string()],
        };
        assert_eq!(
            format_sector_risk("Education", &risk, false),
            "Education: high risk (75)\n  - 3 recent cases"
        );
    }

    #[test]
    fn test_format_simulation_plain() {
        let rules = ElectionRules::default();
        let sim = ElectionSimulator::new(
            crate::election::serbian_parties(),
            crate::election::serbian_regions(),
            rules,
        );
        let result = sim.simulate(&default_scenarios()[0], &mut StdRng::seed_from_u64(7));
        let text = format_simulation(&result, rules.total_seats, false);
        assert!(text.starts_with("Status Quo: winner SNS"));
        assert!(text.contains("seats"));
        assert!(text.contains("Uncertainty:"));
    }

    #[test]
    fn test_format_empty_collections() {
        assert_eq!(format_flows(&[], false), "No narrative re-entry detected.");
        assert_eq!(format_cases(&[], false), "No high-profile cases.");
        assert_eq!(format_history(&[], false), "No history points in range.");
        let metrics = DiasporaTracker::default().metrics(&[]);
        assert!(format_metrics(&metrics, false).contains("active users 0"));
    }

    #[test]
    fn test_format_trends() {
        let engine = CorruptionEngine::in_memory(CorruptionCatalog::default());
        assert_eq!(
            format_trends(&engine.trends()),
            "Improving: Judiciary System, Police\nWorsening: Healthcare, Local Government"
        );
    }

    #[test]
    fn test_format_json() {
        let risk = SectorRisk {
            risk: RiskLevel::Critical,
            score: 80.0,
            factors: vec![],
        };
        let json = format_json(&risk).unwrap();
        assert!(json.contains("\"risk\": \"critical\""));
    }

    #[test]
    fn test_format_coalition_options_plain() {
        let options = PoliticalOntology::default().coalition_options(MAJORITY_SEATS);
        let text = format_coalition_options(&options, MAJORITY_SEATS, false);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Coalitions with 71+ seats"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("  PS + PD"));
        assert!(first.contains("133 seats  alignment 0.53"));
        assert_eq!(
            format_coalition_options(&[], 200, false),
            "No coalition reaches 200 seats."
        );
    }
}
