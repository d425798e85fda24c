use std::collections::HashSet;

use super::schema::Config;
use crate::corruption::normalize_key;
use crate::scoring::{validate_range, validate_weights};

/// Validate a loaded config, collecting every problem instead of stopping at
/// the first one.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_weights("ppi.weights", &config.ppi.weights.entries(), &mut errors);

    let corruption = &config.corruption;
    validate_weights("corruption.weights", &corruption.weights.entries(), &mut errors);
    let mut seen = HashSet::new();
    for indicator in &corruption.indicators {
        let path = format!("corruption.indicators.{}", indicator.id);
        validate_range(&format!("{}.severity", path), indicator.severity, 0.0, 100.0, &mut errors);
        if !seen.insert(normalize_key(&indicator.id)) {
            errors.push(format!("{}: duplicate indicator id", path));
        }
    }
    let mut seen = HashSet::new();
    for record in &corruption.institutions {
        let path = format!("corruption.institutions.{}", record.institution);
        validate_range(
            &format!("{}.trust_level", path),
            record.trust_level,
            0.0,
            100.0,
            &mut errors,
        );
        validate_range(
            &format!("{}.corruption_perception", path),
            record.corruption_perception,
            0.0,
            100.0,
            &mut errors,
        );
        if !seen.insert(normalize_key(&record.institution)) {
            errors.push(format!("{}: duplicate institution", path));
        }
    }

    let election = &config.election;
    if election.total_seats == 0 {
        errors.push("election.total_seats: must be greater than 0".to_string());
    }
    validate_range("election.threshold", election.threshold, 0.0, 100.0, &mut errors);
    let mut seen = HashSet::new();
    for party in &election.parties {
        validate_range(
            &format!("election.parties.{}.current_support", party.id),
            party.current_support,
            0.0,
            100.0,
            &mut errors,
        );
        if !seen.insert(party.id.as_str()) {
            errors.push(format!("election.parties.{}: duplicate party id", party.id));
        }
    }
    for scenario in &election.scenarios {
        for (i, (name, value)) in scenario.factors.entries().into_iter().enumerate() {
            // economy, diplomacy, stability and media are signed; youth and diaspora are not
            let min = if i < 4 { -1.0 } else { 0.0 };
            validate_range(
                &format!("election.scenarios.{}.{}", scenario.name, name),
                value,
                min,
                1.0,
                &mut errors,
            );
        }
    }

    if config.diaspora.home_country.trim().is_empty() {
        errors.push("diaspora.home_country: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = Config::default();
        config.ppi.weights.economic = 0.9;
        config.election.total_seats = 0;
        config.election.threshold = 120.0;
        config.election.scenarios[0].factors.youth_engagement = -0.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("ppi.weights"));
        assert!(errors.iter().any(|e| e.contains("total_seats")));
        assert!(errors.iter().any(|e| e.contains("Status Quo.youth_engagement")));
    }

    #[test]
    fn test_negative_weight_also_breaks_sum() {
        let mut config = Config::default();
        config.corruption.weights.judicial = -0.15;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.starts_with("corruption.weights")));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut config = Config::default();
        let party = config.election.parties[0].clone();
        config.election.parties.push(party);
        let mut record = config.corruption.institutions[0].clone();
        record.institution = format!(" {} ", record.institution.to_uppercase());
        config.corruption.institutions.push(record);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("duplicate party id")));
        assert!(errors.iter().any(|e| e.contains("duplicate institution")));
    }

    #[test]
    fn test_signed_scenario_factor_allowed() {
        let mut config = Config::default();
        config.election.scenarios[0].factors.economic_situation = -0.9;
        assert!(validate_config(&config).is_ok());
    }
}
