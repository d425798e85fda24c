use super::types::{DiasporaLocation, Influence};

fn location(
    country: &str,
    code: &str,
    population: u64,
    cities: &[&str],
    platforms: &[&str],
    influence: Influence,
) -> DiasporaLocation {
    DiasporaLocation {
        country: country.to_string(),
        country_code: code.to_string(),
        population,
        main_cities: cities.iter().map(|c| c.to_string()).collect(),
        social_platforms: platforms.iter().map(|p| p.to_string()).collect(),
        influence,
    }
}

/// Albanian diaspora communities.
pub fn default_locations() -> Vec<DiasporaLocation> {
    use Influence::*;
    vec![
        location(
            "Italy",
            "IT",
            500_000,
            &["Milan", "Rome", "Turin", "Florence"],
            &["Facebook", "Instagram", "TikTok"],
            High,
        ),
        location(
            "Greece",
            "GR",
            450_000,
            &["Athens", "Thessaloniki"],
            &["Facebook", "Instagram"],
            High,
        ),
        location(
            "Germany",
            "DE",
            300_000,
            &["Munich", "Stuttgart", "Frankfurt", "Berlin"],
            &["Facebook", "Instagram", "TikTok"],
            Medium,
        ),
        location(
            "Switzerland",
            "CH",
            200_000,
            &["Zurich", "Geneva", "Basel"],
            &["Facebook", "Instagram"],
            Medium,
        ),
        location(
            "United Kingdom",
            "UK",
            150_000,
            &["London", "Manchester", "Birmingham"],
            &["Facebook", "Instagram", "Twitter"],
            Medium,
        ),
        location(
            "United States",
            "US",
            120_000,
            &["New York", "Detroit", "Boston", "Chicago"],
            &["Facebook", "Instagram", "TikTok", "Twitter"],
            Low,
        ),
        location("Canada", "CA", 50_000, &["Toronto", "Montreal"], &["Facebook", "Instagram"], Low),
    ]
}

pub const DEFAULT_HOME_COUNTRY: &str = "Albania";

/// Topics drawn on for sample posts.
pub const SAMPLE_TOPICS: [&str; 10] = [
    "EU Accession",
    "Corruption",
    "Elections",
    "Economy",
    "Migration",
    "Education",
    "Healthcare",
    "Infrastructure",
    "Justice Reform",
    "Tourism",
];
