use super::types::{
    EconomicLevel, ElectionScenario, Ideology, Party, Region, ScenarioFactors, Settlement,
};

fn party(
    id: &str,
    name: &str,
    ideology: &[Ideology],
    support: f64,
    momentum: f64,
    strongholds: &[&str],
) -> Party {
    Party {
        id: id.to_string(),
        name: name.to_string(),
        acronym: id.to_string(),
        ideology: ideology.to_vec(),
        current_support: support,
        momentum,
        strongholds: strongholds.iter().map(|s| s.to_string()).collect(),
    }
}

/// Serbian parliamentary parties.
pub fn serbian_parties() -> Vec<Party> {
    use Ideology::*;
    vec![
        party(
            "SNS",
            "Srpska Napredna Stranka",
            &[Conservative, ProEuropean],
            42.0,
            -0.5,
            &["Belgrade", "Novi Sad", "Central Serbia"],
        ),
        party(
            "SPS",
            "Socijalistička Partija Srbije",
            &[Socialist, LeftWing],
            12.0,
            0.0,
            &["Southern Serbia", "Rural areas"],
        ),
        party(
            "SSP",
            "Stranka Slobode i Pravde",
            &[Liberal, ProEuropean],
            15.0,
            1.5,
            &["Belgrade", "Urban centers"],
        ),
        party(
            "SRS",
            "Srpska Radikalna Stranka",
            &[Nationalist, RightWing],
            8.0,
            -1.0,
            &["Vojvodina", "Border regions"],
        ),
        party(
            "DS",
            "Demokratska Stranka",
            &[CenterLeft, Liberal],
            10.0,
            0.5,
            &["Belgrade", "Novi Sad"],
        ),
        party(
            "PSG",
            "Pokret Slobodnih Građana",
            &[Liberal, Civic],
            7.0,
            2.0,
            &["Belgrade", "Student areas"],
        ),
        party("Others", "Other Parties", &[Mixed], 6.0, 0.0, &["Various"]),
    ]
}

fn region(
    id: &str,
    name: &str,
    population: u64,
    registered_voters: u64,
    turnout_history: f64,
    urban_rural: Settlement,
    economic_level: EconomicLevel,
) -> Region {
    Region {
        id: id.to_string(),
        name: name.to_string(),
        population,
        registered_voters,
        turnout_history,
        urban_rural,
        economic_level,
    }
}

pub fn serbian_regions() -> Vec<Region> {
    vec![
        region(
            "belgrade",
            "Belgrade",
            1_700_000,
            1_300_000,
            58.0,
            Settlement::Urban,
            EconomicLevel::High,
        ),
        region(
            "vojvodina",
            "Vojvodina",
            1_900_000,
            1_500_000,
            52.0,
            Settlement::Mixed,
            EconomicLevel::Medium,
        ),
        region(
            "central-serbia",
            "Central Serbia",
            2_800_000,
            2_200_000,
            48.0,
            Settlement::Mixed,
            EconomicLevel::Medium,
        ),
        region(
            "southern-serbia",
            "Southern Serbia",
            900_000,
            700_000,
            45.0,
            Settlement::Rural,
            EconomicLevel::Low,
        ),
    ]
}

fn scenario(
    name: &str,
    description: &str,
    factors: [f64; 6],
    events: &[&str],
) -> ElectionScenario {
    let [
        economic_situation,
        international_relations,
        social_stability,
        media_influence,
        youth_engagement,
        diaspora_participation,
    ] = factors;
    ElectionScenario {
        name: name.to_string(),
        description: description.to_string(),
        factors: ScenarioFactors {
            economic_situation,
            international_relations,
            social_stability,
            media_influence,
            youth_engagement,
            diaspora_participation,
        },
        events: events.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn default_scenarios() -> Vec<ElectionScenario> {
    vec![
        scenario(
            "Status Quo",
            "Current trends continue with no major changes",
            [0.0, 0.2, 0.3, 0.1, 0.3, 0.2],
            &["Regular campaign period"],
        ),
        scenario(
            "Economic Crisis",
            "Economic downturn affects voter sentiment",
            [-0.7, -0.2, -0.4, 0.3, 0.5, 0.1],
            &["Inflation spike", "Unemployment rise", "Currency devaluation"],
        ),
        scenario(
            "EU Integration Progress",
            "Positive developments in EU accession talks",
            [0.4, 0.8, 0.5, 0.4, 0.7, 0.5],
            &["EU opens new chapters", "Foreign investment increase", "Visa liberalization"],
        ),
        scenario(
            "Youth Mobilization",
            "High youth turnout changes dynamics",
            [0.1, 0.3, 0.2, 0.6, 0.9, 0.6],
            &["Student protests", "Social media campaigns", "Youth registration drive"],
        ),
    ]
}
