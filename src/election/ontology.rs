use serde::{Deserialize, Serialize};

use crate::corruption::types::LocalizedName;

/// Seats needed for a majority in the 140-seat Albanian parliament.
pub const MAJORITY_SEATS: u32 = 71;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyPosition {
    Government,
    Opposition,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyProfile {
    pub id: String,
    pub name: LocalizedName,
    pub leader: String,
    pub founded: u16,
    pub ideology: Vec<String>,
    pub position: PartyPosition,
    /// Seats held in the current parliament.
    pub seats: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: String,
    pub name: String,
    pub party: String,
    pub role: String,
    pub birth_year: u16,
    pub previous_roles: Vec<String>,
    pub approval_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Domestic,
    Foreign,
    Economic,
    Social,
    Environmental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticalIssue {
    pub id: String,
    pub name: LocalizedName,
    pub category: IssueCategory,
    pub priority: Priority,
    pub related_parties: Vec<String>,
    /// -1 (hostile) to 1 (favourable).
    pub public_sentiment: f64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Support,
    Oppose,
    Neutral,
}

/// A party's position on one issue. `strength` runs 0 to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueStance {
    pub issue: String,
    pub party: String,
    pub stance: Stance,
    pub strength: f64,
    pub statements: Vec<String>,
}

/// A combination of parties reaching the seat threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionOption {
    pub parties: Vec<String>,
    pub seats: u32,
    /// Mean pairwise party similarity, 0 to 1.
    pub alignment: f64,
}

/// Parties, leaders and issues of a political landscape, plus the stances
/// linking parties to issues.
#[derive(Debug, Clone, PartialEq)]
pub struct PoliticalOntology {
    parties: Vec<PartyProfile>,
    leaders: Vec<Leader>,
    issues: Vec<PoliticalIssue>,
    stances: Vec<IssueStance>,
}

impl Default for PoliticalOntology {
    fn default() -> Self {
        Self::new(
            albanian_parties(),
            albanian_leaders(),
            albanian_issues(),
            albanian_stances(),
        )
    }
}

impl PoliticalOntology {
    pub fn new(
        parties: Vec<PartyProfile>,
        leaders: Vec<Leader>,
        issues: Vec<PoliticalIssue>,
        stances: Vec<IssueStance>,
    ) -> Self {
        Self {
            parties,
            leaders,
            issues,
            stances,
        }
    }

    pub fn parties(&self) -> &[PartyProfile] {
        &self.parties
    }

    pub fn party(&self, id: &str) -> Option<&PartyProfile> {
        self.parties.iter().find(|p| p.id == id)
    }

    pub fn leaders(&self) -> &[Leader] {
        &self.leaders
    }

    pub fn issues(&self) -> &[PoliticalIssue] {
        &self.issues
    }

    pub fn issues_in(&self, category: IssueCategory) -> Vec<&PoliticalIssue> {
        self.issues.iter().filter(|i| i.category == category).collect()
    }

    pub fn stance(&self, party: &str, issue: &str) -> Option<&IssueStance> {
        self.stances
            .iter()
            .find(|s| s.party == party && s.issue == issue)
    }

    fn stances_of<'a>(&'a self, party: &'a str) -> impl Iterator<Item = &'a IssueStance> + 'a {
        self.stances.iter().filter(move |s| s.party == party)
    }

    /// Agreement between two parties over the issues both take a stance on.
    ///
    /// Each shared issue scores `1 - |strength difference|` when the stances
    /// agree and 0 when they differ; the result is the mean over shared
    /// issues, or 0 when there are none.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let mut total = 0.0;
        let mut shared = 0usize;
        for left in self.stances_of(a) {
            let Some(right) = self.stance(b, &left.issue) else {
                continue;
            };
            if left.stance == right.stance {
                total += 1.0 - (left.strength - right.strength).abs();
            }
            shared += 1;
        }
        if shared == 0 {
            0.0
        } else {
            total / shared as f64
        }
    }

    /// Two- and three-party combinations of seated parties holding at least
    /// `threshold` seats, best aligned first. Equal alignments keep party
    /// order.
    pub fn coalition_options(&self, threshold: u32) -> Vec<CoalitionOption> {
        let seated: Vec<&PartyProfile> = self.parties.iter().filter(|p| p.seats > 0).collect();
        let mut options = Vec::new();

        for i in 0..seated.len() {
            for j in i + 1..seated.len() {
                self.push_option(&[seated[i], seated[j]], threshold, &mut options);
                for k in j + 1..seated.len() {
                    self.push_option(&[seated[i], seated[j], seated[k]], threshold, &mut options);
                }
            }
        }

        options.sort_by(|a, b| b.alignment.total_cmp(&a.alignment));
        tracing::debug!(threshold, options = options.len(), "coalition options");
        options
    }

    fn push_option(
        &self,
        members: &[&PartyProfile],
        threshold: u32,
        options: &mut Vec<CoalitionOption>,
    ) {
        let seats = members.iter().fold(0u32, |sum, p| sum.saturating_add(p.seats));
        if seats < threshold {
            return;
        }

        let mut pairs = 0usize;
        let mut alignment = 0.0;
        for (n, a) in members.iter().enumerate() {
            for b in &members[n + 1..] {
                alignment += self.similarity(&a.id, &b.id);
                pairs += 1;
            }
        }

        options.push(CoalitionOption {
            parties: members.iter().map(|p| p.id.clone()).collect(),
            seats,
            alignment: alignment / pairs as f64,
        });
    }

    /// Issues the party has taken a stance on, strongest stance first.
    pub fn trending_topics(&self, party: &str) -> Vec<&PoliticalIssue> {
        let strength = |issue: &PoliticalIssue| {
            self.stance(party, &issue.id).map_or(0.0, |s| s.strength)
        };
        let mut topics: Vec<&PoliticalIssue> = self
            .issues
            .iter()
            .filter(|i| self.stance(party, &i.id).is_some())
            .collect();
        topics.sort_by(|a, b| strength(b).total_cmp(&strength(a)));
        topics
    }
}

fn localized(sq: &str, en: &str) -> LocalizedName {
    LocalizedName {
        sq: sq.to_string(),
        en: en.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn albanian_parties() -> Vec<PartyProfile> {
    use PartyPosition::*;
    vec![
        PartyProfile {
            id: "PS".to_string(),
            name: localized("Partia Socialiste e Shqipërisë", "Socialist Party of Albania"),
            leader: "Edi Rama".to_string(),
            founded: 1991,
            ideology: strings(&["Social Democracy", "Third Way", "Pro-European"]),
            position: Government,
            seats: 74,
            color: "#FF1744".to_string(),
        },
        PartyProfile {
            id: "PD".to_string(),
            name: localized("Partia Demokratike e Shqipërisë", "Democratic Party of Albania"),
            leader: "Sali Berisha".to_string(),
            founded: 1990,
            ideology: strings(&["Conservative", "Liberal Conservative", "Pro-European"]),
            position: Opposition,
            seats: 59,
            color: "#0277BD".to_string(),
        },
        PartyProfile {
            id: "LSI".to_string(),
            name: localized(
                "Lëvizja Socialiste për Integrim",
                "Socialist Movement for Integration",
            ),
            leader: "Ilir Meta".to_string(),
            founded: 2004,
            ideology: strings(&["Social Democracy", "Populism"]),
            position: Opposition,
            seats: 4,
            color: "#FFA726".to_string(),
        },
        PartyProfile {
            id: "PSD".to_string(),
            name: localized(
                "Partia Socialdemokrate e Shqipërisë",
                "Social Democratic Party of Albania",
            ),
            leader: "Tom Doshi".to_string(),
            founded: 1991,
            ideology: strings(&["Social Democracy"]),
            position: Neutral,
            seats: 3,
            color: "#9C27B0".to_string(),
        },
        PartyProfile {
            id: "PR".to_string(),
            name: localized("Partia Republikane e Shqipërisë", "Republican Party of Albania"),
            leader: "Fatmir Mediu".to_string(),
            founded: 1991,
            ideology: strings(&["National Conservatism", "Right-wing"]),
            position: Opposition,
            seats: 0,
            color: "#795548".to_string(),
        },
        PartyProfile {
            id: "PL".to_string(),
            name: localized("Partia e Lirisë", "Freedom Party"),
            leader: "Ilir Meta".to_string(),
            founded: 2022,
            ideology: strings(&["Populism", "Anti-establishment"]),
            position: Opposition,
            seats: 0,
            color: "#4CAF50".to_string(),
        },
    ]
}

fn leader(
    id: &str,
    name: &str,
    party: &str,
    role: &str,
    birth_year: u16,
    previous_roles: &[&str],
    approval_rating: f64,
) -> Leader {
    Leader {
        id: id.to_string(),
        name: name.to_string(),
        party: party.to_string(),
        role: role.to_string(),
        birth_year,
        previous_roles: strings(previous_roles),
        approval_rating: Some(approval_rating),
    }
}

pub fn albanian_leaders() -> Vec<Leader> {
    vec![
        leader(
            "edi-rama",
            "Edi Rama",
            "PS",
            "Prime Minister",
            1964,
            &["Mayor of Tirana", "Minister of Culture"],
            42.0,
        ),
        leader(
            "sali-berisha",
            "Sali Berisha",
            "PD",
            "Opposition Leader",
            1944,
            &["President of Albania", "Prime Minister"],
            38.0,
        ),
        leader(
            "ilir-meta",
            "Ilir Meta",
            "PL",
            "Party Leader",
            1969,
            &["President of Albania", "Prime Minister", "Speaker of Parliament"],
            25.0,
        ),
        leader(
            "lulzim-basha",
            "Lulzim Basha",
            "PD",
            "Former Party Leader",
            1974,
            &["Minister of Foreign Affairs", "Minister of Interior"],
            20.0,
        ),
    ]
}

fn issue(
    id: &str,
    name: LocalizedName,
    category: IssueCategory,
    priority: Priority,
    related_parties: &[&str],
    public_sentiment: f64,
    keywords: &[&str],
) -> PoliticalIssue {
    PoliticalIssue {
        id: id.to_string(),
        name,
        category,
        priority,
        related_parties: strings(related_parties),
        public_sentiment,
        keywords: strings(keywords),
    }
}

pub fn albanian_issues() -> Vec<PoliticalIssue> {
    use IssueCategory::*;
    use Priority::*;
    vec![
        issue(
            "eu-accession",
            localized("Anëtarësimi në BE", "EU Accession"),
            Foreign,
            Critical,
            &["PS", "PD", "LSI"],
            0.75,
            &["EU", "Brussels", "negotiations", "chapters", "reforms"],
        ),
        issue(
            "corruption",
            localized("Korrupsioni", "Corruption"),
            Domestic,
            Critical,
            &["PS", "PD", "LSI", "PL"],
            -0.8,
            &["SPAK", "justice", "bribes", "scandal", "arrests"],
        ),
        issue(
            "migration",
            localized("Emigrimi", "Migration"),
            Social,
            High,
            &["PS", "PD"],
            -0.6,
            &["youth", "brain drain", "diaspora", "return"],
        ),
        issue(
            "economy",
            localized("Ekonomia", "Economy"),
            Economic,
            High,
            &["PS", "PD", "LSI"],
            -0.3,
            &["GDP", "inflation", "jobs", "investment", "tourism"],
        ),
        issue(
            "justice-reform",
            localized("Reforma në Drejtësi", "Justice Reform"),
            Domestic,
            Critical,
            &["PS", "PD"],
            0.5,
            &["vetting", "judges", "prosecutors", "courts", "SPAK"],
        ),
        issue(
            "energy",
            localized("Energjia", "Energy"),
            Economic,
            High,
            &["PS", "PD"],
            -0.4,
            &["electricity", "prices", "hydropower", "imports", "crisis"],
        ),
        issue(
            "education",
            localized("Arsimi", "Education"),
            Social,
            Medium,
            &["PS", "PD"],
            -0.2,
            &["schools", "universities", "reform", "quality", "teachers"],
        ),
        issue(
            "healthcare",
            localized("Shëndetësia", "Healthcare"),
            Social,
            High,
            &["PS", "PD", "LSI"],
            -0.5,
            &["hospitals", "doctors", "medicine", "insurance", "COVID"],
        ),
        issue(
            "environment",
            localized("Mjedisi", "Environment"),
            Environmental,
            Medium,
            &["PS", "PD"],
            0.3,
            &["pollution", "waste", "rivers", "national parks", "climate"],
        ),
        issue(
            "infrastructure",
            localized("Infrastruktura", "Infrastructure"),
            Economic,
            High,
            &["PS", "PD"],
            0.2,
            &["roads", "airports", "ports", "construction", "investment"],
        ),
    ]
}

fn stance(
    issue: &str,
    party: &str,
    stance: Stance,
    strength: f64,
    statements: &[&str],
) -> IssueStance {
    IssueStance {
        issue: issue.to_string(),
        party: party.to_string(),
        stance,
        strength,
        statements: strings(statements),
    }
}

pub fn albanian_stances() -> Vec<IssueStance> {
    use Stance::*;
    vec![
        stance(
            "eu-accession",
            "PS",
            Support,
            0.9,
            &["Albania will join EU by 2030", "Reforms are on track"],
        ),
        stance(
            "eu-accession",
            "PD",
            Support,
            0.8,
            &["Government is failing EU negotiations", "We would do better"],
        ),
        stance(
            "corruption",
            "PD",
            Oppose,
            1.0,
            &["Government is most corrupt ever", "SPAK must investigate PM"],
        ),
        stance(
            "corruption",
            "PS",
            Oppose,
            0.7,
            &["Justice reform is working", "Opposition leaders are corrupt"],
        ),
        stance(
            "migration",
            "PS",
            Neutral,
            0.5,
            &["Creating opportunities at home", "Diaspora is important"],
        ),
        stance(
            "migration",
            "PD",
            Oppose,
            0.8,
            &["Youth are fleeing", "Government has failed"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(option: &CoalitionOption) -> Vec<&str> {
        option.parties.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_similarity_counts_only_agreeing_stances() {
        let ontology = PoliticalOntology::default();
        // eu-accession 0.9, corruption 0.7, migration disagrees
        let expected = (0.9 + 0.7) / 3.0;
        assert!((ontology.similarity("PS", "PD") - expected).abs() < 1e-9);
        assert!((ontology.similarity("PD", "PS") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_without_shared_issues() {
        let ontology = PoliticalOntology::default();
        assert_eq!(ontology.similarity("PS", "LSI"), 0.0);
        assert_eq!(ontology.similarity("PS", "nobody"), 0.0);
    }

    #[test]
    fn test_coalitions_reach_majority() {
        let ontology = PoliticalOntology::default();
        let options = ontology.coalition_options(MAJORITY_SEATS);

        let found: Vec<Vec<&str>> = options.iter().map(ids).collect();
        assert_eq!(
            found,
            vec![
                vec!["PS", "PD"],
                vec!["PS", "PD", "LSI"],
                vec!["PS", "PD", "PSD"],
                vec!["PS", "LSI"],
                vec!["PS", "LSI", "PSD"],
                vec!["PS", "PSD"],
            ]
        );
        assert!(options.iter().all(|o| o.seats >= MAJORITY_SEATS));
        assert_eq!(options[0].seats, 133);
        assert_eq!(options[3].seats, 78);
    }

    #[test]
    fn test_coalitions_skip_seatless_parties() {
        let options = PoliticalOntology::default().coalition_options(1);
        assert!(options
            .iter()
            .all(|o| !o.parties.iter().any(|p| p == "PR" || p == "PL")));
        // 6 pairs and 4 triples from the 4 seated parties
        assert_eq!(options.len(), 10);
    }

    #[test]
    fn test_coalition_threshold_is_inclusive() {
        let options = PoliticalOntology::default().coalition_options(136);
        let found: Vec<Vec<&str>> = options.iter().map(ids).collect();
        assert_eq!(found, vec![vec!["PS", "PD", "LSI"], vec!["PS", "PD", "PSD"]]);
        assert!(PoliticalOntology::default().coalition_options(138).is_empty());
    }

    #[test]
    fn test_coalitions_sorted_by_alignment() {
        let mut stances = albanian_stances();
        stances.push(stance("eu-accession", "LSI", Stance::Support, 0.9, &[]));
        let ontology = PoliticalOntology::new(
            albanian_parties(),
            albanian_leaders(),
            albanian_issues(),
            stances,
        );

        let options = ontology.coalition_options(MAJORITY_SEATS);
        assert_eq!(ids(&options[0]), vec!["PS", "LSI"]);
        assert_eq!(options[0].alignment, 1.0);
        assert!(options
            .windows(2)
            .all(|w| w[0].alignment >= w[1].alignment));
    }

    #[test]
    fn test_three_party_alignment_is_pairwise_mean() {
        let ontology = PoliticalOntology::default();
        let options = ontology.coalition_options(MAJORITY_SEATS);
        let triple = options
            .iter()
            .find(|o| ids(o) == vec!["PS", "PD", "LSI"])
            .unwrap();
        let expected = ontology.similarity("PS", "PD") / 3.0;
        assert!((triple.alignment - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trending_topics_by_strength() {
        let ontology = PoliticalOntology::default();
        let topics: Vec<&str> = ontology
            .trending_topics("PD")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(topics, vec!["corruption", "eu-accession", "migration"]);
        assert!(ontology.trending_topics("PR").is_empty());
    }

    #[test]
    fn test_lookups() {
        let ontology = PoliticalOntology::default();
        assert_eq!(ontology.party("PS").map(|p| p.seats), Some(74));
        assert!(ontology.party("XYZ").is_none());
        assert_eq!(ontology.issues_in(IssueCategory::Economic).len(), 3);
        assert_eq!(
            ontology.stance("PD", "corruption").map(|s| s.stance),
            Some(Stance::Oppose)
        );
        assert_eq!(ontology.leaders().len(), 4);
    }
}
