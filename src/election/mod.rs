pub mod dhondt;
pub mod ontology;
pub mod presets;
pub mod simulator;
pub mod types;

pub use dhondt::{allocate_seats, Contender};
pub use ontology::{CoalitionOption, PoliticalOntology, MAJORITY_SEATS};
pub use presets::{default_scenarios, serbian_parties, serbian_regions};
pub use simulator::{run_election_simulation, ElectionSimulator};
pub use types::{
    CoalitionScenario, EconomicLevel, ElectionRules, ElectionScenario, Ideology, Party,
    PartyResult, PartyShare, Region, RegionalResult, ScenarioFactors, Settlement,
    SimulationResult, Stability,
};
