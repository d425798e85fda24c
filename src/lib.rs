pub mod config;
pub mod corruption;
pub mod diaspora;
pub mod election;
pub mod output;
pub mod ppi;
pub mod scoring;

pub use corruption::CorruptionEngine;
pub use diaspora::detect_narrative_flows;
pub use election::run_election_simulation;
pub use ppi::compute_ppi;
