pub mod config;
pub mod curves;
pub mod engine;
pub mod validation;

pub use config::{CategoryWeights, SeverityWeights};
pub use curves::{Band, Curve, Edge, Input, Points};
pub use engine::{blend, round1, Blend, FactorContribution, Weighted};
pub use validation::{validate_range, validate_weights};
