pub mod catalog;
pub mod engine;
pub mod store;
pub mod types;

pub use catalog::CorruptionCatalog;
pub use engine::{risk_level, CorruptionEngine};
pub use store::{CorruptionState, CorruptionStore, JsonFileStore, MemoryStore};
pub use types::{
    normalize_key, CaseMatch, CaseStatus, CorruptionCase, CorruptionIndicator,
    CorruptionSentiment, HeatCell, IndicatorCategory, IndicatorTrend, IndicatorTrends,
    InstitutionTrust, NewCase, PublicMood, RiskLevel, SectorRisk,
};
