pub mod loader;
pub mod locations;
pub mod tracker;
pub mod types;

pub use loader::load_posts;
pub use locations::{default_locations, DEFAULT_HOME_COUNTRY};
pub use tracker::{detect_narrative_flows, DiasporaTracker};
pub use types::{
    DiasporaLocation, DiasporaMetrics, DiasporaPost, Engagement, Influence, NarrativeFlow,
    NarrativeType, Sentiment, SentimentBreakdown, TrackedPost,
};
